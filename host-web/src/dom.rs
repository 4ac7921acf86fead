//! # DOM 模块
//!
//! 在真实 DOM 上执行 [`ModalCommand`]。
//!
//! 所有监听闭包都由 [`DomHost`] 持有，移除监听时一并释放。

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;
use videos_modal::command::{
    BACKGROUND_ID, CLOSE_ICON_ID, MODAL_ID, ONLY_LANDSCAPE_CLASS, OPENED_CLASS,
};
use videos_modal::link::ORDER_ATTRIBUTE;
use videos_modal::template::PLAYER_CLASS;
use videos_modal::{
    ConsentGate, Direction, LinkAttributes, ModalCommand, ModalInput, NavigationLink,
    PlayerElement,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event};

use crate::events;

/// 把输入交回控制器
pub(crate) type Dispatch = Rc<dyn Fn(ModalInput)>;

type Listener = Closure<dyn FnMut(Event)>;

pub(crate) struct DomHost {
    document: Document,
    dispatch: Dispatch,
    /// `#videos-modal`
    container: Option<Element>,
    /// 当前文档中的触发链接
    links: Vec<Element>,
    /// 已绑定的触发链接与其监听
    bound: HashMap<usize, (Element, Listener)>,
    /// 关闭图标与背景层及其监听
    chrome: Vec<(Element, Listener)>,
    /// 导航链接节点与其监听
    navigation: Vec<(Direction, Element, Listener)>,
}

impl DomHost {
    pub(crate) fn new(document: Document, dispatch: Dispatch) -> Self {
        Self {
            document,
            dispatch,
            container: None,
            links: Vec::new(),
            bound: HashMap::new(),
            chrome: Vec::new(),
            navigation: Vec::new(),
        }
    }

    /// 查询触发链接并返回它们的属性快照
    pub(crate) fn collect_links(&mut self, selector: &str) -> Result<Vec<LinkAttributes>, JsValue> {
        let nodes = self.document.query_selector_all(selector)?;
        let mut links = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            if let Some(element) = nodes.get(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                links.push(element);
            }
        }

        let attributes = links.iter().map(read_attributes).collect();
        self.links = links;
        Ok(attributes)
    }

    pub(crate) fn apply_all(
        &mut self,
        commands: &[ModalCommand],
        gate: Option<&dyn ConsentGate>,
    ) -> Result<(), JsValue> {
        for command in commands {
            self.apply(command, gate)?;
        }
        Ok(())
    }

    fn apply(&mut self, command: &ModalCommand, gate: Option<&dyn ConsentGate>) -> Result<(), JsValue> {
        match command {
            ModalCommand::MountContainer {
                close_icon,
                loader_icon,
                only_landscape,
                close_by_icon,
                close_on_click,
            } => {
                let container = self.mount_container(
                    close_icon.as_deref(),
                    loader_icon.as_deref(),
                    *only_landscape,
                )?;
                if *close_by_icon {
                    let icon = self.anchor(CLOSE_ICON_ID)?;
                    self.listen_chrome(icon, ModalInput::CloseIconClicked)?;
                }
                if *close_on_click {
                    let background = self.anchor(BACKGROUND_ID)?;
                    self.listen_chrome(background, ModalInput::BackgroundClicked)?;
                }
                self.container = Some(container);
            }
            ModalCommand::BindLink { index } => {
                let link = self.link(*index)?.clone();
                let listener = self.listener(ModalInput::link(*index), true);
                link.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
                self.bound.insert(*index, (link, listener));
            }
            ModalCommand::UnbindLink { index } => {
                if let Some((link, listener)) = self.bound.remove(index) {
                    link.remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
                }
            }
            ModalCommand::SetLinkOrder { index, order } => {
                self.link(*index)?
                    .set_attribute(ORDER_ATTRIBUTE, &order.to_string())?;
            }
            ModalCommand::ShowModal => self.container()?.class_list().add_1(OPENED_CLASS)?,
            ModalCommand::HideModal => self.container()?.class_list().remove_1(OPENED_CLASS)?,
            ModalCommand::InsertPlayer(player) => {
                let element = self.create_player(player)?;
                self.container()?.append_child(&element)?;
            }
            ModalCommand::RemovePlayer => {
                let players = self
                    .container()?
                    .query_selector_all(&format!(".{PLAYER_CLASS}"))?;
                for i in 0..players.length() {
                    if let Some(player) = players.get(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                        player.remove();
                    }
                }
            }
            ModalCommand::InsertNavigation { prev, next } => {
                for link in [prev, next] {
                    let anchor = self.create_navigation(link)?;
                    self.container()?.append_child(&anchor)?;
                }
            }
            ModalCommand::UpdateNavigation { prev, next } => {
                for (direction, anchor, _) in &self.navigation {
                    let attributes = match direction {
                        Direction::Prev => prev,
                        Direction::Next => next,
                    };
                    write_attributes(anchor, attributes)?;
                }
            }
            ModalCommand::RemoveNavigation => {
                for (_, anchor, listener) in self.navigation.drain(..) {
                    anchor.remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
                    anchor.remove();
                }
            }
            ModalCommand::ActivateConsent { provider } => {
                if let Some(gate) = gate {
                    gate.activate(provider);
                }
            }
            ModalCommand::OpenConsentPanel => {
                if let Some(gate) = gate {
                    gate.open_panel();
                }
            }
        }
        Ok(())
    }

    /// 取已有的 `#videos-modal`，不存在时创建
    ///
    /// 无论容器是否已存在，都写入图标、`only-landscape` 类与背景层，并移到 body 末尾。
    fn mount_container(
        &self,
        close_icon: Option<&str>,
        loader_icon: Option<&str>,
        only_landscape: bool,
    ) -> Result<Element, JsValue> {
        let container = match self.document.get_element_by_id(MODAL_ID) {
            Some(existing) => {
                debug!("复用已有的弹窗容器");
                existing
            }
            None => {
                let container = self.document.create_element("div")?;
                container.set_id(MODAL_ID);
                container
            }
        };

        for icon in [close_icon, loader_icon].into_iter().flatten() {
            container.insert_adjacent_html("beforeend", icon)?;
        }
        if only_landscape {
            container.class_list().add_1(ONLY_LANDSCAPE_CLASS)?;
        }

        let background = self.document.create_element("div")?;
        background.set_id(BACKGROUND_ID);
        container.append_child(&background)?;

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document 没有 body"))?;
        body.append_child(&container)?;
        Ok(container)
    }

    /// 启用的关闭入口必须存在于文档中
    fn anchor(&self, id: &str) -> Result<Element, JsValue> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("缺少 #{id}")))
    }

    fn listen_chrome(&mut self, element: Element, input: ModalInput) -> Result<(), JsValue> {
        let listener = self.listener(input, false);
        element.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
        self.chrome.push((element, listener));
        Ok(())
    }

    fn create_player(&self, player: &PlayerElement) -> Result<Element, JsValue> {
        let element = self.document.create_element(player.tag.as_str())?;
        for class in &player.classes {
            element.class_list().add_1(class)?;
        }
        for (name, value) in &player.attributes {
            element.set_attribute(name, value)?;
        }
        if let Some(flags) = player.flags {
            for (name, on) in [
                ("controls", flags.controls),
                ("loop", flags.loop_),
                ("autoplay", flags.autoplay),
                ("muted", flags.muted),
            ] {
                if on {
                    element.set_attribute(name, "")?;
                }
            }
        }
        for source in &player.sources {
            let child = self.document.create_element("source")?;
            child.set_attribute("type", &source.mime)?;
            child.set_attribute("src", &source.src)?;
            element.append_child(&child)?;
        }
        if let Some(style) = player.style() {
            element.set_attribute("style", &style)?;
        }
        Ok(element)
    }

    fn create_navigation(&mut self, link: &NavigationLink) -> Result<Element, JsValue> {
        let anchor = self.document.create_element("a")?;
        anchor.set_id(link.id());
        write_attributes(&anchor, &link.attributes)?;
        if let Some(icon) = &link.icon {
            anchor.insert_adjacent_html("afterbegin", icon)?;
        }

        let input = match link.direction {
            Direction::Prev => ModalInput::PrevClicked,
            Direction::Next => ModalInput::NextClicked,
        };
        let listener = self.listener(input, true);
        anchor.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
        self.navigation.push((link.direction, anchor.clone(), listener));
        Ok(anchor)
    }

    fn listener(&self, input: ModalInput, prevent_default: bool) -> Listener {
        let dispatch = Rc::clone(&self.dispatch);
        Closure::new(move |event: Event| {
            if prevent_default {
                event.prevent_default();
            }
            dispatch(input.clone());
        })
    }

    fn container(&self) -> Result<&Element, JsValue> {
        self.container
            .as_ref()
            .ok_or_else(|| JsValue::from_str("弹窗容器尚未挂载"))
    }

    fn link(&self, index: usize) -> Result<&Element, JsValue> {
        self.links
            .get(index)
            .ok_or_else(|| JsValue::from_str(&format!("触发链接不存在: {index}")))
    }
}

impl Drop for DomHost {
    /// 释放闭包前先从节点上摘除监听
    fn drop(&mut self) {
        let bound = self.bound.drain().map(|(_, entry)| entry);
        let navigation = self
            .navigation
            .drain(..)
            .map(|(_, anchor, listener)| (anchor, listener));
        for (element, listener) in bound.chain(self.chrome.drain(..)).chain(navigation) {
            if let Err(error) =
                element.remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            {
                debug!(?error, "移除监听失败");
            }
        }
    }
}

fn read_attributes(element: &Element) -> LinkAttributes {
    let names = element.get_attribute_names();
    events::link_attributes(names.iter().filter_map(|name| {
        let name = name.as_string()?;
        let value = element.get_attribute(&name)?;
        Some((name, value))
    }))
}

fn write_attributes(element: &Element, attributes: &LinkAttributes) -> Result<(), JsValue> {
    for (name, value) in attributes.iter() {
        element.set_attribute(name, value)?;
    }
    Ok(())
}
