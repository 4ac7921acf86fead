//! # View 模块
//!
//! 弹窗子树的内存模型。
//!
//! ## 设计说明
//!
//! - `ModalView` 按与 DOM Host 相同的语义执行 [`ModalCommand`]
//! - 预览工具用它渲染最终 HTML，测试用它检查状态不变式
//! - 同意网关相关指令转交给传入的 [`ConsentGate`]

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use crate::command::{
    BACKGROUND_ID, Direction, MODAL_ID, ModalCommand, NavigationLink, ONLY_LANDSCAPE_CLASS,
    OPENED_CLASS,
};
use crate::consent::ConsentGate;
use crate::state::ModalState;
use crate::template::{PlayerElement, escape_attr};

/// 弹窗子树的内存模型
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalView {
    /// 根节点是否已挂载
    pub mounted: bool,
    /// 根节点是否带 `opened`
    pub opened: bool,
    /// 根节点是否带 `only-landscape`
    pub only_landscape: bool,
    pub close_icon: Option<String>,
    pub loader_icon: Option<String>,
    /// 关闭图标是否有点击监听
    pub close_icon_listening: bool,
    /// 背景层是否有点击监听
    pub background_listening: bool,
    /// 弹窗中的 `.videos_player` 元素
    pub players: Vec<PlayerElement>,
    /// 弹窗中的导航链接
    pub navigation: Vec<NavigationLink>,
    /// 已绑定点击监听的触发链接
    pub bound_links: BTreeSet<usize>,
    /// 触发链接上的 `data-videos-modal-order`
    pub link_orders: BTreeMap<usize, usize>,
}

impl ModalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// 执行一组指令
    pub fn apply_all<'a>(
        &mut self,
        commands: impl IntoIterator<Item = &'a ModalCommand>,
        gate: Option<&dyn ConsentGate>,
    ) {
        for command in commands {
            self.apply(command, gate);
        }
    }

    /// 执行单个指令
    pub fn apply(&mut self, command: &ModalCommand, gate: Option<&dyn ConsentGate>) {
        match command {
            ModalCommand::MountContainer {
                close_icon,
                loader_icon,
                only_landscape,
                close_by_icon,
                close_on_click,
            } => {
                self.mounted = true;
                self.close_icon = close_icon.clone();
                self.loader_icon = loader_icon.clone();
                self.only_landscape = *only_landscape;
                self.close_icon_listening = *close_by_icon && close_icon.is_some();
                self.background_listening = *close_on_click;
            }
            ModalCommand::BindLink { index } => {
                self.bound_links.insert(*index);
            }
            ModalCommand::UnbindLink { index } => {
                self.bound_links.remove(index);
            }
            ModalCommand::SetLinkOrder { index, order } => {
                self.link_orders.insert(*index, *order);
            }
            ModalCommand::ShowModal => self.opened = true,
            ModalCommand::HideModal => self.opened = false,
            ModalCommand::InsertPlayer(player) => self.players.push(player.clone()),
            ModalCommand::RemovePlayer => self.players.clear(),
            ModalCommand::InsertNavigation { prev, next } => {
                self.navigation.push(prev.clone());
                self.navigation.push(next.clone());
            }
            ModalCommand::UpdateNavigation { prev, next } => {
                for link in &mut self.navigation {
                    link.attributes = match link.direction {
                        Direction::Prev => prev.clone(),
                        Direction::Next => next.clone(),
                    };
                }
            }
            ModalCommand::RemoveNavigation => self.navigation.clear(),
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
    }

    /// 当前的可播放元素（恰好一个时）
    pub fn player(&self) -> Option<&PlayerElement> {
        match self.players.as_slice() {
            [player] => Some(player),
            _ => None,
        }
    }

    /// 按 id 查找导航链接
    pub fn navigation_link(&self, id: &str) -> Option<&NavigationLink> {
        self.navigation.iter().find(|link| link.id() == id)
    }

    /// 检查子树与控制器状态是否一致
    ///
    /// 打开时恰有一个播放器，并按 `has_navigation_controls` 恰有一对导航链接；
    /// 关闭时都不存在。
    pub fn is_consistent_with(&self, state: &ModalState) -> bool {
        if state.is_open() {
            let expected_navigation = if state.has_navigation_controls { 2 } else { 0 };
            self.opened && self.players.len() == 1 && self.navigation.len() == expected_navigation
        } else {
            !self.opened && self.players.is_empty() && self.navigation.is_empty()
        }
    }

    /// 渲染弹窗根节点
    pub fn to_html(&self) -> String {
        let mut classes = Vec::new();
        if self.only_landscape {
            classes.push(ONLY_LANDSCAPE_CLASS);
        }
        if self.opened {
            classes.push(OPENED_CLASS);
        }

        let mut html = format!("<div id=\"{MODAL_ID}\"");
        if !classes.is_empty() {
            let _ = write!(html, " class=\"{}\"", classes.join(" "));
        }
        html.push('>');
        if let Some(icon) = &self.close_icon {
            html.push_str(icon);
        }
        if let Some(icon) = &self.loader_icon {
            html.push_str(icon);
        }
        let _ = write!(html, "<div id=\"{BACKGROUND_ID}\"></div>");
        for player in &self.players {
            html.push_str(&player.to_html());
        }
        for link in &self.navigation {
            let _ = write!(html, "<a id=\"{}\"", link.id());
            for (name, value) in link.attributes.iter() {
                let _ = write!(html, " {}=\"{}\"", name, escape_attr(value));
            }
            html.push('>');
            if let Some(icon) = &link.icon {
                html.push_str(icon);
            }
            html.push_str("</a>");
        }
        html.push_str("</div>");
        html
    }
}
