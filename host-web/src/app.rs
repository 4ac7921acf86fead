//! 导出给页面脚本的 `VideosModal` 类。

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{JSON, Object, Reflect};
use tracing::{debug, warn};
use videos_modal::{ModalCommand, ModalInput, ModalOptions, VideosModal};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, Window};

use crate::dom::{Dispatch, DomHost};
use crate::events::{self, CONSENT_GATE_OPTION};
use crate::gate::JsConsentGate;

struct Inner {
    modal: VideosModal,
    dom: DomHost,
    window: Window,
    keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl Drop for Inner {
    /// 页面调用 `free()` 后不再收到键盘事件；节点上的监听由 [`DomHost`] 摘除
    fn drop(&mut self) {
        if let Some(keydown) = self.keydown.take() {
            if let Err(error) = self
                .window
                .remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            {
                debug!(?error, "移除键盘监听失败");
            }
        }
    }
}

impl Inner {
    fn apply(&mut self, commands: &[ModalCommand]) -> Result<(), JsValue> {
        let Inner { modal, dom, .. } = self;
        dom.apply_all(commands, modal.consent_gate())
    }

    fn run(&mut self, input: ModalInput) -> Result<(), JsValue> {
        let commands = self
            .modal
            .handle(input, current_viewport())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.apply(&commands)
    }

    /// DOM 事件入口，错误只记录不抛出
    fn dispatch(inner: &Rc<RefCell<Inner>>, input: ModalInput) {
        let Ok(mut inner) = inner.try_borrow_mut() else {
            warn!(?input, "弹窗正在处理其他事件，忽略");
            return;
        };
        if let Err(error) = inner.run(input) {
            debug!(?error, "忽略输入");
        }
    }
}

/// 视频弹窗
#[wasm_bindgen(js_name = VideosModal)]
pub struct WebVideosModal {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen(js_class = VideosModal)]
impl WebVideosModal {
    /// `new VideosModal(options)`
    ///
    /// 挂载弹窗容器、注册触发链接，并绑定窗口键盘监听。
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<WebVideosModal, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("没有 window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("没有 document"))?;

        let (options, gate) = split_options(&options)?;
        let mut modal = VideosModal::new(options);
        if let Some(gate) = gate {
            modal = modal.with_consent_gate(Rc::new(gate));
        }

        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<Inner>>| {
            let weak = weak.clone();
            let dispatch: Dispatch = Rc::new(move |input| {
                if let Some(inner) = weak.upgrade() {
                    Inner::dispatch(&inner, input);
                }
            });
            RefCell::new(Inner {
                modal,
                dom: DomHost::new(document, dispatch),
                window: window.clone(),
                keydown: None,
            })
        });

        {
            let mut guard = inner.borrow_mut();
            let selector = guard.modal.options().links.clone();
            let links = guard.dom.collect_links(&selector)?;
            let commands = guard.modal.mount(links);
            guard.apply(&commands)?;
        }

        let weak = Rc::downgrade(&inner);
        let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let key = events::key_from_event(&event.key(), event.key_code());
            if let Some(inner) = weak.upgrade() {
                Inner::dispatch(&inner, ModalInput::KeyDown(key));
            }
        });
        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        inner.borrow_mut().keydown = Some(keydown);

        debug!("视频弹窗已初始化");
        Ok(WebVideosModal { inner })
    }

    /// 文档中的触发链接变化后重新注册
    pub fn reset(&self) -> Result<(), JsValue> {
        let mut inner = self.inner.borrow_mut();
        let selector = inner.modal.options().links.clone();
        let links = inner.dom.collect_links(&selector)?;
        let commands = inner.modal.reset(links);
        inner.apply(&commands)
    }

    /// 打开第 `index` 个触发链接
    pub fn open(&self, index: usize) -> Result<(), JsValue> {
        self.inner.borrow_mut().run(ModalInput::link(index))
    }

    pub fn close(&self) -> Result<(), JsValue> {
        let mut inner = self.inner.borrow_mut();
        let commands = inner.modal.close();
        inner.apply(&commands)
    }

    pub fn prev(&self) -> Result<(), JsValue> {
        self.inner.borrow_mut().run(ModalInput::PrevClicked)
    }

    pub fn next(&self) -> Result<(), JsValue> {
        self.inner.borrow_mut().run(ModalInput::NextClicked)
    }

    /// 当前状态（JSON）
    pub fn state(&self) -> String {
        events::state_json(self.inner.borrow().modal.state())
    }
}

/// 拆出同意网关对象，其余部分按 JSON 解析为实例配置
fn split_options(options: &JsValue) -> Result<(ModalOptions, Option<JsConsentGate>), JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok((ModalOptions::default(), None));
    }

    let key = JsValue::from_str(CONSENT_GATE_OPTION);
    let tarteaucitron = Reflect::get(options, &key)?;
    let gate = (!tarteaucitron.is_undefined() && !tarteaucitron.is_null())
        .then(|| JsConsentGate::new(tarteaucitron));

    let copy = Object::assign(&Object::new(), options.unchecked_ref::<Object>());
    Reflect::delete_property(&copy, &key)?;
    let json = String::from(JSON::stringify(&copy)?);
    let options = ModalOptions::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok((options, gate))
}

fn current_viewport() -> videos_modal::Viewport {
    let window = web_sys::window();
    let read = |value: Option<Result<JsValue, JsValue>>| value.and_then(Result::ok).and_then(|v| v.as_f64());
    events::viewport(
        read(window.as_ref().map(|w| w.inner_width())),
        read(window.as_ref().map(|w| w.inner_height())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
    use web_sys::{Event, KeyboardEvent, KeyboardEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_free_detaches_listeners() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        document
            .body()
            .unwrap()
            .set_inner_html(r#"<a class="videos-modal-link" href="#"></a>"#);

        let errors = Rc::new(Cell::new(0));
        let counter = Rc::clone(&errors);
        let on_error = Closure::<dyn FnMut(Event)>::new(move |_: Event| counter.set(counter.get() + 1));
        window
            .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
            .unwrap();

        let modal = WebVideosModal::new(JsValue::UNDEFINED).unwrap();
        let link = document.query_selector(".videos-modal-link").unwrap().unwrap();
        link.dispatch_event(&Event::new("click").unwrap()).unwrap();
        assert!(modal.state().contains(r#""phase":"Open""#));
        drop(modal);

        link.dispatch_event(&Event::new("click").unwrap()).unwrap();
        let init = KeyboardEventInit::new();
        init.set_key("Escape");
        let escape = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        window.dispatch_event(&escape).unwrap();
        assert_eq!(errors.get(), 0);

        window
            .remove_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
            .unwrap();
    }
}
