//! DOM 事件与控制器输入之间的转换。
//!
//! 这里只放与 `web-sys` 无关的部分，便于在原生目标上测试。

use videos_modal::{Key, LinkAttributes, ModalState, Viewport};

/// 实例配置中同意网关对象的键
pub const CONSENT_GATE_OPTION: &str = "tarteAuCitron";

/// 由 `KeyboardEvent` 得到按键
///
/// 优先使用 `key`，旧浏览器只给 `keyCode` 时回退到键码。
pub fn key_from_event(key: &str, key_code: u32) -> Key {
    match Key::from_dom_key(key) {
        Key::Other => Key::from_key_code(key_code),
        key => key,
    }
}

/// 由元素上的 `(属性名, 值)` 构造属性快照
pub fn link_attributes<I>(attributes: I) -> LinkAttributes
where
    I: IntoIterator<Item = (String, String)>,
{
    attributes.into_iter().collect()
}

/// 由 `innerWidth` / `innerHeight` 构造可视区域，读不到时按 0 处理
pub fn viewport(width: Option<f64>, height: Option<f64>) -> Viewport {
    Viewport::new(width.unwrap_or(0.0), height.unwrap_or(0.0))
}

/// 状态的 JSON 表示，供页面脚本查询
pub fn state_json(state: &ModalState) -> String {
    serde_json::to_string(state).unwrap_or_default()
}
