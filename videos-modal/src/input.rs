//! # Input 模块
//!
//! 定义 Host 向控制器传递的输入事件。
//!
//! ## 设计说明
//!
//! - Host 负责监听 DOM 事件并阻止默认行为，控制器只处理语义化的输入
//! - 键盘事件只在弹窗打开时生效，由控制器判断

use serde::{Deserialize, Serialize};

/// 控制器关心的按键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// 由 `KeyboardEvent.key` 映射
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }

    /// 由旧式 `keyCode` / `which` 映射
    pub fn from_key_code(code: u32) -> Self {
        match code {
            27 => Key::Escape,
            37 => Key::ArrowLeft,
            39 => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// Host 向控制器传递的输入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalInput {
    /// 点击了第 `index` 个触发链接
    LinkClicked { index: usize },
    /// 点击了"上一个"链接
    PrevClicked,
    /// 点击了"下一个"链接
    NextClicked,
    /// 点击了关闭图标
    CloseIconClicked,
    /// 点击了背景层
    BackgroundClicked,
    /// 键盘按下
    KeyDown(Key),
}

impl ModalInput {
    pub fn link(index: usize) -> Self {
        Self::LinkClicked { index }
    }

    pub fn key(key: &str) -> Self {
        Self::KeyDown(Key::from_dom_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_dom_key("Escape"), Key::Escape);
        assert_eq!(Key::from_dom_key("Esc"), Key::Escape);
        assert_eq!(Key::from_dom_key("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom_key("a"), Key::Other);

        assert_eq!(Key::from_key_code(27), Key::Escape);
        assert_eq!(Key::from_key_code(37), Key::ArrowLeft);
        assert_eq!(Key::from_key_code(39), Key::ArrowRight);
        assert_eq!(Key::from_key_code(13), Key::Other);
    }

    #[test]
    fn test_input_creation() {
        assert_eq!(ModalInput::link(3), ModalInput::LinkClicked { index: 3 });
        assert_eq!(ModalInput::key("Left"), ModalInput::KeyDown(Key::ArrowLeft));
    }

    #[test]
    fn test_input_serialization() {
        let input = ModalInput::KeyDown(Key::Escape);
        let json = serde_json::to_string(&input).unwrap();
        let deserialized: ModalInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, deserialized);
    }
}
