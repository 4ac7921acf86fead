//! # State 模块
//!
//! 控制器的可变状态。只有 open / close / prev / next 会修改它。

use serde::{Deserialize, Serialize};

/// 弹窗阶段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalPhase {
    #[default]
    Closed,
    Open,
}

/// 弹窗状态
///
/// 不变式：打开时恰有一个可播放元素，且在启用导航、链接数大于 1 时
/// 恰有一个上一个链接和一个下一个链接；关闭时三者都不存在。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalState {
    /// 当前链接的顺序索引
    pub current_link: usize,
    /// 当前阶段
    pub phase: ModalPhase,
    /// 是否已生成导航链接
    pub has_navigation_controls: bool,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.phase == ModalPhase::Open
    }

    pub(crate) fn open(&mut self) {
        self.phase = ModalPhase::Open;
    }

    pub(crate) fn close(&mut self) {
        self.phase = ModalPhase::Closed;
        self.has_navigation_controls = false;
    }
}

/// 上一个索引：`(current - 1 + count) mod count`
pub fn prev_index(current: usize, count: usize) -> usize {
    (current + count - 1) % count
}

/// 下一个索引：`(current + 1) mod count`
pub fn next_index(current: usize, count: usize) -> usize {
    (current + 1) % count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        let mut state = ModalState::new();
        assert!(!state.is_open());

        state.open();
        state.has_navigation_controls = true;
        assert!(state.is_open());

        state.close();
        assert!(!state.is_open());
        assert!(!state.has_navigation_controls);
    }

    #[test]
    fn test_wraparound() {
        for count in 2..6 {
            for current in 0..count {
                assert_eq!(prev_index(current, count), (current + count - 1) % count);
                assert_eq!(next_index(current, count), (current + 1) % count);
            }
        }
        assert_eq!(prev_index(0, 3), 2);
        assert_eq!(next_index(2, 3), 0);
    }
}
