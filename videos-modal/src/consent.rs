//! # Consent 模块
//!
//! 外部同意管理（如 tarteaucitron）的能力接口。
//! 本系统只依赖这三个操作，不关心网关内部行为。

use std::cell::RefCell;
use std::collections::HashMap;

use crate::provider::Provider;

/// 同意网关
pub trait ConsentGate {
    /// 用户是否已允许该 Provider
    fn is_allowed(&self, provider: &Provider) -> bool;

    /// 激活该 Provider 的嵌入脚本（替换或激活占位容器）
    fn activate(&self, provider: &Provider);

    /// 打开同意面板
    fn open_panel(&self);
}

/// 网关调用记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentCall {
    Activate(Provider),
    OpenPanel,
}

/// 状态固定的同意网关
///
/// 用于预览工具与测试：允许状态由构造时给出，所有调用按顺序记录。
#[derive(Debug, Default)]
pub struct StaticConsentGate {
    state: HashMap<Provider, bool>,
    calls: RefCell<Vec<ConsentCall>>,
}

impl StaticConsentGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置某个 Provider 的允许状态
    pub fn with_state(mut self, provider: Provider, allowed: bool) -> Self {
        self.state.insert(provider, allowed);
        self
    }

    /// 已发生的调用
    pub fn calls(&self) -> Vec<ConsentCall> {
        self.calls.borrow().clone()
    }

    /// 打开面板的次数
    pub fn panel_openings(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, ConsentCall::OpenPanel))
            .count()
    }
}

impl ConsentGate for StaticConsentGate {
    fn is_allowed(&self, provider: &Provider) -> bool {
        self.state.get(provider).copied().unwrap_or(false)
    }

    fn activate(&self, provider: &Provider) {
        self.calls
            .borrow_mut()
            .push(ConsentCall::Activate(provider.clone()));
    }

    fn open_panel(&self) {
        self.calls.borrow_mut().push(ConsentCall::OpenPanel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_gate() {
        let gate = StaticConsentGate::new()
            .with_state(Provider::YouTube, true)
            .with_state(Provider::Vimeo, false);

        assert!(gate.is_allowed(&Provider::YouTube));
        assert!(!gate.is_allowed(&Provider::Vimeo));
        assert!(!gate.is_allowed(&Provider::Dailymotion));

        gate.activate(&Provider::YouTube);
        gate.open_panel();
        assert_eq!(
            gate.calls(),
            vec![ConsentCall::Activate(Provider::YouTube), ConsentCall::OpenPanel]
        );
        assert_eq!(gate.panel_openings(), 1);
    }
}
