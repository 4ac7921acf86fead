//! # Error 模块
//!
//! 定义 videos-modal 中使用的错误类型。

use thiserror::Error;

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// JSON 解析失败
    #[error("配置解析失败: {message}")]
    Parse { message: String },

    /// 配置验证失败
    #[error("配置验证失败: {message}")]
    Validation { message: String },
}

/// 弹窗控制器错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModalError {
    /// 输入引用了未注册的链接
    #[error("链接 {index} 不存在，当前共注册 {count} 个链接")]
    LinkNotFound { index: usize, count: usize },

    /// 当前状态下没有导航链接
    #[error("导航不可用：弹窗未打开或未生成上一个/下一个链接")]
    NavigationUnavailable,
}

/// Result 类型别名
pub type ModalResult<T> = Result<T, ModalError>;
