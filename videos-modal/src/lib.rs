//! # Videos Modal
//!
//! 视频弹窗组件的核心逻辑库。
//!
//! ## 架构概述
//!
//! `videos-modal` 是纯逻辑核心，不依赖 DOM 或任何 IO。
//! 它通过 **指令驱动模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host                            VideosModal
//!   │                                  │
//!   │──── ModalInput + Viewport ──────►│
//!   │                                  │ handle()
//!   │◄─── Vec<ModalCommand> ───────────│
//!   │                                  │
//! ```
//!
//! ## 核心类型
//!
//! - [`VideosModal`]：弹窗控制器，拥有状态与触发链接集合
//! - [`Resolver`]：三层配置合并（链接属性 > 实例配置 > Provider 默认值）
//! - [`PlayerElement`]：可播放元素的声明式描述
//! - [`ModalCommand`]：控制器向 Host 发出的指令
//! - [`ConsentGate`]：外部同意网关的能力接口
//!
//! ## 使用示例
//!
//! ```ignore
//! use videos_modal::{ModalInput, ModalOptions, VideosModal, Viewport};
//!
//! let options = ModalOptions::from_json(json)?;
//! let mut modal = VideosModal::new(options);
//!
//! // 挂载弹窗并注册链接
//! host.execute(modal.mount(read_links()));
//!
//! // 事件循环
//! let commands = modal.handle(ModalInput::link(0), Viewport::new(1280.0, 720.0))?;
//! host.execute(commands);
//! ```
//!
//! ## 模块结构
//!
//! - [`options`]：实例配置
//! - [`link`]：触发链接与参数属性
//! - [`provider`]：视频来源
//! - [`resolver`]：配置解析
//! - [`template`]：可播放元素构造
//! - [`layout`]：尺寸与居中
//! - [`consent`]：同意网关接口
//! - [`command`] / [`input`] / [`state`]：控制器的输出、输入与状态
//! - [`controller`]：弹窗控制器
//! - [`view`]：弹窗子树的内存模型

pub mod command;
pub mod consent;
pub mod controller;
pub mod error;
pub mod icons;
pub mod input;
pub mod layout;
pub mod link;
pub mod options;
pub mod provider;
pub mod resolver;
pub mod state;
pub mod template;
pub mod view;

// 重导出核心类型
pub use command::{Direction, ModalCommand, NavigationLink};
pub use consent::{ConsentCall, ConsentGate, StaticConsentGate};
pub use controller::VideosModal;
pub use error::{ModalError, ModalResult, OptionsError};
pub use input::{Key, ModalInput};
pub use layout::Viewport;
pub use link::{LinkAttributes, VideoParam};
pub use options::{ModalOptions, ParamValue, VideoDefaults};
pub use provider::Provider;
pub use resolver::{ResolvedVideoParams, Resolver};
pub use state::{ModalPhase, ModalState};
pub use template::{ElementTag, PlayerElement, PlayerKind};
pub use view::ModalView;
