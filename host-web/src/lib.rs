//! # Host Web
//!
//! 浏览器宿主：监听 DOM 事件，转交 `videos-modal` 控制器，
//! 再把返回的指令按顺序落到真实 DOM 上。
//!
//! ```text
//! DOM 事件 ──► ModalInput ──► VideosModal::handle ──► Vec<ModalCommand> ──► DomHost
//! ```
//!
//! 页面脚本使用方式：
//!
//! ```js
//! const modal = new VideosModal({ links: '.videos-modal-link', tarteAuCitron: tarteaucitron });
//! modal.reset();
//! ```
//!
//! 非 wasm32 目标只编译 [`events`]。

pub mod events;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod gate;

#[cfg(target_arch = "wasm32")]
pub use app::WebVideosModal;
