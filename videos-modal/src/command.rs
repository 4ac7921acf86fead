//! # Command 模块
//!
//! 定义控制器向 Host 发出的所有指令。
//! Command 是控制器修改弹窗 DOM 的**唯一方式**。
//!
//! ## 设计原则
//!
//! - **声明式**：Command 描述"做什么"，不描述"怎么做"
//! - **有序**：Host 必须按顺序执行，同意网关的激活必须在占位容器插入之后
//! - **DOM 无关**：不包含任何 `web-sys` 类型

use serde::{Deserialize, Serialize};

use crate::link::LinkAttributes;
use crate::provider::Provider;
use crate::template::PlayerElement;

/// 弹窗根节点 id
pub const MODAL_ID: &str = "videos-modal";

/// 背景层 id
pub const BACKGROUND_ID: &str = "videos-modal-background";

/// 关闭图标 id（内置图标自带）
pub const CLOSE_ICON_ID: &str = "videos-modal-close";

/// "上一个"链接 id
pub const PREV_LINK_ID: &str = "videos-modal-prev-link";

/// "下一个"链接 id
pub const NEXT_LINK_ID: &str = "videos-modal-next-link";

/// 弹窗打开时根节点上的类名
pub const OPENED_CLASS: &str = "opened";

/// 启用 only-landscape 时根节点上的类名
pub const ONLY_LANDSCAPE_CLASS: &str = "only-landscape";

/// 导航方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    /// 固定 id
    pub fn element_id(self) -> &'static str {
        match self {
            Direction::Prev => PREV_LINK_ID,
            Direction::Next => NEXT_LINK_ID,
        }
    }
}

/// 上一个/下一个导航链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLink {
    pub direction: Direction,
    /// 插入在链接开头的图标
    pub icon: Option<String>,
    /// 从相邻触发链接复制的参数属性
    pub attributes: LinkAttributes,
}

impl NavigationLink {
    pub fn id(&self) -> &'static str {
        self.direction.element_id()
    }
}

/// 控制器向 Host 发出的指令
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalCommand {
    /// 创建（或复用）`#videos-modal` 根节点并挂到 body 末尾
    ///
    /// 依次插入关闭图标、加载图标与 `#videos-modal-background`。
    /// Host 在开关开启时为关闭图标和背景层绑定点击监听。
    MountContainer {
        close_icon: Option<String>,
        loader_icon: Option<String>,
        only_landscape: bool,
        close_by_icon: bool,
        close_on_click: bool,
    },

    /// 为第 `index` 个触发链接绑定点击监听
    BindLink { index: usize },

    /// 移除第 `index` 个触发链接的点击监听
    UnbindLink { index: usize },

    /// 写入 `data-videos-modal-order`
    SetLinkOrder { index: usize, order: usize },

    /// 根节点加上 `opened`
    ShowModal,

    /// 根节点移除 `opened`
    HideModal,

    /// 插入可播放元素
    InsertPlayer(PlayerElement),

    /// 移除所有 `.videos_player` 元素
    RemovePlayer,

    /// 插入上一个/下一个链接
    InsertNavigation {
        prev: NavigationLink,
        next: NavigationLink,
    },

    /// 改写已有导航链接的参数属性（不替换节点）
    UpdateNavigation {
        prev: LinkAttributes,
        next: LinkAttributes,
    },

    /// 移除导航链接
    RemoveNavigation,

    /// 让同意网关激活该 Provider 的嵌入脚本
    ActivateConsent { provider: Provider },

    /// 打开同意网关面板
    OpenConsentPanel,
}
