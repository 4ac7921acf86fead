//! # Link 模块
//!
//! 触发链接及其 `data-videos-modal-*` 属性。
//!
//! ## 设计说明
//!
//! - Core 不持有 DOM 节点，只持有 Host 在注册时读取的属性快照
//! - 参数集合是封闭的，见 [`VideoParam`]
//! - `data-videos-modal-order` 由系统写入，调用方不应设置

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 属性名前缀
pub const ATTRIBUTE_PREFIX: &str = "data-videos-modal-";

/// 导航顺序属性名
pub const ORDER_ATTRIBUTE: &str = "data-videos-modal-order";

/// "未设置"标记
///
/// 链接属性值为该字面量时视为未设置。
pub const UNSET_MARKER: &str = "null";

/// 单个链接可配置的视频参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoParam {
    Provider,
    Id,
    Width,
    Height,
    Autoplay,
    Rel,
    Controls,
    Showinfo,
    Allowfullscreen,
    Theme,
    Title,
    Byline,
    Portrait,
    Loop,
    Muted,
    Poster,
    Preload,
    Mp4,
    Ogg,
    Webm,
}

impl VideoParam {
    /// 全部参数，顺序即导航链接复制属性的顺序
    pub const ALL: [VideoParam; 20] = [
        VideoParam::Id,
        VideoParam::Provider,
        VideoParam::Width,
        VideoParam::Height,
        VideoParam::Autoplay,
        VideoParam::Rel,
        VideoParam::Controls,
        VideoParam::Showinfo,
        VideoParam::Allowfullscreen,
        VideoParam::Theme,
        VideoParam::Title,
        VideoParam::Byline,
        VideoParam::Portrait,
        VideoParam::Loop,
        VideoParam::Muted,
        VideoParam::Poster,
        VideoParam::Preload,
        VideoParam::Mp4,
        VideoParam::Ogg,
        VideoParam::Webm,
    ];

    /// 参数名（属性与配置键共用的后缀）
    pub fn name(self) -> &'static str {
        match self {
            VideoParam::Provider => "provider",
            VideoParam::Id => "id",
            VideoParam::Width => "width",
            VideoParam::Height => "height",
            VideoParam::Autoplay => "autoplay",
            VideoParam::Rel => "rel",
            VideoParam::Controls => "controls",
            VideoParam::Showinfo => "showinfo",
            VideoParam::Allowfullscreen => "allowfullscreen",
            VideoParam::Theme => "theme",
            VideoParam::Title => "title",
            VideoParam::Byline => "byline",
            VideoParam::Portrait => "portrait",
            VideoParam::Loop => "loop",
            VideoParam::Muted => "muted",
            VideoParam::Poster => "poster",
            VideoParam::Preload => "preload",
            VideoParam::Mp4 => "mp4",
            VideoParam::Ogg => "ogg",
            VideoParam::Webm => "webm",
        }
    }

    /// 链接上的属性名，如 `data-videos-modal-autoplay`
    pub fn attribute_name(self) -> String {
        format!("{ATTRIBUTE_PREFIX}{}", self.name())
    }

    /// 实例配置中的键名，如 `videos_autoplay`
    pub fn option_key(self) -> String {
        format!("videos_{}", self.name())
    }

    /// 需要由调用方转换为整数的参数
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            VideoParam::Autoplay | VideoParam::Controls | VideoParam::Showinfo | VideoParam::Muted
        )
    }
}

impl fmt::Display for VideoParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 触发链接的属性快照
///
/// Key 为完整属性名（`data-videos-modal-*`），Value 为属性原始字符串。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkAttributes {
    attributes: BTreeMap<String, String>,
}

impl LinkAttributes {
    /// 创建空的属性集
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 `(参数, 值)` 列表构建
    pub fn from_params<'a>(params: impl IntoIterator<Item = (VideoParam, &'a str)>) -> Self {
        let mut attrs = Self::new();
        for (param, value) in params {
            attrs.set_param(param, value);
        }
        attrs
    }

    /// 读取任意属性
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).map(String::as_str)
    }

    /// 写入任意属性
    ///
    /// 只接受 `data-videos-modal-*` 属性，其他属性与本系统无关，直接忽略。
    pub fn set(&mut self, attribute: impl Into<String>, value: impl Into<String>) {
        let attribute = attribute.into();
        if attribute.starts_with(ATTRIBUTE_PREFIX) {
            self.attributes.insert(attribute, value.into());
        }
    }

    /// 读取参数属性
    pub fn param(&self, param: VideoParam) -> Option<&str> {
        self.get(&param.attribute_name())
    }

    /// 写入参数属性
    pub fn set_param(&mut self, param: VideoParam, value: impl Into<String>) {
        self.set(param.attribute_name(), value);
    }

    /// 读取导航顺序
    pub fn order(&self) -> Option<usize> {
        self.get(ORDER_ATTRIBUTE)?.trim().parse().ok()
    }

    /// 写入导航顺序
    pub fn set_order(&mut self, order: usize) {
        self.set(ORDER_ATTRIBUTE, order.to_string());
    }

    /// 按属性名顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LinkAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}
