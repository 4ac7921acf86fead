//! # Options 模块
//!
//! 实例配置：内置默认值与用户覆盖值的合并结果。
//!
//! ## 配置优先级
//!
//! 1. 链接上的 `data-videos-modal-*` 属性（最高，见 [`crate::resolver`]）
//! 2. 实例配置 `videos_*`
//! 3. Provider 专属的硬编码默认值（最低）
//!
//! 配置以 JSON 形式给出，未识别的键直接忽略。构造后不可变，只能整体重置。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::OptionsError;
use crate::icons::{DEFAULT_CLOSE_ICON, DEFAULT_LEFT_ARROW, DEFAULT_LOADER_ICON, DEFAULT_RIGHT_ARROW};
use crate::link::VideoParam;

/// 默认的触发链接选择器
pub const DEFAULT_LINKS_SELECTOR: &str = ".videos-modal-link";

/// 配置中的参数值
///
/// 配置对象里的值可能是布尔、整数、浮点或字符串，
/// 写入属性或 URL 时统一按 [`fmt::Display`] 转为文本。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Float(n) => write!(f, "{n}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// 视频参数的实例默认值（`videos_*`）
///
/// `None` 表示 null：解析时继续回退到调用方给出的默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDefaults {
    #[serde(rename = "videos_provider", default = "default_provider")]
    pub provider: Option<ParamValue>,
    #[serde(rename = "videos_id", default)]
    pub id: Option<ParamValue>,
    #[serde(rename = "videos_width", default)]
    pub width: Option<ParamValue>,
    #[serde(rename = "videos_height", default)]
    pub height: Option<ParamValue>,
    #[serde(rename = "videos_autoplay", default = "default_zero")]
    pub autoplay: Option<ParamValue>,
    #[serde(rename = "videos_rel", default = "default_zero")]
    pub rel: Option<ParamValue>,
    #[serde(rename = "videos_controls", default = "default_zero")]
    pub controls: Option<ParamValue>,
    #[serde(rename = "videos_showinfo", default = "default_zero")]
    pub showinfo: Option<ParamValue>,
    #[serde(rename = "videos_allowfullscreen", default = "default_zero")]
    pub allowfullscreen: Option<ParamValue>,
    #[serde(rename = "videos_theme", default = "default_theme")]
    pub theme: Option<ParamValue>,
    #[serde(rename = "videos_title", default = "default_true_value")]
    pub title: Option<ParamValue>,
    #[serde(rename = "videos_byline", default = "default_true_value")]
    pub byline: Option<ParamValue>,
    #[serde(rename = "videos_portrait", default = "default_true_value")]
    pub portrait: Option<ParamValue>,
    #[serde(rename = "videos_loop", default = "default_zero")]
    pub loop_: Option<ParamValue>,
    #[serde(rename = "videos_muted", default = "default_one")]
    pub muted: Option<ParamValue>,
    #[serde(rename = "videos_poster", default = "default_poster")]
    pub poster: Option<ParamValue>,
    #[serde(rename = "videos_preload", default = "default_preload")]
    pub preload: Option<ParamValue>,
    #[serde(rename = "videos_mp4", default)]
    pub mp4: Option<ParamValue>,
    #[serde(rename = "videos_ogg", default)]
    pub ogg: Option<ParamValue>,
    #[serde(rename = "videos_webm", default)]
    pub webm: Option<ParamValue>,
}

impl VideoDefaults {
    /// 读取某个参数的实例默认值
    pub fn get(&self, param: VideoParam) -> Option<&ParamValue> {
        let value = match param {
            VideoParam::Provider => &self.provider,
            VideoParam::Id => &self.id,
            VideoParam::Width => &self.width,
            VideoParam::Height => &self.height,
            VideoParam::Autoplay => &self.autoplay,
            VideoParam::Rel => &self.rel,
            VideoParam::Controls => &self.controls,
            VideoParam::Showinfo => &self.showinfo,
            VideoParam::Allowfullscreen => &self.allowfullscreen,
            VideoParam::Theme => &self.theme,
            VideoParam::Title => &self.title,
            VideoParam::Byline => &self.byline,
            VideoParam::Portrait => &self.portrait,
            VideoParam::Loop => &self.loop_,
            VideoParam::Muted => &self.muted,
            VideoParam::Poster => &self.poster,
            VideoParam::Preload => &self.preload,
            VideoParam::Mp4 => &self.mp4,
            VideoParam::Ogg => &self.ogg,
            VideoParam::Webm => &self.webm,
        };
        value.as_ref()
    }
}

impl Default for VideoDefaults {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            id: None,
            width: None,
            height: None,
            autoplay: default_zero(),
            rel: default_zero(),
            controls: default_zero(),
            showinfo: default_zero(),
            allowfullscreen: default_zero(),
            theme: default_theme(),
            title: default_true_value(),
            byline: default_true_value(),
            portrait: default_true_value(),
            loop_: default_zero(),
            muted: default_one(),
            poster: default_poster(),
            preload: default_preload(),
            mp4: None,
            ogg: None,
            webm: None,
        }
    }
}

/// 实例配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalOptions {
    /// 点击背景层关闭弹窗
    #[serde(default = "default_true")]
    pub close_on_click: bool,

    /// Escape 键关闭弹窗
    #[serde(default = "default_true")]
    pub close_with_escape: bool,

    /// 显示关闭图标
    #[serde(default = "default_true")]
    pub close_by_icon: bool,

    /// 自定义关闭图标（HTML）
    #[serde(default)]
    pub close_icon: Option<String>,

    /// 嵌入加载期间显示加载图标
    #[serde(default = "default_true")]
    pub loading: bool,

    /// 自定义加载图标（HTML）
    #[serde(default)]
    pub loader_icon: Option<String>,

    /// 生成上一个/下一个链接并启用方向键导航
    #[serde(default = "default_true")]
    pub navigate: bool,

    /// 自定义"上一个"箭头（HTML）
    #[serde(default)]
    pub left_arrow: Option<String>,

    /// 自定义"下一个"箭头（HTML）
    #[serde(default)]
    pub right_arrow: Option<String>,

    /// 竖屏时强制横向比例并重新居中
    #[serde(default = "default_true")]
    pub only_landscape: bool,

    /// 触发链接的 CSS 选择器
    #[serde(default = "default_links_selector")]
    pub links: String,

    /// 视频参数默认值
    #[serde(flatten)]
    pub videos: VideoDefaults,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            close_on_click: true,
            close_with_escape: true,
            close_by_icon: true,
            close_icon: None,
            loading: true,
            loader_icon: None,
            navigate: true,
            left_arrow: None,
            right_arrow: None,
            only_landscape: true,
            links: default_links_selector(),
            videos: VideoDefaults::default(),
        }
    }
}

impl ModalOptions {
    /// 从 JSON 解析配置，缺省的键使用内置默认值
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json).map_err(|e| OptionsError::Parse {
            message: e.to_string(),
        })?;
        options.validate()?;
        Ok(options)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.links.trim().is_empty() {
            return Err(OptionsError::Validation {
                message: "links 选择器不能为空".to_string(),
            });
        }
        Ok(())
    }

    /// 关闭图标：开关关闭时为 `None`
    pub fn close_icon(&self) -> Option<&str> {
        icon_or_default(self.close_by_icon, &self.close_icon, DEFAULT_CLOSE_ICON)
    }

    /// 加载图标：开关关闭时为 `None`
    pub fn loader_icon(&self) -> Option<&str> {
        icon_or_default(self.loading, &self.loader_icon, DEFAULT_LOADER_ICON)
    }

    /// "上一个"箭头：未启用导航时为 `None`
    pub fn left_arrow(&self) -> Option<&str> {
        icon_or_default(self.navigate, &self.left_arrow, DEFAULT_LEFT_ARROW)
    }

    /// "下一个"箭头：未启用导航时为 `None`
    pub fn right_arrow(&self) -> Option<&str> {
        icon_or_default(self.navigate, &self.right_arrow, DEFAULT_RIGHT_ARROW)
    }
}

fn icon_or_default<'a>(
    enabled: bool,
    custom: &'a Option<String>,
    default: &'static str,
) -> Option<&'a str> {
    if !enabled {
        return None;
    }
    Some(custom.as_deref().unwrap_or(default))
}

// 默认值函数
fn default_true() -> bool {
    true
}

fn default_links_selector() -> String {
    DEFAULT_LINKS_SELECTOR.to_string()
}

fn default_provider() -> Option<ParamValue> {
    Some(ParamValue::text("media"))
}

fn default_zero() -> Option<ParamValue> {
    Some(ParamValue::Int(0))
}

fn default_one() -> Option<ParamValue> {
    Some(ParamValue::Int(1))
}

fn default_true_value() -> Option<ParamValue> {
    Some(ParamValue::Bool(true))
}

fn default_theme() -> Option<ParamValue> {
    Some(ParamValue::text("dark"))
}

fn default_poster() -> Option<ParamValue> {
    Some(ParamValue::text(""))
}

fn default_preload() -> Option<ParamValue> {
    Some(ParamValue::text("auto"))
}
