//! # Resolver 模块
//!
//! 把三层配置合并为单个链接的完整参数集：
//!
//! ```text
//! 链接属性（非缺失、非 "null"） > 实例默认值（非 null） > 调用方回退值 > null
//! ```
//!
//! 叶子组件，不依赖控制器。

use serde::Serialize;

use crate::layout::Viewport;
use crate::link::{LinkAttributes, UNSET_MARKER, VideoParam};
use crate::options::{ModalOptions, ParamValue};
use crate::provider::Provider;

/// 取三层中第一个存在的值
pub fn first_present<T>(link: Option<T>, instance: Option<T>, fallback: Option<T>) -> Option<T> {
    link.or(instance).or(fallback)
}

/// 按 `parseInt` 的规则把值转为整数文本
///
/// 取可选符号加前导数字；没有数字前缀时原样返回，不做校验。
pub fn cast_int(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Some(value);
    }
    let digits = digits.trim_start_matches('0');
    Some(match digits {
        "" => "0".to_string(),
        digits => format!("{sign}{digits}"),
    })
}

/// 一次打开所需的完整参数集
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVideoParams {
    pub provider: Provider,
    pub id: Option<String>,
    pub width: String,
    pub height: String,
    pub autoplay: Option<String>,
    pub rel: Option<String>,
    pub controls: Option<String>,
    pub showinfo: Option<String>,
    pub allowfullscreen: Option<String>,
    pub theme: Option<String>,
    pub title: Option<String>,
    pub byline: Option<String>,
    pub portrait: Option<String>,
    #[serde(rename = "loop")]
    pub loop_: Option<String>,
    pub muted: Option<String>,
    pub poster: Option<String>,
    pub preload: Option<String>,
    pub mp4: Option<String>,
    pub ogg: Option<String>,
    pub webm: Option<String>,
}

/// 配置解析器
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    options: &'a ModalOptions,
}

impl<'a> Resolver<'a> {
    pub fn new(options: &'a ModalOptions) -> Self {
        Self { options }
    }

    /// 解析单个参数
    ///
    /// 返回值统一为文本，数字类参数由调用方转换（见 [`cast_int`]）。
    pub fn resolve_parameter(
        &self,
        link: &LinkAttributes,
        param: VideoParam,
        fallback: Option<ParamValue>,
    ) -> Option<String> {
        let link_value = link
            .param(param)
            .filter(|value| *value != UNSET_MARKER)
            .map(str::to_string);
        let instance = self.options.videos.get(param).map(ToString::to_string);
        first_present(link_value, instance, fallback.map(|v| v.to_string()))
    }

    /// 解析 Provider
    ///
    /// 空属性同样视为未设置；实例默认值也为 null 时回落到 `media`。
    pub fn resolve_provider(&self, link: &LinkAttributes) -> Provider {
        let link_value = link
            .param(VideoParam::Provider)
            .filter(|value| !value.is_empty() && *value != UNSET_MARKER)
            .map(str::to_string);
        let instance = self
            .options
            .videos
            .get(VideoParam::Provider)
            .map(ToString::to_string);
        match first_present(link_value, instance, None) {
            Some(tag) => Provider::from(tag),
            None => Provider::Media,
        }
    }

    /// 解析打开某个链接所需的全部参数
    pub fn resolve(&self, link: &LinkAttributes, viewport: Viewport) -> ResolvedVideoParams {
        let provider = self.resolve_provider(link);
        let get = |param| self.resolve_parameter(link, param, None);
        let int = |param| cast_int(get(param));

        let id = self.resolve_parameter(
            link,
            VideoParam::Id,
            provider.default_id().map(ParamValue::text),
        );
        let width = self
            .resolve_parameter(
                link,
                VideoParam::Width,
                Some(ParamValue::Float(viewport.fallback_width())),
            )
            .unwrap_or_default();
        let height = self
            .resolve_parameter(
                link,
                VideoParam::Height,
                Some(ParamValue::Float(viewport.fallback_height())),
            )
            .unwrap_or_default();

        ResolvedVideoParams {
            id,
            width,
            height,
            autoplay: int(VideoParam::Autoplay),
            rel: get(VideoParam::Rel),
            controls: int(VideoParam::Controls),
            showinfo: int(VideoParam::Showinfo),
            allowfullscreen: get(VideoParam::Allowfullscreen),
            theme: self.resolve_parameter(link, VideoParam::Theme, Some(ParamValue::text("dark"))),
            title: get(VideoParam::Title),
            byline: get(VideoParam::Byline),
            portrait: get(VideoParam::Portrait),
            loop_: get(VideoParam::Loop),
            muted: int(VideoParam::Muted),
            poster: get(VideoParam::Poster),
            preload: get(VideoParam::Preload),
            mp4: get(VideoParam::Mp4),
            ogg: get(VideoParam::Ogg),
            webm: get(VideoParam::Webm),
            provider,
        }
    }

    /// 为导航链接复制参数属性
    ///
    /// 链接上有的属性原样复制，否则写入实例默认值；
    /// 默认值为 null 时写入 `"null"`，下次解析时仍视为未设置。
    pub fn clone_attributes(&self, link: &LinkAttributes) -> LinkAttributes {
        let mut cloned = LinkAttributes::new();
        if let Some(order) = link.order() {
            cloned.set_order(order);
        }
        for param in VideoParam::ALL {
            let value = match link.param(param) {
                Some(value) => value.to_string(),
                None => self
                    .options
                    .videos
                    .get(param)
                    .map(ToString::to_string)
                    .unwrap_or_else(|| UNSET_MARKER.to_string()),
            };
            cloned.set_param(param, value);
        }
        cloned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(params: &[(VideoParam, &str)]) -> LinkAttributes {
        LinkAttributes::from_params(params.iter().copied())
    }

    #[test]
    fn test_first_present() {
        assert_eq!(first_present(Some(1), Some(2), Some(3)), Some(1));
        assert_eq!(first_present(None, Some(2), Some(3)), Some(2));
        assert_eq!(first_present(None, None, Some(3)), Some(3));
        assert_eq!(first_present::<i32>(None, None, None), None);
    }

    #[test]
    fn test_link_value_wins() {
        let options = ModalOptions::default();
        let resolver = Resolver::new(&options);
        let attrs = link(&[(VideoParam::Autoplay, "1"), (VideoParam::Poster, "")]);

        assert_eq!(
            resolver.resolve_parameter(&attrs, VideoParam::Autoplay, Some(ParamValue::Int(9))),
            Some("1".to_string())
        );
        // 空字符串也是有效的链接值
        assert_eq!(
            resolver.resolve_parameter(&attrs, VideoParam::Poster, None),
            Some(String::new())
        );
    }

    #[test]
    fn test_null_marker_falls_through() {
        let options = ModalOptions::default();
        let resolver = Resolver::new(&options);
        let attrs = link(&[(VideoParam::Autoplay, "null"), (VideoParam::Id, "null")]);

        assert_eq!(
            resolver.resolve_parameter(&attrs, VideoParam::Autoplay, None),
            Some("0".to_string())
        );
        assert_eq!(
            resolver.resolve_parameter(&attrs, VideoParam::Id, Some(ParamValue::text("abc"))),
            Some("abc".to_string())
        );
        assert_eq!(resolver.resolve_parameter(&attrs, VideoParam::Id, None), None);
    }

    #[test]
    fn test_instance_default_over_fallback() {
        let mut options = ModalOptions::default();
        options.videos.id = Some(ParamValue::text("instance-id"));
        let resolver = Resolver::new(&options);

        assert_eq!(
            resolver.resolve_parameter(
                &LinkAttributes::new(),
                VideoParam::Id,
                Some(ParamValue::text("fallback"))
            ),
            Some("instance-id".to_string())
        );
    }

    #[test]
    fn test_resolve_provider() {
        let mut options = ModalOptions::default();
        let resolver = Resolver::new(&options);
        assert_eq!(
            resolver.resolve_provider(&link(&[(VideoParam::Provider, "vimeo")])),
            Provider::Vimeo
        );
        assert_eq!(
            resolver.resolve_provider(&link(&[(VideoParam::Provider, "")])),
            Provider::Media
        );

        options.videos.provider = Some(ParamValue::text("dailymotion"));
        let resolver = Resolver::new(&options);
        assert_eq!(
            resolver.resolve_provider(&LinkAttributes::new()),
            Provider::Dailymotion
        );

        options.videos.provider = None;
        let resolver = Resolver::new(&options);
        assert_eq!(resolver.resolve_provider(&LinkAttributes::new()), Provider::Media);
    }

    #[test]
    fn test_cast_int() {
        assert_eq!(cast_int(Some("1".to_string())), Some("1".to_string()));
        assert_eq!(cast_int(Some(" 007".to_string())), Some("7".to_string()));
        assert_eq!(cast_int(Some("1.9".to_string())), Some("1".to_string()));
        assert_eq!(cast_int(Some("-0".to_string())), Some("0".to_string()));
        assert_eq!(cast_int(Some("-3px".to_string())), Some("-3".to_string()));
        assert_eq!(cast_int(Some("true".to_string())), Some("true".to_string()));
        assert_eq!(cast_int(None), None);
    }

    #[test]
    fn test_resolve_youtube_defaults() {
        let options = ModalOptions::default();
        let resolver = Resolver::new(&options);
        let params = resolver.resolve(
            &link(&[(VideoParam::Provider, "youtube")]),
            Viewport::new(1000.0, 500.0),
        );

        assert_eq!(params.provider, Provider::YouTube);
        assert_eq!(params.id.as_deref(), Some("Q5fftru-t-g"));
        assert_eq!(params.width, "700");
        assert_eq!(params.height, "350");
        assert_eq!(params.autoplay.as_deref(), Some("0"));
        assert_eq!(params.theme.as_deref(), Some("dark"));
        assert_eq!(params.title.as_deref(), Some("true"));
        assert_eq!(params.muted.as_deref(), Some("1"));
        assert_eq!(params.mp4, None);
    }

    #[test]
    fn test_resolve_casts_numeric_link_values() {
        let options = ModalOptions::default();
        let resolver = Resolver::new(&options);
        let params = resolver.resolve(
            &link(&[(VideoParam::Controls, "01"), (VideoParam::Rel, "01")]),
            Viewport::new(1000.0, 500.0),
        );
        assert_eq!(params.controls.as_deref(), Some("1"));
        // rel 不是数字参数，原样保留
        assert_eq!(params.rel.as_deref(), Some("01"));
    }

    #[test]
    fn test_clone_attributes() {
        let options = ModalOptions::default();
        let resolver = Resolver::new(&options);
        let mut source = link(&[(VideoParam::Provider, "vimeo"), (VideoParam::Id, "42")]);
        source.set_order(2);

        let cloned = resolver.clone_attributes(&source);
        assert_eq!(cloned.order(), Some(2));
        assert_eq!(cloned.param(VideoParam::Provider), Some("vimeo"));
        assert_eq!(cloned.param(VideoParam::Id), Some("42"));
        assert_eq!(cloned.param(VideoParam::Autoplay), Some("0"));
        assert_eq!(cloned.param(VideoParam::Mp4), Some("null"));
        assert_eq!(cloned.len(), VideoParam::ALL.len() + 1);

        // 复制结果再次解析，得到相同的参数
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(
            resolver.resolve(&cloned, viewport),
            resolver.resolve(&source, viewport)
        );
    }
}
