//! # Template 模块
//!
//! 由已解析参数构造可播放元素的声明式描述。
//!
//! ## 设计说明
//!
//! - 每种 Provider 一个纯函数构造嵌入地址，互不共享可变状态
//! - [`PlayerElement`] 只描述"要创建什么"，由 Host 创建真实节点
//! - 三种元素：嵌入框架（`iframe`）、同意网关占位容器（`div`）、原生播放器（`video`）

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::layout::{PlayerSize, Viewport, fit_player};
use crate::link::UNSET_MARKER;
use crate::provider::Provider;
use crate::resolver::{ResolvedVideoParams, cast_int};

/// 每个可播放元素都带的类名
pub const PLAYER_CLASS: &str = "videos_player";

const YOUTUBE_EMBED: &str = "//www.youtube-nocookie.com/embed";
const DAILYMOTION_EMBED: &str = "//www.dailymotion.com/embed/video";
const VIMEO_PLAYER: &str = "//player.vimeo.com/video";

/// id 编码时保留 RFC 3986 的非保留字符
const ID_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// 元素标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementTag {
    Iframe,
    Div,
    Video,
}

impl ElementTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementTag::Iframe => "iframe",
            ElementTag::Div => "div",
            ElementTag::Video => "video",
        }
    }
}

/// 要构造的元素种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    /// 直接嵌入的框架
    Frame,
    /// 交给同意网关脚本激活的占位容器
    ConsentPlaceholder,
    /// 本地媒体的原生播放器
    Native,
}

impl PlayerKind {
    /// 同意网关只接管受支持的流媒体 Provider
    pub fn for_provider(provider: &Provider, gate_configured: bool) -> Self {
        if provider.is_media() {
            PlayerKind::Native
        } else if gate_configured && provider.is_supported() {
            PlayerKind::ConsentPlaceholder
        } else {
            PlayerKind::Frame
        }
    }
}

/// 原生播放器的布尔属性
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFlags {
    pub controls: bool,
    #[serde(rename = "loop")]
    pub loop_: bool,
    pub autoplay: bool,
    pub muted: bool,
}

/// 原生播放器的 `<source>` 子节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    /// MIME 类型，如 `video/mp4`
    pub mime: String,
    pub src: String,
}

/// 可播放元素描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerElement {
    pub tag: ElementTag,
    pub classes: Vec<String>,
    /// 按写入顺序排列的属性
    pub attributes: Vec<(String, String)>,
    /// 仅原生播放器使用
    pub flags: Option<MediaFlags>,
    pub sources: Vec<MediaSource>,
    /// 上边距（px）
    pub margin_top: Option<i64>,
}

impl PlayerElement {
    fn new(tag: ElementTag) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attributes: Vec::new(),
            flags: None,
            sources: Vec::new(),
            margin_top: None,
        }
    }

    fn attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    /// 读取属性
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// `style` 属性值
    pub fn style(&self) -> Option<String> {
        self.margin_top.map(|px| format!("margin-top: {px}px;"))
    }

    /// 渲染为 HTML
    pub fn to_html(&self) -> String {
        let mut html = format!("<{}", self.tag.as_str());
        if !self.classes.is_empty() {
            let _ = write!(html, " class=\"{}\"", escape_attr(&self.classes.join(" ")));
        }
        for (name, value) in &self.attributes {
            let _ = write!(html, " {}=\"{}\"", name, escape_attr(value));
        }
        if let Some(flags) = self.flags {
            for (name, on) in [
                ("controls", flags.controls),
                ("loop", flags.loop_),
                ("autoplay", flags.autoplay),
                ("muted", flags.muted),
            ] {
                if on {
                    let _ = write!(html, " {name}");
                }
            }
        }
        if let Some(style) = self.style() {
            let _ = write!(html, " style=\"{style}\"");
        }
        html.push('>');
        for source in &self.sources {
            let _ = write!(
                html,
                "<source type=\"{}\" src=\"{}\">",
                escape_attr(&source.mime),
                escape_attr(&source.src)
            );
        }
        let _ = write!(html, "</{}>", self.tag.as_str());
        html
    }
}

/// 属性值转义
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// null 写入属性或 URL 时的文本
fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNSET_MARKER)
}

fn encoded_id(params: &ResolvedVideoParams) -> String {
    utf8_percent_encode(text(&params.id), ID_ENCODE_SET).to_string()
}

/// YouTube 主题只接受 `dark` / `light`
pub fn youtube_theme(theme: Option<&str>) -> &str {
    match theme {
        Some(theme @ ("dark" | "light")) => theme,
        _ => "dark",
    }
}

/// `…/embed/<id>?autoplay&loop&controls&rel&showinfo&theme`
pub fn youtube_src(params: &ResolvedVideoParams) -> String {
    format!(
        "{YOUTUBE_EMBED}/{}?autoplay={}&loop={}&controls={}&rel={}&showinfo={}&theme={}",
        encoded_id(params),
        text(&params.autoplay),
        text(&params.loop_),
        text(&params.controls),
        text(&params.rel),
        text(&params.showinfo),
        youtube_theme(params.theme.as_deref()),
    )
}

/// `…/embed/videoseries?list=<id>&autoplay&loop&controls&rel&showinfo`
pub fn youtube_playlist_src(params: &ResolvedVideoParams) -> String {
    format!(
        "{YOUTUBE_EMBED}/videoseries?list={}&autoplay={}&loop={}&controls={}&rel={}&showinfo={}",
        encoded_id(params),
        text(&params.autoplay),
        text(&params.loop_),
        text(&params.controls),
        text(&params.rel),
        text(&params.showinfo),
    )
}

/// `…/embed/video/<id>?info&autoPlay`
pub fn dailymotion_src(params: &ResolvedVideoParams) -> String {
    format!(
        "{DAILYMOTION_EMBED}/{}?info={}&autoPlay={}",
        encoded_id(params),
        text(&params.showinfo),
        text(&params.autoplay),
    )
}

/// `…/video/<id>?autoplay&title&byline&portrait&loop`
pub fn vimeo_src(params: &ResolvedVideoParams) -> String {
    format!(
        "{VIMEO_PLAYER}/{}?autoplay={}&title={}&byline={}&portrait={}&loop={}",
        encoded_id(params),
        text(&params.autoplay),
        text(&params.title),
        text(&params.byline),
        text(&params.portrait),
        text(&params.loop_),
    )
}

/// 按 Provider 构造来源地址
///
/// 其他标签（包括 `media`）直接把 id 当作来源引用。
pub fn source_url(params: &ResolvedVideoParams) -> String {
    match params.provider {
        Provider::YouTube => youtube_src(params),
        Provider::YouTubePlaylist => youtube_playlist_src(params),
        Provider::Dailymotion => dailymotion_src(params),
        Provider::Vimeo => vimeo_src(params),
        Provider::Media | Provider::Other(_) => params.id.clone().unwrap_or_default(),
    }
}

fn frame(params: &ResolvedVideoParams) -> PlayerElement {
    let mut player = PlayerElement::new(ElementTag::Iframe);
    player.attr("src", source_url(params));
    player.attr("frameborder", "0");
    player.attr("allowfullscreen", text(&params.allowfullscreen));
    player
}

fn consent_placeholder(params: &ResolvedVideoParams) -> PlayerElement {
    let provider = &params.provider;
    let mut player = PlayerElement::new(ElementTag::Div);
    player.classes.push(provider.player_class());
    player.attr(provider.id_attribute(), text(&params.id));
    player.attr("rel", text(&params.rel));
    player.attr("controls", text(&params.controls));
    player.attr("showinfo", text(&params.showinfo));
    player.attr("autoplay", text(&params.autoplay));
    match provider {
        Provider::Vimeo => {
            player.attr("title", text(&params.title));
            player.attr("loop", text(&params.loop_));
            player.attr("byline", text(&params.byline));
            player.attr("portrait", text(&params.portrait));
        }
        Provider::YouTube => {
            player.attr("theme", youtube_theme(params.theme.as_deref()));
        }
        _ => {}
    }
    player.attr("allowfullscreen", text(&params.allowfullscreen));
    player
}

/// 数字或布尔文本是否为真
fn is_on(value: &Option<String>) -> bool {
    let Some(value) = value.as_deref() else {
        return false;
    };
    match cast_int(Some(value.to_string())).and_then(|v| v.parse::<i64>().ok()) {
        Some(n) => n != 0,
        None => !matches!(value.trim(), "" | "false" | UNSET_MARKER),
    }
}

fn native(params: &ResolvedVideoParams) -> PlayerElement {
    let mut player = PlayerElement::new(ElementTag::Video);
    player.flags = Some(MediaFlags {
        controls: is_on(&params.controls),
        loop_: is_on(&params.loop_),
        autoplay: is_on(&params.autoplay),
        muted: is_on(&params.muted),
    });
    player.attr("poster", text(&params.poster));
    player.attr("preload", text(&params.preload));
    if let Some(id) = &params.id {
        player.attr("src", id.clone());
    }
    for (mime, src) in [
        ("video/mp4", &params.mp4),
        ("video/ogg", &params.ogg),
        ("video/webm", &params.webm),
    ] {
        if let Some(src) = src.as_deref().filter(|src| *src != UNSET_MARKER) {
            player.sources.push(MediaSource {
                mime: mime.to_string(),
                src: src.to_string(),
            });
        }
    }
    player
}

/// 构造可播放元素并设置尺寸
pub fn build_player(
    params: &ResolvedVideoParams,
    kind: PlayerKind,
    viewport: Viewport,
    only_landscape: bool,
) -> PlayerElement {
    let mut player = match kind {
        PlayerKind::Frame => frame(params),
        PlayerKind::ConsentPlaceholder => consent_placeholder(params),
        PlayerKind::Native => native(params),
    };

    let PlayerSize {
        width,
        height,
        margin_top,
    } = fit_player(&params.width, &params.height, viewport, only_landscape);
    player.attr("width", width);
    player.attr("height", height);
    player.classes.push(PLAYER_CLASS.to_string());
    player.margin_top = margin_top;
    player
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{LinkAttributes, VideoParam};
    use crate::options::ModalOptions;
    use crate::resolver::Resolver;

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 720.0,
    };

    fn resolve(params: &[(VideoParam, &str)]) -> ResolvedVideoParams {
        let options = ModalOptions::default();
        Resolver::new(&options).resolve(&LinkAttributes::from_params(params.iter().copied()), VIEWPORT)
    }

    #[test]
    fn test_youtube_default_src() {
        let params = resolve(&[(VideoParam::Provider, "youtube")]);
        assert_eq!(
            youtube_src(&params),
            "//www.youtube-nocookie.com/embed/Q5fftru-t-g?autoplay=0&loop=0&controls=0&rel=0&showinfo=0&theme=dark"
        );
    }

    #[test]
    fn test_youtube_theme_constrained() {
        let params = resolve(&[(VideoParam::Provider, "youtube"), (VideoParam::Theme, "light")]);
        assert!(youtube_src(&params).ends_with("&theme=light"));

        let params = resolve(&[(VideoParam::Provider, "youtube"), (VideoParam::Theme, "neon")]);
        assert!(youtube_src(&params).ends_with("&theme=dark"));
    }

    #[test]
    fn test_playlist_src() {
        let params = resolve(&[
            (VideoParam::Provider, "youtubeplaylist"),
            (VideoParam::Autoplay, "1"),
        ]);
        assert_eq!(
            youtube_playlist_src(&params),
            "//www.youtube-nocookie.com/embed/videoseries?list=PLDz1o5Ur8b7V56es-ci2_HdykvZPLNU95&autoplay=1&loop=0&controls=0&rel=0&showinfo=0"
        );
    }

    #[test]
    fn test_dailymotion_src() {
        let params = resolve(&[
            (VideoParam::Provider, "dailymotion"),
            (VideoParam::Showinfo, "1"),
        ]);
        assert_eq!(
            dailymotion_src(&params),
            "//www.dailymotion.com/embed/video/xta4r?info=1&autoPlay=0"
        );
    }

    #[test]
    fn test_vimeo_src() {
        let params = resolve(&[
            (VideoParam::Provider, "vimeo"),
            (VideoParam::Id, "76979871"),
            (VideoParam::Byline, "0"),
        ]);
        assert_eq!(
            vimeo_src(&params),
            "//player.vimeo.com/video/76979871?autoplay=0&title=true&byline=0&portrait=true&loop=0"
        );
    }

    #[test]
    fn test_id_is_percent_encoded() {
        let params = resolve(&[
            (VideoParam::Provider, "youtube"),
            (VideoParam::Id, "a b&c=d"),
        ]);
        let src = youtube_src(&params);
        assert!(src.starts_with("//www.youtube-nocookie.com/embed/a%20b%26c%3Dd?"));
        assert_eq!(src.matches("autoplay=").count(), 1);
    }

    /// 查询串中某个参数出现的次数
    fn query_count(src: &str, name: &str) -> usize {
        src.matches(&format!("?{name}=")).count() + src.matches(&format!("&{name}=")).count()
    }

    #[test]
    fn test_each_provider_src_is_well_formed() {
        let cases: [(&str, fn(&ResolvedVideoParams) -> String, &[&str]); 4] = [
            (
                "youtube",
                youtube_src,
                &["autoplay", "loop", "controls", "rel", "showinfo", "theme"],
            ),
            (
                "youtubeplaylist",
                youtube_playlist_src,
                &["list", "autoplay", "loop", "controls", "rel", "showinfo"],
            ),
            ("dailymotion", dailymotion_src, &["info", "autoPlay"]),
            (
                "vimeo",
                vimeo_src,
                &["autoplay", "title", "byline", "portrait", "loop"],
            ),
        ];

        for (provider, src_for, names) in cases {
            let params = resolve(&[(VideoParam::Provider, provider), (VideoParam::Id, "a b&c=d")]);
            let src = src_for(&params);
            for name in names {
                assert_eq!(query_count(&src, name), 1, "{provider}: {name} in {src}");
            }
            assert!(src.contains("a%20b%26c%3Dd"), "{provider}: {src}");
            assert!(!src.contains("a b"), "{provider}: {src}");
            assert!(!src.contains("c=d"), "{provider}: {src}");
        }
    }

    #[test]
    fn test_player_kind() {
        assert_eq!(
            PlayerKind::for_provider(&Provider::YouTube, false),
            PlayerKind::Frame
        );
        assert_eq!(
            PlayerKind::for_provider(&Provider::YouTube, true),
            PlayerKind::ConsentPlaceholder
        );
        assert_eq!(
            PlayerKind::for_provider(&Provider::Media, true),
            PlayerKind::Native
        );
        assert_eq!(
            PlayerKind::for_provider(&Provider::Other("x".to_string()), true),
            PlayerKind::Frame
        );
    }

    #[test]
    fn test_frame_html() {
        let params = resolve(&[
            (VideoParam::Provider, "dailymotion"),
            (VideoParam::Width, "640"),
            (VideoParam::Height, "360"),
        ]);
        let player = build_player(&params, PlayerKind::Frame, VIEWPORT, true);
        insta::assert_snapshot!(
            player.to_html(),
            @r#"<iframe class="videos_player" src="//www.dailymotion.com/embed/video/xta4r?info=0&amp;autoPlay=0" frameborder="0" allowfullscreen="0" width="640" height="360" style="margin-top: 180px;"></iframe>"#
        );
    }

    #[test]
    fn test_other_provider_uses_id_as_src() {
        let params = resolve(&[
            (VideoParam::Provider, "peertube"),
            (VideoParam::Id, "https://example.org/embed/1"),
        ]);
        let player = build_player(&params, PlayerKind::Frame, VIEWPORT, true);
        assert_eq!(player.tag, ElementTag::Iframe);
        assert_eq!(player.attribute("src"), Some("https://example.org/embed/1"));
    }

    #[test]
    fn test_vimeo_placeholder() {
        let params = resolve(&[(VideoParam::Provider, "vimeo"), (VideoParam::Id, "42")]);
        let player = build_player(&params, PlayerKind::ConsentPlaceholder, VIEWPORT, true);

        assert_eq!(player.tag, ElementTag::Div);
        assert_eq!(player.classes, vec!["vimeo_player", "videos_player"]);
        assert_eq!(player.attribute("videoID"), Some("42"));
        assert_eq!(player.attribute("title"), Some("true"));
        assert_eq!(player.attribute("portrait"), Some("true"));
        assert_eq!(player.attribute("theme"), None);
        assert_eq!(player.attribute("src"), None);
    }

    #[test]
    fn test_playlist_placeholder() {
        let params = resolve(&[(VideoParam::Provider, "youtubeplaylist")]);
        let player = build_player(&params, PlayerKind::ConsentPlaceholder, VIEWPORT, true);

        assert!(player.has_class("youtube_playlist_player"));
        assert_eq!(
            player.attribute("playlistID"),
            Some("PLDz1o5Ur8b7V56es-ci2_HdykvZPLNU95")
        );
        assert_eq!(player.attribute("videoID"), None);
    }

    #[test]
    fn test_native_player() {
        let params = resolve(&[
            (VideoParam::Mp4, "movie.mp4"),
            (VideoParam::Ogg, "null"),
            (VideoParam::Webm, "movie.webm"),
            (VideoParam::Controls, "1"),
            (VideoParam::Poster, "poster.jpg"),
        ]);
        let player = build_player(&params, PlayerKind::Native, VIEWPORT, true);

        assert_eq!(player.tag, ElementTag::Video);
        assert_eq!(
            player.flags,
            Some(MediaFlags {
                controls: true,
                loop_: false,
                autoplay: false,
                muted: true,
            })
        );
        assert_eq!(player.attribute("poster"), Some("poster.jpg"));
        assert_eq!(player.attribute("preload"), Some("auto"));
        let mimes: Vec<_> = player.sources.iter().map(|s| s.mime.as_str()).collect();
        assert_eq!(mimes, vec!["video/mp4", "video/webm"]);
    }

    #[test]
    fn test_native_player_without_sources() {
        let params = resolve(&[]);
        let player = build_player(&params, PlayerKind::Native, VIEWPORT, true);
        assert!(player.sources.is_empty());
        assert_eq!(player.attribute("src"), None);
    }

    #[test]
    fn test_is_on() {
        assert!(is_on(&Some("1".to_string())));
        assert!(is_on(&Some("true".to_string())));
        assert!(!is_on(&Some("0".to_string())));
        assert!(!is_on(&Some("false".to_string())));
        assert!(!is_on(&None));
    }

    #[test]
    fn test_only_landscape_swaps_attributes() {
        let params = resolve(&[
            (VideoParam::Provider, "youtube"),
            (VideoParam::Width, "640"),
            (VideoParam::Height, "360"),
        ]);
        let portrait = Viewport::new(400.0, 800.0);
        let player = build_player(&params, PlayerKind::Frame, portrait, true);
        assert_eq!(player.attribute("width"), Some("360"));
        assert_eq!(player.attribute("height"), Some("640"));
        assert_eq!(player.margin_top, Some(80));
    }
}
