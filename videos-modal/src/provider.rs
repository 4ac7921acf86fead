//! # Provider 模块
//!
//! 视频来源标签。`media` 是唯一的"无 Provider"哨兵值，
//! 表示使用本地媒体文件（HTML5 `<video>`）。

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// "无 Provider"哨兵标签
pub const MEDIA_PROVIDER: &str = "media";

/// 视频来源
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Provider {
    YouTube,
    YouTubePlaylist,
    Dailymotion,
    Vimeo,
    /// 本地媒体文件
    Media,
    /// 未识别的标签，原样保留
    Other(String),
}

impl Provider {
    /// 标签文本
    pub fn tag(&self) -> &str {
        match self {
            Provider::YouTube => "youtube",
            Provider::YouTubePlaylist => "youtubeplaylist",
            Provider::Dailymotion => "dailymotion",
            Provider::Vimeo => "vimeo",
            Provider::Media => MEDIA_PROVIDER,
            Provider::Other(tag) => tag,
        }
    }

    /// 是否为支持的流媒体 Provider（同意网关只管理这些）
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            Provider::YouTube | Provider::YouTubePlaylist | Provider::Dailymotion | Provider::Vimeo
        )
    }

    /// 是否为"无 Provider"哨兵
    pub fn is_media(&self) -> bool {
        matches!(self, Provider::Media)
    }

    /// 同意网关占位容器使用的播放器类名
    pub fn player_class(&self) -> String {
        match self {
            Provider::YouTubePlaylist => "youtube_playlist_player".to_string(),
            other => format!("{}_player", other.tag()),
        }
    }

    /// 同意网关占位容器上承载 id 的属性名
    pub fn id_attribute(&self) -> &'static str {
        match self {
            Provider::YouTubePlaylist => "playlistID",
            _ => "videoID",
        }
    }

    /// 未配置 id 时使用的占位视频
    pub fn default_id(&self) -> Option<&'static str> {
        match self {
            Provider::YouTube => Some("Q5fftru-t-g"),
            Provider::YouTubePlaylist => Some("PLDz1o5Ur8b7V56es-ci2_HdykvZPLNU95"),
            Provider::Dailymotion => Some("xta4r"),
            Provider::Vimeo => Some("210806913"),
            Provider::Media | Provider::Other(_) => None,
        }
    }
}

impl FromStr for Provider {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "youtube" => Provider::YouTube,
            "youtubeplaylist" => Provider::YouTubePlaylist,
            "dailymotion" => Provider::Dailymotion,
            "vimeo" => Provider::Vimeo,
            MEDIA_PROVIDER | "" => Provider::Media,
            other => Provider::Other(other.to_string()),
        })
    }
}

impl From<String> for Provider {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(provider) => provider,
            Err(never) => match never {},
        }
    }
}

impl From<Provider> for String {
    fn from(value: Provider) -> Self {
        value.tag().to_string()
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("youtube".parse::<Provider>().unwrap(), Provider::YouTube);
        assert_eq!(
            "youtubeplaylist".parse::<Provider>().unwrap(),
            Provider::YouTubePlaylist
        );
        assert_eq!("media".parse::<Provider>().unwrap(), Provider::Media);
        assert_eq!("".parse::<Provider>().unwrap(), Provider::Media);
        assert_eq!(
            "twitch".parse::<Provider>().unwrap(),
            Provider::Other("twitch".to_string())
        );
    }

    #[test]
    fn test_supported_providers() {
        assert!(Provider::Vimeo.is_supported());
        assert!(Provider::YouTubePlaylist.is_supported());
        assert!(!Provider::Media.is_supported());
        assert!(!Provider::Other("twitch".to_string()).is_supported());
    }

    #[test]
    fn test_player_class_and_id_attribute() {
        assert_eq!(Provider::YouTube.player_class(), "youtube_player");
        assert_eq!(
            Provider::YouTubePlaylist.player_class(),
            "youtube_playlist_player"
        );
        assert_eq!(Provider::Vimeo.player_class(), "vimeo_player");
        assert_eq!(Provider::YouTubePlaylist.id_attribute(), "playlistID");
        assert_eq!(Provider::Dailymotion.id_attribute(), "videoID");
    }

    #[test]
    fn test_serde_as_tag() {
        let json = serde_json::to_string(&Provider::Dailymotion).unwrap();
        assert_eq!(json, r#""dailymotion""#);
        let provider: Provider = serde_json::from_str(r#""vimeo""#).unwrap();
        assert_eq!(provider, Provider::Vimeo);
    }
}
