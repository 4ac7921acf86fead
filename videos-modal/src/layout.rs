//! # Layout 模块
//!
//! 播放器尺寸与竖直居中。仅做一次方向判断，不做响应式布局。

use serde::{Deserialize, Serialize};

/// 窗口可视区域（`innerWidth` / `innerHeight`）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 与 CSS `(orientation: portrait)` 一致：高度不小于宽度即为竖屏
    pub fn is_portrait(&self) -> bool {
        self.height >= self.width
    }

    /// 未配置宽度时的回退值
    pub fn fallback_width(&self) -> f64 {
        self.width * 0.7
    }

    /// 未配置高度时的回退值
    pub fn fallback_height(&self) -> f64 {
        self.height * 0.7
    }
}

/// 写入播放器元素的尺寸
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSize {
    /// `width` 属性
    pub width: String,
    /// `height` 属性
    pub height: String,
    /// 上边距（px）；有效高度不是数字时为 `None`
    pub margin_top: Option<i64>,
}

/// 计算播放器尺寸
///
/// `only_landscape` 且当前为竖屏时交换宽高，
/// 让横向视频在竖屏中仍保持横向比例；上边距按交换后的高度计算。
pub fn fit_player(width: &str, height: &str, viewport: Viewport, only_landscape: bool) -> PlayerSize {
    let (width, height) = if only_landscape && viewport.is_portrait() {
        (height, width)
    } else {
        (width, height)
    };

    PlayerSize {
        width: width.to_string(),
        height: height.to_string(),
        margin_top: centering_offset(viewport.height, height),
    }
}

/// `floor((viewportHeight - effectiveHeight) / 2)`
fn centering_offset(viewport_height: f64, effective_height: &str) -> Option<i64> {
    let height: f64 = effective_height.trim().parse().ok()?;
    let offset = ((viewport_height - height) / 2.0).floor();
    offset.is_finite().then_some(offset as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        assert!(Viewport::new(400.0, 800.0).is_portrait());
        assert!(Viewport::new(500.0, 500.0).is_portrait());
        assert!(!Viewport::new(1280.0, 720.0).is_portrait());
    }

    #[test]
    fn test_landscape_viewport_keeps_size() {
        let size = fit_player("640", "360", Viewport::new(1280.0, 720.0), true);
        assert_eq!(size.width, "640");
        assert_eq!(size.height, "360");
        assert_eq!(size.margin_top, Some(180));
    }

    #[test]
    fn test_portrait_viewport_swaps_size() {
        let size = fit_player("640", "360", Viewport::new(400.0, 800.0), true);
        assert_eq!(size.width, "360");
        assert_eq!(size.height, "640");
        assert_eq!(size.margin_top, Some(80));
    }

    #[test]
    fn test_portrait_without_only_landscape() {
        let size = fit_player("640", "360", Viewport::new(400.0, 800.0), false);
        assert_eq!(size.width, "640");
        assert_eq!(size.height, "360");
        assert_eq!(size.margin_top, Some(220));
    }

    #[test]
    fn test_offset_is_floored() {
        let size = fit_player("100", "101", Viewport::new(1000.0, 200.0), true);
        // (200 - 101) / 2 = 49.5
        assert_eq!(size.margin_top, Some(49));

        let size = fit_player("100", "301", Viewport::new(1000.0, 200.0), true);
        // (200 - 301) / 2 = -50.5
        assert_eq!(size.margin_top, Some(-51));
    }

    #[test]
    fn test_non_numeric_height_has_no_offset() {
        let size = fit_player("100%", "auto", Viewport::new(1280.0, 720.0), true);
        assert_eq!(size.height, "auto");
        assert_eq!(size.margin_top, None);
    }
}
