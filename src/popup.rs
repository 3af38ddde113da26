//! Section label popup shown beside the thumb while dragging.

use std::time::Instant;

use crate::animation::{AnimationState, TimingFunction, Transition};
use crate::config::FastScrollConfig;
use crate::geometry::{Color, Padding, Rect};
use crate::host::LayoutDirection;

/// Popup top sits this many popup heights above the touch point.
const Y_OFFSET_FACTOR: f32 = 1.5;
const FADE_IN_MS: f32 = 200.0;
const FADE_OUT_MS: f32 = 150.0;

/// Measured extent of a run of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

/// Text measurement used to size the popup around its label.
pub trait TextMeasure {
    fn measure(&mut self, text: &str, font_size: f32) -> TextSize;
}

/// Font-free estimate: every character advances by a fixed share of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedTextMeasurer {
    pub advance_factor: f32,
    pub line_height_factor: f32,
}

impl Default for EstimatedTextMeasurer {
    fn default() -> Self {
        Self {
            advance_factor: 0.6,
            line_height_factor: 0.75,
        }
    }
}

impl TextMeasure for EstimatedTextMeasurer {
    fn measure(&mut self, text: &str, font_size: f32) -> TextSize {
        if text.is_empty() {
            return TextSize::default();
        }
        TextSize {
            width: text.chars().count() as f32 * font_size * self.advance_factor,
            height: font_size * self.line_height_factor,
        }
    }
}

#[cfg(feature = "cosmic-text")]
pub use cosmic::CosmicTextMeasurer;

#[cfg(feature = "cosmic-text")]
mod cosmic {
    use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};

    use super::{TextMeasure, TextSize};

    /// Shaped measurement through the system fonts.
    pub struct CosmicTextMeasurer {
        font_system: FontSystem,
    }

    impl CosmicTextMeasurer {
        pub fn new() -> Self {
            Self {
                font_system: FontSystem::new(),
            }
        }
    }

    impl Default for CosmicTextMeasurer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl std::fmt::Debug for CosmicTextMeasurer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("CosmicTextMeasurer").finish_non_exhaustive()
        }
    }

    impl TextMeasure for CosmicTextMeasurer {
        fn measure(&mut self, text: &str, font_size: f32) -> TextSize {
            let metrics = Metrics::new(font_size, font_size * 1.2);
            let mut buffer = Buffer::new(&mut self.font_system, metrics);

            buffer.set_size(&mut self.font_system, None, None);
            buffer.set_text(
                &mut self.font_system,
                text,
                &Attrs::new().family(Family::SansSerif),
                Shaping::Advanced,
                None,
            );
            buffer.shape_until_scroll(&mut self.font_system, true);

            let mut width = 0.0f32;
            let mut height = 0.0f32;
            for run in buffer.layout_runs() {
                width = width.max(run.line_w);
                height += run.line_height;
            }
            TextSize { width, height }
        }
    }
}

/// Layout inputs for placing the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupPlacement {
    pub list_width: i32,
    pub list_height: i32,
    pub track_padding: Padding,
    pub max_thumb_width: i32,
    pub direction: LayoutDirection,
}

/// Snapshot of the popup for rendering and inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupRecord {
    pub section_label: Option<String>,
    pub background_bounds: Rect,
    /// Label extent relative to the background origin, not yet centred
    pub text_bounds: Rect,
    pub alpha: f32,
}

impl PopupRecord {
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0 && self.section_label.is_some()
    }
}

/// Label, bounds and fade state of the section popup.
pub struct PopupState {
    section_label: Option<String>,
    background_bounds: Rect,
    text_bounds: Rect,
    alpha: AnimationState<f32>,
    visible: bool,
    text_size: f32,
    /// Edge length of the square background
    background_size: i32,
    background_color: Color,
    text_color: Color,
    measurer: Box<dyn TextMeasure>,
}

impl std::fmt::Debug for PopupState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupState")
            .field("section_label", &self.section_label)
            .field("background_bounds", &self.background_bounds)
            .field("text_bounds", &self.text_bounds)
            .field("alpha", self.alpha.current())
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

impl PopupState {
    pub fn new(config: &FastScrollConfig, measurer: Box<dyn TextMeasure>) -> Self {
        Self {
            section_label: None,
            background_bounds: Rect::EMPTY,
            text_bounds: Rect::EMPTY,
            alpha: AnimationState::new(0.0, Transition::new(FADE_IN_MS, TimingFunction::Linear)),
            visible: false,
            text_size: config.popup_text_size,
            background_size: config.popup_size(),
            background_color: config.popup_background_color,
            text_color: config.popup_text_color,
            measurer,
        }
    }

    pub fn section_label(&self) -> Option<&str> {
        self.section_label.as_deref()
    }

    pub fn background_bounds(&self) -> Rect {
        self.background_bounds
    }

    pub fn alpha(&self) -> f32 {
        *self.alpha.current()
    }

    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn is_visible(&self) -> bool {
        self.alpha() > 0.0 && self.section_label.is_some()
    }

    pub fn record(&self) -> PopupRecord {
        PopupRecord {
            section_label: self.section_label.clone(),
            background_bounds: self.background_bounds,
            text_bounds: self.text_bounds,
            alpha: self.alpha(),
        }
    }

    /// Set the label and re-measure it. `None` clears the popup content.
    pub fn set_section_label(&mut self, label: Option<String>) {
        if label == self.section_label {
            return;
        }
        self.text_bounds = match label.as_deref() {
            Some(text) => {
                let size = self.measurer.measure(text, self.text_size);
                Rect::from_size(0, 0, size.width.ceil() as i32, size.height.ceil() as i32)
            }
            None => Rect::EMPTY,
        };
        self.section_label = label;
    }

    /// Start fading in or out. A repeated request keeps the running fade.
    pub fn animate_visibility(&mut self, visible: bool, now: Instant) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        let (target, duration) = if visible {
            (1.0, FADE_IN_MS)
        } else {
            (0.0, FADE_OUT_MS)
        };
        self.alpha
            .set_transition(Transition::new(duration, TimingFunction::Linear));
        self.alpha.animate_to(target, now);
    }

    /// Sample the fade. Returns the background to redraw when alpha moved.
    pub fn advance(&mut self, now: Instant) -> Option<Rect> {
        if self.alpha.advance(now).is_changed() {
            Some(self.background_bounds)
        } else {
            None
        }
    }

    pub fn is_animating(&self) -> bool {
        self.alpha.is_animating()
    }

    /// Place the popup beside the track at `touch_y`.
    ///
    /// Returns the union of the previous and new background bounds. A popup
    /// that is neither shown nor still fading out collapses to empty bounds.
    pub fn update_bounds(&mut self, placement: &PopupPlacement, touch_y: i32) -> Rect {
        let before = self.background_bounds;

        let laid_out = (self.visible || self.alpha() > 0.0) && self.section_label.is_some();
        if laid_out {
            let edge_padding = placement.max_thumb_width;
            let size = self.background_size;
            let text_padding = (size - self.text_bounds.height()) / 2;
            let width = size.max(self.text_bounds.width() + 2 * text_padding);

            let (left, right) = if placement.direction.is_rtl() {
                let left = placement.track_padding.left + 2 * placement.max_thumb_width;
                (left, left + width)
            } else {
                let right = placement.list_width
                    - placement.track_padding.right
                    - 2 * placement.max_thumb_width;
                (right - width, right)
            };

            let top = touch_y - (Y_OFFSET_FACTOR * size as f32) as i32;
            let max_top = placement.list_height - edge_padding - size;
            let top = top.min(max_top).max(edge_padding);
            self.background_bounds = Rect::new(left, top, right, top + size);
        } else {
            self.background_bounds = Rect::EMPTY;
        }

        before.union(&self.background_bounds)
    }

    /// Rectangle the label is drawn in: text extent centred in the background.
    pub fn text_rect(&self) -> Rect {
        let bg = self.background_bounds;
        let left = bg.left + (bg.width() - self.text_bounds.width()) / 2;
        let top = bg.top + (bg.height() - self.text_bounds.height()) / 2;
        Rect::from_size(left, top, self.text_bounds.width(), self.text_bounds.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Ten pixels per character, 40 pixels tall.
    struct FixedMeasurer;

    impl TextMeasure for FixedMeasurer {
        fn measure(&mut self, text: &str, _font_size: f32) -> TextSize {
            TextSize {
                width: text.len() as f32 * 10.0,
                height: 40.0,
            }
        }
    }

    fn popup() -> PopupState {
        PopupState::new(&FastScrollConfig::default(), Box::new(FixedMeasurer))
    }

    fn placement(direction: LayoutDirection) -> PopupPlacement {
        PopupPlacement {
            list_width: 500,
            list_height: 1000,
            track_padding: Padding::default(),
            max_thumb_width: 9,
            direction,
        }
    }

    fn shown(label: &str) -> PopupState {
        let now = Instant::now();
        let mut popup = popup();
        popup.set_section_label(Some(label.to_string()));
        popup.animate_visibility(true, now);
        popup.advance(now + Duration::from_millis(200));
        popup
    }

    #[test]
    fn test_visibility_needs_label_and_alpha() {
        let now = Instant::now();
        let mut popup = popup();
        popup.animate_visibility(true, now);
        popup.advance(now + Duration::from_millis(250));
        assert_eq!(popup.alpha(), 1.0);
        assert!(!popup.is_visible());

        popup.set_section_label(Some("A".into()));
        assert!(popup.is_visible());
        assert!(popup.record().is_visible());
    }

    #[test]
    fn test_fade_durations() {
        let now = Instant::now();
        let mut popup = shown("B");
        popup.animate_visibility(false, now);
        popup.advance(now + Duration::from_millis(75));
        assert!((popup.alpha() - 0.5).abs() < 1e-3);
        popup.advance(now + Duration::from_millis(150));
        assert_eq!(popup.alpha(), 0.0);
        assert!(!popup.is_visible());
    }

    #[test]
    fn test_bounds_ltr() {
        let mut popup = shown("C");
        let dirty = popup.update_bounds(&placement(LayoutDirection::LeftToRight), 500);
        // 88px square, right edge two max thumb widths from the list edge.
        assert_eq!(popup.background_bounds(), Rect::new(394, 368, 482, 456));
        assert_eq!(dirty, popup.background_bounds());
    }

    #[test]
    fn test_bounds_rtl() {
        let mut popup = shown("C");
        popup.update_bounds(&placement(LayoutDirection::RightToLeft), 500);
        assert_eq!(popup.background_bounds(), Rect::new(18, 368, 106, 456));
    }

    #[test]
    fn test_wide_label_widens_background() {
        let mut popup = shown("ABCDEFGHIJ");
        popup.update_bounds(&placement(LayoutDirection::LeftToRight), 500);
        // 100px text plus 24px padding on each side.
        assert_eq!(popup.background_bounds().width(), 148);
    }

    #[test]
    fn test_bounds_clamped_to_list() {
        let mut popup = shown("D");
        popup.update_bounds(&placement(LayoutDirection::LeftToRight), 10);
        assert_eq!(popup.background_bounds().top, 9);
        popup.update_bounds(&placement(LayoutDirection::LeftToRight), 5000);
        assert_eq!(popup.background_bounds().bottom, 1000 - 9);
    }

    #[test]
    fn test_hidden_popup_collapses_and_invalidates_old_bounds() {
        let mut popup = shown("E");
        let placement = placement(LayoutDirection::LeftToRight);
        popup.update_bounds(&placement, 500);
        let old = popup.background_bounds();

        popup.set_section_label(None);
        let dirty = popup.update_bounds(&placement, 500);
        assert!(popup.background_bounds().is_empty());
        assert_eq!(dirty, old);
    }

    #[test]
    fn test_text_is_centred() {
        let mut popup = shown("F");
        popup.update_bounds(&placement(LayoutDirection::LeftToRight), 500);
        assert_eq!(popup.text_rect(), Rect::new(433, 392, 443, 432));
    }

    #[test]
    fn test_estimated_measurer() {
        let mut measurer = EstimatedTextMeasurer::default();
        let size = measurer.measure("AB", 50.0);
        assert!((size.width - 60.0).abs() < 1e-3);
        assert_eq!(measurer.measure("", 50.0), TextSize::default());
    }
}
