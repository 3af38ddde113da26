//! Fast scroller configuration and its builder.

use std::time::Duration;

use crate::error::ConfigError;
use crate::geometry::Color;

/// Track alpha used when no track color is given (30 of 255).
const DEFAULT_TRACK_ALPHA: f32 = 30.0 / 255.0;

/// Recognized options for the thumb, track and popup.
///
/// Sizes are in device pixels. Construct through [`FastScrollConfig::builder`]
/// to get validation, or use `Default` for the stock look.
#[derive(Debug, Clone, PartialEq)]
pub struct FastScrollConfig {
    /// Keep the thumb at full width and never schedule the auto-hide
    pub always_show: bool,
    /// Delay between the list going idle and the thumb shrinking
    pub hide_delay: Duration,
    /// Thumb width while idle
    pub thumb_min_width: i32,
    /// Thumb width while the list scrolls or the thumb is dragged
    pub thumb_max_width: i32,
    pub thumb_height: i32,
    pub thumb_active_color: Color,
    pub thumb_inactive_color: Color,
    pub track_color: Color,
    /// Bulge the inner edge of a shrunk thumb by `max_width - width`
    pub curvature_enabled: bool,
    pub popup_background_color: Color,
    pub popup_text_color: Color,
    pub popup_text_size: f32,
    /// Added to the text size to get the square popup edge length
    pub popup_padding: i32,
    /// Let the thumb stay under the finger after a drag until the list scrolls again
    pub detach_on_drag: bool,
    /// Inset applied to the thumb bounds for hit testing; negative grows the target
    pub touch_inset: i32,
    /// Movement needed before a touch near the thumb becomes a drag
    pub touch_slop: i32,
    /// Movement after which the gesture is a list scroll and never a thumb drag
    pub paging_touch_slop: i32,
    /// A touch-down stops the list when its last scroll step was below this
    pub scroll_delta_threshold: i32,
}

impl Default for FastScrollConfig {
    fn default() -> Self {
        Self {
            always_show: false,
            hide_delay: Duration::from_millis(1000),
            thumb_min_width: 5,
            thumb_max_width: 9,
            thumb_height: 72,
            thumb_active_color: Color::from_hex(0x009688),
            thumb_inactive_color: Color::from_hex(0x79D1C9),
            track_color: Color::BLACK.with_alpha(DEFAULT_TRACK_ALPHA),
            curvature_enabled: false,
            popup_background_color: Color::from_hex(0x009688),
            popup_text_color: Color::WHITE,
            popup_text_size: 56.0,
            popup_padding: 32,
            detach_on_drag: true,
            touch_inset: -24,
            touch_slop: 8,
            paging_touch_slop: 16,
            scroll_delta_threshold: 4,
        }
    }
}

impl FastScrollConfig {
    pub fn builder() -> FastScrollConfigBuilder {
        FastScrollConfigBuilder::new()
    }

    /// Edge length of the square popup background
    pub fn popup_size(&self) -> i32 {
        self.popup_text_size as i32 + self.popup_padding
    }

    /// Curvature for a thumb of the given width
    pub fn curvature_for(&self, width: i32) -> i32 {
        if self.curvature_enabled {
            self.thumb_max_width - width
        } else {
            0
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumb_min_width > self.thumb_max_width {
            return Err(ConfigError::ThumbWidthRange {
                min: self.thumb_min_width,
                max: self.thumb_max_width,
            });
        }
        if self.thumb_height <= 0 {
            return Err(ConfigError::ThumbHeight(self.thumb_height));
        }
        if self.popup_text_size <= 0.0 {
            return Err(ConfigError::PopupTextSize(self.popup_text_size));
        }
        if self.paging_touch_slop < self.touch_slop {
            return Err(ConfigError::SlopOrder {
                touch: self.touch_slop,
                paging: self.paging_touch_slop,
            });
        }
        Ok(())
    }
}

/// Builder for customizing the fast scroller
#[derive(Default)]
pub struct FastScrollConfigBuilder {
    config: FastScrollConfig,
}

impl FastScrollConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the thumb expanded and visible at all times
    pub fn always_show(mut self, always: bool) -> Self {
        self.config.always_show = always;
        self
    }

    pub fn hide_delay(mut self, delay: Duration) -> Self {
        self.config.hide_delay = delay;
        self
    }

    /// Set the idle and active thumb widths
    pub fn thumb_width(mut self, min: i32, max: i32) -> Self {
        self.config.thumb_min_width = min;
        self.config.thumb_max_width = max;
        self
    }

    pub fn thumb_height(mut self, height: i32) -> Self {
        self.config.thumb_height = height;
        self
    }

    pub fn thumb_active_color(mut self, color: Color) -> Self {
        self.config.thumb_active_color = color;
        self
    }

    pub fn thumb_inactive_color(mut self, color: Color) -> Self {
        self.config.thumb_inactive_color = color;
        self
    }

    pub fn track_color(mut self, color: Color) -> Self {
        self.config.track_color = color;
        self
    }

    pub fn curvature(mut self, enabled: bool) -> Self {
        self.config.curvature_enabled = enabled;
        self
    }

    pub fn popup_background_color(mut self, color: Color) -> Self {
        self.config.popup_background_color = color;
        self
    }

    pub fn popup_text_color(mut self, color: Color) -> Self {
        self.config.popup_text_color = color;
        self
    }

    pub fn popup_text_size(mut self, size: f32) -> Self {
        self.config.popup_text_size = size;
        self
    }

    pub fn popup_padding(mut self, padding: i32) -> Self {
        self.config.popup_padding = padding;
        self
    }

    pub fn detach_on_drag(mut self, detach: bool) -> Self {
        self.config.detach_on_drag = detach;
        self
    }

    /// Set the hit-test inset around the thumb (negative grows the target)
    pub fn touch_inset(mut self, inset: i32) -> Self {
        self.config.touch_inset = inset;
        self
    }

    /// Set the drag-start and paging slop thresholds
    pub fn slop(mut self, touch: i32, paging: i32) -> Self {
        self.config.touch_slop = touch;
        self.config.paging_touch_slop = paging;
        self
    }

    pub fn scroll_delta_threshold(mut self, threshold: i32) -> Self {
        self.config.scroll_delta_threshold = threshold;
        self
    }

    /// Scale every pixel dimension by a display density, rounding like a dp conversion
    pub fn density(mut self, density: f32) -> Self {
        let px = |dp: i32| (dp as f32 * density).round() as i32;
        let c = &mut self.config;
        c.thumb_min_width = px(c.thumb_min_width);
        c.thumb_max_width = px(c.thumb_max_width);
        c.thumb_height = px(c.thumb_height);
        c.popup_text_size *= density;
        c.popup_padding = px(c.popup_padding);
        c.touch_inset = px(c.touch_inset);
        c.touch_slop = px(c.touch_slop);
        c.paging_touch_slop = px(c.paging_touch_slop);
        c.scroll_delta_threshold = px(c.scroll_delta_threshold);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<FastScrollConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(FastScrollConfig::default().validate(), Ok(()));
        assert_eq!(FastScrollConfig::default().popup_size(), 88);
    }

    #[test]
    fn test_rejects_inverted_widths() {
        let err = FastScrollConfig::builder().thumb_width(12, 4).build();
        assert_eq!(err, Err(ConfigError::ThumbWidthRange { min: 12, max: 4 }));
    }

    #[test]
    fn test_rejects_paging_slop_below_touch_slop() {
        let err = FastScrollConfig::builder().slop(20, 10).build();
        assert_eq!(
            err,
            Err(ConfigError::SlopOrder {
                touch: 20,
                paging: 10
            })
        );
    }

    #[test]
    fn test_density_scales_dimensions() {
        let config = FastScrollConfig::builder().density(2.0).build().unwrap();
        assert_eq!(config.thumb_max_width, 18);
        assert_eq!(config.thumb_height, 144);
        assert_eq!(config.touch_inset, -48);
        assert_eq!(config.popup_size(), 176);
    }

    #[test]
    fn test_curvature_tracks_width() {
        let config = FastScrollConfig::builder().curvature(true).build().unwrap();
        assert_eq!(config.curvature_for(5), 4);
        assert_eq!(config.curvature_for(9), 0);
        assert_eq!(FastScrollConfig::default().curvature_for(5), 0);
    }
}
