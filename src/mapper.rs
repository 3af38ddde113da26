//! Mapping between list scroll position and thumb position on the track.
//!
//! The forward direction (scroll to thumb) runs on every layout pass while no
//! drag is active. The inverse direction (track fraction to scroll command)
//! runs for every move of an active drag. Both share the same
//! [`ScrollSpace`], so the two directions agree up to one row of quantization.

use crate::geometry::Padding;

/// First visible row and how far it is scrolled past the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPositionState {
    /// Row index of the first visible child, `-1` before layout or with no items
    pub row_index: i32,
    /// Layout top of the first visible child divided by its own height.
    /// Negative once the row has scrolled above the viewport top.
    pub row_top_offset: f32,
    /// Estimated uniform row height
    pub row_height: i32,
}

impl ScrollPositionState {
    pub const UNSET: ScrollPositionState = ScrollPositionState {
        row_index: -1,
        row_top_offset: -1.0,
        row_height: -1,
    };

    pub fn is_laid_out(&self) -> bool {
        self.row_index >= 0 && self.row_height > 0
    }

    pub fn reset(&mut self) {
        *self = Self::UNSET;
    }
}

impl Default for ScrollPositionState {
    fn default() -> Self {
        Self::UNSET
    }
}

/// A "scroll to item with pixel offset" command for the host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollCommand {
    pub position: usize,
    /// Sub-row offset, always in `-(row_height - 1)..=0`
    pub offset: i32,
}

/// Number of rows for `item_count` items laid out `span_count` per row.
pub fn row_count(item_count: usize, span_count: usize) -> usize {
    let span_count = span_count.max(1);
    item_count.div_ceil(span_count)
}

/// Scrollable and track extents of one list at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSpace {
    pub viewport_height: i32,
    /// Content padding of the list, part of its scroll range
    pub content_padding: Padding,
    /// Padding of the drawn list background, which the track respects
    pub track_padding: Padding,
    pub thumb_height: i32,
}

impl ScrollSpace {
    /// Height of the list minus the background padding
    pub fn visible_height(&self) -> i32 {
        self.viewport_height - self.track_padding.top - self.track_padding.bottom
    }

    /// Total content height minus the last page.
    ///
    /// Assumes every row has `row_height`. A value `<= 0` means nothing can scroll.
    pub fn available_scroll_height(&self, row_count: usize, row_height: i32) -> i32 {
        let content = self.content_padding.top as i64
            + row_count as i64 * row_height as i64
            + self.content_padding.bottom as i64;
        let available = content - self.visible_height() as i64;
        available.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Distance the thumb top can travel
    pub fn available_track_height(&self) -> i32 {
        self.visible_height() - self.thumb_height
    }

    /// Range the thumb top is clamped to while dragging
    pub fn track_bounds(&self) -> (i32, i32) {
        let top = self.track_padding.top;
        let bottom = self.viewport_height - self.track_padding.bottom - self.thumb_height;
        (top, bottom)
    }

    /// Content pixel currently at the viewport top
    pub fn scroll_y(&self, state: &ScrollPositionState) -> i32 {
        let rows = state.row_index as f32 - state.row_top_offset;
        self.content_padding.top + (rows * state.row_height as f32).round() as i32
    }

    /// Thumb top for the given scroll state, or `None` when the content fits.
    pub fn thumb_y(&self, state: &ScrollPositionState, row_count: usize) -> Option<i32> {
        if !state.is_laid_out() {
            return None;
        }
        let available_scroll = self.available_scroll_height(row_count, state.row_height);
        if available_scroll <= 0 {
            return None;
        }

        let fraction = self.scroll_y(state) as f32 / available_scroll as f32;
        let track = self.available_track_height() as f32;
        Some(self.track_padding.top + (fraction * track) as i32)
    }

    /// Thumb left edge: against the left padding in RTL, the right padding otherwise.
    pub fn thumb_x(&self, viewport_width: i32, thumb_width: i32, rtl: bool) -> i32 {
        if rtl {
            self.track_padding.left
        } else {
            viewport_width - self.track_padding.right - thumb_width
        }
    }

    /// Fraction along the track for a thumb top at `y`, clamped to the track.
    pub fn track_fraction(&self, y: i32) -> f32 {
        let (top, bottom) = self.track_bounds();
        if bottom <= top {
            return 0.0;
        }
        let bounded = y.clamp(top, bottom);
        (bounded - top) as f32 / (bottom - top) as f32
    }

    /// Scroll command that puts `fraction` of the scroll range at the viewport top.
    ///
    /// The sub-row offset keeps the motion continuous instead of snapping to
    /// whole rows. Returns `None` while there is no row height to divide by.
    pub fn scroll_command(
        &self,
        fraction: f32,
        row_count: usize,
        span_count: usize,
        row_height: i32,
        item_count: usize,
    ) -> Option<ScrollCommand> {
        if row_height <= 0 || item_count == 0 {
            return None;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        let available = self.available_scroll_height(row_count, row_height).max(0);
        let target_pixel = (available as f64 * f64::from(fraction)).round() as i64;

        let row = target_pixel / row_height as i64;
        let offset = -(target_pixel % row_height as i64) as i32;
        let position = (span_count.max(1) as i64 * row).min(item_count as i64 - 1) as usize;
        Some(ScrollCommand { position, offset })
    }
}

/// Adapter position a track fraction lands on.
///
/// `0.0` is the first item and `1.0` the last item, never `item_count`.
pub fn position_at_fraction(fraction: f32, item_count: usize) -> Option<usize> {
    if item_count == 0 {
        return None;
    }
    let fraction = fraction.clamp(0.0, 1.0);
    let item_pos = item_count as f32 * fraction;
    let position = if fraction >= 1.0 {
        item_pos - 1.0
    } else {
        item_pos
    };
    Some((position.max(0.0) as usize).min(item_count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(viewport_height: i32) -> ScrollSpace {
        ScrollSpace {
            viewport_height,
            content_padding: Padding::default(),
            track_padding: Padding::default(),
            thumb_height: 100,
        }
    }

    fn state(row_index: i32, row_top_offset: f32, row_height: i32) -> ScrollPositionState {
        ScrollPositionState {
            row_index,
            row_top_offset,
            row_height,
        }
    }

    #[test]
    fn test_available_scroll_height() {
        assert_eq!(space(1000).available_scroll_height(1000, 100), 99_000);
        let padded = ScrollSpace {
            content_padding: Padding::symmetric(0, 20),
            track_padding: Padding::symmetric(0, 10),
            ..space(1000)
        };
        assert_eq!(padded.visible_height(), 980);
        assert_eq!(padded.available_scroll_height(10, 100), 60);
    }

    #[test]
    fn test_thumb_hidden_when_content_fits() {
        let space = space(1000);
        for rows in [0, 1, 5, 10] {
            assert_eq!(space.thumb_y(&state(0, 0.0, 100), rows), None);
        }
        assert_eq!(space.thumb_y(&ScrollPositionState::UNSET, 1000), None);
    }

    #[test]
    fn test_forward_mapping() {
        let space = space(1000);
        assert_eq!(space.thumb_y(&state(0, 0.0, 100), 1000), Some(0));
        // Half way: row 495 at the top is 49_500 of 99_000.
        assert_eq!(space.thumb_y(&state(495, 0.0, 100), 1000), Some(450));
        assert_eq!(space.thumb_y(&state(990, 0.0, 100), 1000), Some(900));
    }

    #[test]
    fn test_negative_top_offset_adds_scroll() {
        let space = space(1000);
        // Row 10 scrolled 40% above the top.
        assert_eq!(space.scroll_y(&state(10, -0.4, 100)), 1040);
    }

    #[test]
    fn test_thumb_x_respects_direction() {
        let space = ScrollSpace {
            track_padding: Padding::all(4),
            ..space(1000)
        };
        assert_eq!(space.thumb_x(500, 9, false), 487);
        assert_eq!(space.thumb_x(500, 9, true), 4);
    }

    #[test]
    fn test_track_fraction_is_clamped() {
        let space = space(1000);
        assert_eq!(space.track_bounds(), (0, 900));
        assert_eq!(space.track_fraction(-50), 0.0);
        assert_eq!(space.track_fraction(450), 0.5);
        assert_eq!(space.track_fraction(5000), 1.0);
    }

    #[test]
    fn test_scroll_command_half_way() {
        let cmd = space(1000).scroll_command(0.5, 1000, 1, 100, 1000).unwrap();
        assert_eq!(cmd, ScrollCommand { position: 495, offset: 0 });
        let cmd = space(1000).scroll_command(0.123, 1000, 1, 100, 1000).unwrap();
        // 99_000 * 0.123 = 12_177
        assert_eq!(cmd, ScrollCommand { position: 121, offset: -77 });
    }

    #[test]
    fn test_scroll_command_large_range() {
        // 99_999_000 px of range: f32 math would land on 29_999_702.
        let cmd = space(1000)
            .scroll_command(0.3, 1_000_000, 1, 100, 1_000_000)
            .unwrap();
        assert_eq!(cmd, ScrollCommand { position: 299_997, offset: -1 });
    }

    #[test]
    fn test_scroll_command_grid() {
        // 33 rows of 100px in a 1000px viewport.
        let cmd = space(1000).scroll_command(1.0, 33, 3, 100, 99).unwrap();
        assert_eq!(cmd, ScrollCommand { position: 69, offset: 0 });
    }

    #[test]
    fn test_scroll_command_needs_row_height() {
        assert_eq!(space(1000).scroll_command(0.5, 10, 1, -1, 10), None);
        assert_eq!(space(1000).scroll_command(0.5, 0, 1, 100, 0), None);
    }

    #[test]
    fn test_position_edges() {
        assert_eq!(position_at_fraction(0.0, 1000), Some(0));
        assert_eq!(position_at_fraction(0.5, 1000), Some(500));
        assert_eq!(position_at_fraction(1.0, 1000), Some(999));
        assert_eq!(position_at_fraction(1.0, 99), Some(98));
        assert_eq!(position_at_fraction(0.999_99, 1), Some(0));
        assert_eq!(position_at_fraction(0.5, 0), None);
    }

    #[test]
    fn test_row_count() {
        assert_eq!(row_count(99, 3), 33);
        assert_eq!(row_count(100, 3), 34);
        assert_eq!(row_count(10, 0), 10);
        assert_eq!(row_count(0, 4), 0);
    }

    #[test]
    fn test_round_trip_within_one_row() {
        let space = space(1000);
        for step in 0..=20 {
            let fraction = step as f32 / 20.0;
            let cmd = space.scroll_command(fraction, 1000, 1, 100, 1000).unwrap();
            let laid_out = state(
                cmd.position as i32,
                cmd.offset as f32 / 100.0,
                100,
            );
            let scroll_y = space.scroll_y(&laid_out);
            let back = scroll_y as f32 / space.available_scroll_height(1000, 100) as f32;
            assert!(
                (back - fraction).abs() <= 100.0 / 99_000.0,
                "fraction {fraction} came back as {back}"
            );
        }
    }
}
