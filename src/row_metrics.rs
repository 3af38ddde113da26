//! Effective row height from the rows currently on screen.

use crate::host::RowLayout;

/// Estimates a uniform row height from a possibly non-uniform, partially
/// clipped set of visible rows.
///
/// Each visible row contributes the fraction of it that is inside the
/// viewport, so two half-visible rows weigh as much as one full row. The
/// estimate is cheap and depends on live layout, so it is recomputed on
/// every pass and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMetrics {
    pub viewport_height: i32,
    pub padding_top: i32,
    pub padding_bottom: i32,
}

impl RowMetrics {
    pub fn new(viewport_height: i32, padding_top: i32, padding_bottom: i32) -> Self {
        Self {
            viewport_height,
            padding_top,
            padding_bottom,
        }
    }

    /// Visible rows summed as fractions, like `10.5` for ten full rows and a half one.
    pub fn visible_row_fraction(&self, rows: &[RowLayout]) -> f32 {
        rows.iter()
            .filter(|row| row.height > 0)
            .map(|row| self.visible_height(row) as f32 / row.height as f32)
            .sum()
    }

    /// Pixels of `row` left after clipping by the padded viewport
    pub fn visible_height(&self, row: &RowLayout) -> i32 {
        let cut_top = (self.padding_top - row.decorated_top).max(0);
        let cut_bottom =
            (row.decorated_bottom - (self.viewport_height - self.padding_bottom)).max(0);
        (row.height - cut_top - cut_bottom).max(0)
    }

    /// Effective row height, or `fallback_height` when fewer than two rows are visible.
    pub fn row_height(&self, rows: &[RowLayout], fallback_height: i32) -> i32 {
        let first = rows.iter().map(|row| row.position).min();
        let last = rows.iter().map(|row| row.position).max();
        let distinct_rows = matches!((first, last), (Some(first), Some(last)) if last > first);
        if !distinct_rows {
            return fallback_height;
        }

        let visible_rows = self.visible_row_fraction(rows);
        if visible_rows <= 0.0 {
            return fallback_height;
        }

        let content_height = self.viewport_height - self.padding_top - self.padding_bottom;
        (content_height as f32 / visible_rows).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_half_rows_span_viewport() {
        let metrics = RowMetrics::new(1000, 0, 0);
        let rows = [RowLayout::new(4, -500, 1000), RowLayout::new(5, 500, 1000)];
        assert!((metrics.visible_row_fraction(&rows) - 1.0).abs() < 1e-6);
        assert_eq!(metrics.row_height(&rows, 50), 1000);
    }

    #[test]
    fn test_uniform_rows() {
        let metrics = RowMetrics::new(1000, 0, 0);
        let rows: Vec<_> = (0..10)
            .map(|i| RowLayout::new(i, i as i32 * 100, 100))
            .collect();
        assert_eq!(metrics.row_height(&rows, 1), 100);
    }

    #[test]
    fn test_partially_scrolled_rows() {
        let metrics = RowMetrics::new(1000, 0, 0);
        // Top row half above the viewport, bottom row half below it.
        let rows: Vec<_> = (0..11)
            .map(|i| RowLayout::new(i, i as i32 * 100 - 50, 100))
            .collect();
        assert!((metrics.visible_row_fraction(&rows) - 10.0).abs() < 1e-6);
        assert_eq!(metrics.row_height(&rows, 1), 100);
    }

    #[test]
    fn test_padding_clips_rows() {
        let metrics = RowMetrics::new(1000, 100, 100);
        let row = RowLayout::new(0, 50, 100);
        assert_eq!(metrics.visible_height(&row), 50);
        let row = RowLayout::new(9, 850, 100);
        assert_eq!(metrics.visible_height(&row), 50);
    }

    #[test]
    fn test_single_row_falls_back() {
        let metrics = RowMetrics::new(1000, 0, 0);
        let rows = [RowLayout::new(3, 0, 1200)];
        assert_eq!(metrics.row_height(&rows, 1200), 1200);
        assert_eq!(metrics.row_height(&[], 77), 77);
    }

    #[test]
    fn test_zero_height_rows_fall_back() {
        let metrics = RowMetrics::new(1000, 0, 0);
        let rows = [RowLayout::new(0, 0, 0), RowLayout::new(1, 0, 0)];
        assert_eq!(metrics.row_height(&rows, 64), 64);
    }

    #[test]
    fn test_mixed_heights_weighted() {
        let metrics = RowMetrics::new(1000, 0, 0);
        // 40% of the top row and 530 of the bottom row's 600 px are on screen.
        let rows = [
            RowLayout::new(3, -30, 50),
            RowLayout::new(4, 20, 150),
            RowLayout::new(5, 170, 300),
            RowLayout::new(6, 470, 600),
        ];
        assert_eq!(metrics.visible_height(&rows[0]), 20);
        assert_eq!(metrics.visible_height(&rows[3]), 530);
        let expected = 0.4 + 1.0 + 1.0 + 530.0 / 600.0;
        assert!((metrics.visible_row_fraction(&rows) - expected).abs() < 1e-4);
        assert_eq!(metrics.row_height(&rows, 50), 305);
    }
}
