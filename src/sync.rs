//! Scroll to thumb synchronization.

use crate::geometry::{Point, Rect};
use crate::host::{ListGeometry, ListHost};
use crate::mapper::{row_count, ScrollPositionState, ScrollSpace};
use crate::row_metrics::RowMetrics;
use crate::thumb::ThumbGeometry;

/// Read the first visible row and the effective row height from the host.
///
/// Leaves `state` at [`ScrollPositionState::UNSET`] when there are no items or
/// nothing has been laid out yet.
pub fn capture_scroll_state<H: ListHost + ?Sized>(
    host: &H,
    geometry: &ListGeometry,
    state: &mut ScrollPositionState,
) {
    state.reset();

    if host.item_count() == 0 {
        return;
    }
    let Some(child) = host.first_visible_row() else {
        return;
    };
    if child.height <= 0 {
        return;
    }

    state.row_index = (child.position / host.span_count().max(1)) as i32;
    state.row_top_offset = child.decorated_top as f32 / child.height as f32;

    let metrics = RowMetrics::new(
        geometry.height,
        geometry.padding.top,
        geometry.padding.bottom,
    );
    state.row_height = metrics.row_height(&host.visible_rows(), child.height);
}

/// Repositions the thumb from the list's current scroll position.
///
/// Runs one way only. The caller skips it while a drag owns the thumb.
#[derive(Debug, Default)]
pub struct ScrollSync {
    state: ScrollPositionState,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll state captured by the last [`ScrollSync::update`]
    pub fn state(&self) -> &ScrollPositionState {
        &self.state
    }

    /// Recompute the thumb offset. Returns the region to redraw, if any.
    pub fn update<H: ListHost + ?Sized>(
        &mut self,
        host: &H,
        geometry: &ListGeometry,
        space: &ScrollSpace,
        thumb: &mut ThumbGeometry,
    ) -> Option<Rect> {
        match self.resolve(host, geometry, space, thumb.width()) {
            Some(offset) => thumb.set_offset(offset.x, offset.y),
            None => thumb.hide(),
        }
    }

    /// Sync pass for a thumb left detached by a finished drag.
    ///
    /// The thumb keeps its position unless the list can no longer scroll, in
    /// which case it is hidden like in [`ScrollSync::update`].
    pub fn update_detached<H: ListHost + ?Sized>(
        &mut self,
        host: &H,
        geometry: &ListGeometry,
        space: &ScrollSpace,
        thumb: &mut ThumbGeometry,
    ) -> Option<Rect> {
        match self.resolve(host, geometry, space, thumb.width()) {
            Some(_) => None,
            None => thumb.hide(),
        }
    }

    /// Thumb offset for the list's scroll position, `None` when it must be hidden.
    fn resolve<H: ListHost + ?Sized>(
        &mut self,
        host: &H,
        geometry: &ListGeometry,
        space: &ScrollSpace,
        thumb_width: i32,
    ) -> Option<Point> {
        let rows = row_count(host.item_count(), host.span_count());
        if rows == 0 {
            self.state.reset();
            return None;
        }

        capture_scroll_state(host, geometry, &mut self.state);
        if !self.state.is_laid_out() {
            log::trace!("no laid out rows, hiding thumb");
            return None;
        }

        let y = space.thumb_y(&self.state, rows)?;
        let x = space.thumb_x(geometry.width, thumb_width, geometry.direction.is_rtl());
        Some(Point::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FastScrollConfig;
    use crate::geometry::Padding;
    use crate::host::RowLayout;

    /// 100 px rows with the first visible row scrolled `scrolled` pixels past the top.
    struct StaticList {
        item_count: usize,
        first: usize,
        scrolled: i32,
        laid_out: bool,
    }

    impl StaticList {
        fn rows(&self) -> Vec<RowLayout> {
            if !self.laid_out {
                return Vec::new();
            }
            (self.first..self.item_count)
                .map(|position| {
                    let top = (position - self.first) as i32 * 100 - self.scrolled;
                    RowLayout::new(position, top, 100)
                })
                .take_while(|row| row.decorated_top < 1000)
                .collect()
        }
    }

    impl ListHost for StaticList {
        fn item_count(&self) -> usize {
            self.item_count
        }

        fn geometry(&self) -> ListGeometry {
            ListGeometry::new(500, 1000)
        }

        fn first_visible_row(&self) -> Option<RowLayout> {
            self.rows().first().copied()
        }

        fn visible_rows(&self) -> Vec<RowLayout> {
            self.rows()
        }

        fn scroll_to_position_with_offset(&mut self, _position: usize, _offset: i32) {}

        fn stop_scroll(&mut self) {}
    }

    /// Rows of 50, 150, 300 and 600 px with the top row 40% on screen.
    struct MixedList;

    impl ListHost for MixedList {
        fn item_count(&self) -> usize {
            100
        }

        fn geometry(&self) -> ListGeometry {
            ListGeometry::new(500, 1000)
        }

        fn first_visible_row(&self) -> Option<RowLayout> {
            self.visible_rows().first().copied()
        }

        fn visible_rows(&self) -> Vec<RowLayout> {
            vec![
                RowLayout::new(3, -30, 50),
                RowLayout::new(4, 20, 150),
                RowLayout::new(5, 170, 300),
                RowLayout::new(6, 470, 600),
            ]
        }

        fn scroll_to_position_with_offset(&mut self, _position: usize, _offset: i32) {}

        fn stop_scroll(&mut self) {}
    }

    fn space() -> ScrollSpace {
        ScrollSpace {
            viewport_height: 1000,
            content_padding: Padding::default(),
            track_padding: Padding::default(),
            thumb_height: 72,
        }
    }

    #[test]
    fn test_capture_reads_first_row() {
        let list = StaticList {
            item_count: 100,
            first: 10,
            scrolled: 50,
            laid_out: true,
        };
        let mut state = ScrollPositionState::UNSET;
        capture_scroll_state(&list, &list.geometry(), &mut state);

        assert_eq!(state.row_index, 10);
        assert!((state.row_top_offset + 0.5).abs() < 1e-6);
        assert_eq!(state.row_height, 100);
    }

    #[test]
    fn test_update_places_thumb() {
        let list = StaticList {
            item_count: 100,
            first: 10,
            scrolled: 50,
            laid_out: true,
        };
        let mut thumb = ThumbGeometry::new(&FastScrollConfig::default());
        let mut sync = ScrollSync::new();

        let damage = sync.update(&list, &list.geometry(), &space(), &mut thumb);
        assert!(damage.is_some());
        // 1050 of 9000 scrollable pixels along 928 pixels of track
        assert_eq!(thumb.offset(), Point::new(495, 108));
    }

    #[test]
    fn test_update_hides_before_layout() {
        let list = StaticList {
            item_count: 100,
            first: 0,
            scrolled: 0,
            laid_out: false,
        };
        let mut thumb = ThumbGeometry::new(&FastScrollConfig::default());
        let mut sync = ScrollSync::new();

        assert!(sync.update(&list, &list.geometry(), &space(), &mut thumb).is_none());
        assert!(thumb.is_hidden());
        assert_eq!(*sync.state(), ScrollPositionState::UNSET);
    }

    #[test]
    fn test_update_hides_when_content_fits() {
        let list = StaticList {
            item_count: 5,
            first: 0,
            scrolled: 0,
            laid_out: true,
        };
        let mut thumb = ThumbGeometry::new(&FastScrollConfig::default());
        thumb.set_offset(495, 0);
        let mut sync = ScrollSync::new();

        assert!(sync.update(&list, &list.geometry(), &space(), &mut thumb).is_some());
        assert!(thumb.is_hidden());
    }

    #[test]
    fn test_update_weights_mixed_rows() {
        let list = MixedList;
        let mut thumb = ThumbGeometry::new(&FastScrollConfig::default());
        let mut sync = ScrollSync::new();

        sync.update(&list, &list.geometry(), &space(), &mut thumb);
        let state = sync.state();
        assert_eq!(state.row_index, 3);
        assert!((state.row_top_offset + 0.6).abs() < 1e-6);
        // 1000 px over 3.283 weighted rows
        assert_eq!(state.row_height, 305);
        // 1098 of 29_500 scrollable pixels along 928 pixels of track
        assert_eq!(thumb.offset(), Point::new(495, 34));
    }

    #[test]
    fn test_detached_update_keeps_thumb_while_scrollable() {
        let list = StaticList {
            item_count: 100,
            first: 10,
            scrolled: 50,
            laid_out: true,
        };
        let mut thumb = ThumbGeometry::new(&FastScrollConfig::default());
        thumb.set_offset(495, 300);
        let mut sync = ScrollSync::new();

        assert!(sync.update_detached(&list, &list.geometry(), &space(), &mut thumb).is_none());
        assert_eq!(thumb.offset(), Point::new(495, 300));
        assert_eq!(sync.state().row_index, 10);
    }

    #[test]
    fn test_detached_update_hides_when_content_fits() {
        let list = StaticList {
            item_count: 5,
            first: 0,
            scrolled: 0,
            laid_out: true,
        };
        let mut thumb = ThumbGeometry::new(&FastScrollConfig::default());
        thumb.set_offset(495, 300);
        let mut sync = ScrollSync::new();

        assert!(sync.update_detached(&list, &list.geometry(), &space(), &mut thumb).is_some());
        assert!(thumb.is_hidden());
    }
}
