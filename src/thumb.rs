//! Thumb position, extents and outline.

use crate::config::FastScrollConfig;
use crate::geometry::{Point, Rect};

/// Animatable visual extents of the thumb and track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbDimensions {
    pub width: i32,
    pub min_width: i32,
    pub max_width: i32,
    pub height: i32,
    /// `max_width - width` with curvature enabled, otherwise 0
    pub curvature: i32,
    pub track_width: i32,
}

/// Thumb outline: a rectangle whose inner edge is a cubic curve.
///
/// The inner edge faces the list content and bulges out by the current
/// curvature, so a shrunk idle thumb reads as a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThumbPath {
    /// Outer top corner, where the path starts
    pub start: Point,
    pub outer_bottom: Point,
    pub inner_bottom: Point,
    pub control1: Point,
    pub control2: Point,
    /// Inner top corner, where the cubic ends before closing
    pub inner_top: Point,
}

impl ThumbPath {
    fn build(offset: Point, dims: &ThumbDimensions, rtl: bool) -> Self {
        let Point { x, y } = offset;
        let (outer, inner, bulge) = if rtl {
            (x, x + dims.width, x + dims.width + dims.curvature)
        } else {
            (x + dims.width, x, x - dims.curvature)
        };
        Self {
            start: Point::new(outer, y),
            outer_bottom: Point::new(outer, y + dims.height),
            inner_bottom: Point::new(inner, y + dims.height),
            control1: Point::new(inner, y + dims.height),
            control2: Point::new(bulge, y + dims.height / 2),
            inner_top: Point::new(inner, y),
        }
    }
}

/// Owns [`ThumbDimensions`] and the thumb offset.
///
/// Every setter returns the region a renderer must redraw: the union of the
/// bounds before and after the change.
#[derive(Debug, Clone)]
pub struct ThumbGeometry {
    offset: Point,
    dims: ThumbDimensions,
    curvature_enabled: bool,
    rtl: bool,
    path: ThumbPath,
}

impl ThumbGeometry {
    pub fn new(config: &FastScrollConfig) -> Self {
        let dims = ThumbDimensions {
            width: config.thumb_min_width,
            min_width: config.thumb_min_width,
            max_width: config.thumb_max_width,
            height: config.thumb_height,
            curvature: config.curvature_for(config.thumb_min_width),
            track_width: config.thumb_min_width,
        };
        let mut thumb = Self {
            offset: Point::HIDDEN,
            dims,
            curvature_enabled: config.curvature_enabled,
            rtl: false,
            path: ThumbPath::default(),
        };
        thumb.update_path();
        thumb
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn dimensions(&self) -> &ThumbDimensions {
        &self.dims
    }

    pub fn path(&self) -> &ThumbPath {
        &self.path
    }

    pub fn is_hidden(&self) -> bool {
        self.offset.is_hidden()
    }

    pub fn width(&self) -> i32 {
        self.dims.width
    }

    pub fn height(&self) -> i32 {
        self.dims.height
    }

    pub fn max_width(&self) -> i32 {
        self.dims.max_width
    }

    /// Thumb rectangle without the curvature bulge
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.offset.x, self.offset.y, self.dims.width, self.dims.height)
    }

    /// Thumb rectangle including the curvature bulge
    pub fn paint_bounds(&self) -> Rect {
        let (left, right) = self.horizontal_extent();
        Rect::new(left, self.offset.y, right, self.offset.y + self.dims.height)
    }

    /// Column the track occupies, spanning the full list height
    pub fn track_bounds(&self, list_height: i32) -> Rect {
        let (left, right) = self.horizontal_extent();
        Rect::new(left, 0, right, list_height)
    }

    /// Whether `(x, y)` falls on the thumb after applying `inset`.
    ///
    /// A negative inset grows the touch target beyond the drawn thumb.
    pub fn is_near(&self, x: i32, y: i32, inset: i32) -> bool {
        if self.is_hidden() {
            return false;
        }
        self.bounds().inset(inset).contains(x, y)
    }

    /// Layout direction decides which edge of the thumb bulges.
    pub fn set_rtl(&mut self, rtl: bool) -> Option<Rect> {
        if self.rtl == rtl {
            return None;
        }
        let before = self.paint_bounds();
        self.rtl = rtl;
        self.update_path();
        Some(before.union(&self.paint_bounds()))
    }

    /// Move the thumb. Returns `None` when the offset is unchanged.
    pub fn set_offset(&mut self, x: i32, y: i32) -> Option<Rect> {
        if self.offset.x == x && self.offset.y == y {
            return None;
        }
        let before = self.paint_bounds();
        self.offset = Point::new(x, y);
        self.update_path();
        Some(before.union(&self.paint_bounds()))
    }

    pub fn hide(&mut self) -> Option<Rect> {
        self.set_offset(Point::HIDDEN.x, Point::HIDDEN.y)
    }

    pub fn set_width(&mut self, width: i32) -> Rect {
        let before = self.paint_bounds();
        self.dims.width = width;
        self.update_path();
        before.union(&self.paint_bounds())
    }

    pub fn set_track_width(&mut self, width: i32, list_height: i32) -> Rect {
        let before = self.track_bounds(list_height);
        self.dims.track_width = width;
        self.update_path();
        before.union(&self.track_bounds(list_height))
    }

    fn horizontal_extent(&self) -> (i32, i32) {
        let x = self.offset.x;
        if self.rtl {
            (x, x + self.dims.width + self.dims.curvature)
        } else {
            (x - self.dims.curvature, x + self.dims.width)
        }
    }

    fn update_path(&mut self) {
        self.dims.curvature = if self.curvature_enabled {
            self.dims.max_width - self.dims.width
        } else {
            0
        };
        self.path = ThumbPath::build(self.offset, &self.dims, self.rtl);
    }
}
