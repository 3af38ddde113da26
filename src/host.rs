//! The list the fast scroller is attached to.
//!
//! The scroller never owns list rendering or item layout. It reads geometry
//! from a [`ListHost`] and issues scroll commands back through it.

use crate::geometry::Padding;

/// Horizontal layout direction of the host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl LayoutDirection {
    pub fn is_rtl(&self) -> bool {
        matches!(self, LayoutDirection::RightToLeft)
    }
}

/// Scroll state reported by the host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    /// Not scrolling
    #[default]
    Idle,
    /// Scrolling under direct user touch
    Dragging,
    /// Fling or programmatic scroll settling without touch
    Settling,
}

/// Viewport size, content padding and direction of the host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListGeometry {
    pub width: i32,
    pub height: i32,
    /// Content padding of the list, counted as part of its scroll range
    pub padding: Padding,
    pub direction: LayoutDirection,
}

impl ListGeometry {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }
}

/// Layout of one laid-out item.
///
/// `decorated_top` is negative when the item is scrolled above the viewport top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// Adapter position of the item
    pub position: usize,
    pub decorated_top: i32,
    pub decorated_bottom: i32,
    pub height: i32,
}

impl RowLayout {
    pub fn new(position: usize, decorated_top: i32, height: i32) -> Self {
        Self {
            position,
            decorated_top,
            decorated_bottom: decorated_top + height,
            height,
        }
    }
}

/// Capabilities the scroller needs from the host list.
pub trait ListHost {
    /// Number of adapter items
    fn item_count(&self) -> usize;

    /// Columns per row for grid layouts
    fn span_count(&self) -> usize {
        1
    }

    fn geometry(&self) -> ListGeometry;

    /// First laid-out child, or `None` before the first layout pass
    fn first_visible_row(&self) -> Option<RowLayout>;

    /// Every row currently intersecting the viewport, in layout order.
    /// Grid hosts report one entry per row.
    fn visible_rows(&self) -> Vec<RowLayout>;

    /// Place `position` at the top of the viewport, shifted by `offset` pixels
    fn scroll_to_position_with_offset(&mut self, position: usize, offset: i32);

    /// Cancel any fling or smooth scroll in flight
    fn stop_scroll(&mut self);

    /// Section label for the popup. `None` means the adapter has no sections.
    fn section_name(&self, _position: usize) -> Option<String> {
        None
    }

    /// Ask ancestors to stop intercepting the current gesture
    fn request_disallow_intercept(&mut self, _disallow: bool) {}
}
