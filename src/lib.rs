//! Fast scroll thumb, track and section popup for scrollable lists.
//!
//! The crate owns no widget tree. A host list implements [`host::ListHost`]
//! and forwards its touch, scroll, layout and frame callbacks to a
//! [`FastScroller`], then paints it through a [`paint::Canvas`].

pub mod animation;
pub mod config;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod hide;
pub mod host;
pub mod mapper;
pub mod paint;
pub mod popup;
pub mod row_metrics;
pub mod scroller;
pub mod sync;
pub mod thumb;

pub use config::{FastScrollConfig, FastScrollConfigBuilder};
pub use error::ConfigError;
pub use scroller::{EventResponse, FastScroller};

pub mod prelude {
    pub use crate::animation::{Animatable, AnimationState, TimingFunction, Transition};
    pub use crate::config::{FastScrollConfig, FastScrollConfigBuilder};
    pub use crate::drag::{DragPhase, DragSession, TouchEvent};
    pub use crate::error::ConfigError;
    pub use crate::geometry::{Color, Padding, Point, Rect};
    pub use crate::host::{LayoutDirection, ListGeometry, ListHost, RowLayout, ScrollPhase};
    pub use crate::mapper::{ScrollCommand, ScrollPositionState};
    pub use crate::paint::{Canvas, Invalidation, Layers};
    #[cfg(feature = "cosmic-text")]
    pub use crate::popup::CosmicTextMeasurer;
    pub use crate::popup::{EstimatedTextMeasurer, PopupRecord, TextMeasure, TextSize};
    pub use crate::scroller::{EventResponse, FastScroller};
    pub use crate::thumb::{ThumbDimensions, ThumbPath};
}
