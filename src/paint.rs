//! Drawing surface and damage tracking.

use bitflags::bitflags;

use crate::geometry::{Color, Rect};
use crate::thumb::ThumbPath;

bitflags! {
    /// Layers of the fast scroller touched since the last drain
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct Layers: u8 {
        const THUMB = 0b001;
        const TRACK = 0b010;
        const POPUP = 0b100;
    }
}

/// Accumulated region the host must redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Invalidation {
    pub region: Rect,
    pub layers: Layers,
}

impl Invalidation {
    pub fn add(&mut self, region: Rect, layers: Layers) {
        if region.is_empty() {
            return;
        }
        self.region = self.region.union(&region);
        self.layers |= layers;
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Primitives the host renderer exposes to the fast scroller.
pub trait Canvas {
    fn draw_rect(&mut self, rect: Rect, color: Color);

    fn draw_path(&mut self, path: &ThumbPath, color: Color);

    fn draw_rounded_rect(&mut self, rect: Rect, color: Color, radius: f32);

    /// Draw `text` centred in `rect`
    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, font_size: f32);
}
