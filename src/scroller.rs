//! The fast scroller attached to one host list.

use std::time::Instant;

use crate::animation::{AnimationState, TimingFunction, Transition};
use crate::config::FastScrollConfig;
use crate::drag::{DragContext, DragController, DragSession, DragTransition, TouchEvent};
use crate::geometry::{Color, Padding, Point, Rect};
use crate::hide::HideTimer;
use crate::host::{ListGeometry, ListHost, ScrollPhase};
use crate::mapper::{ScrollPositionState, ScrollSpace};
use crate::paint::{Canvas, Invalidation, Layers};
use crate::popup::{EstimatedTextMeasurer, PopupPlacement, PopupRecord, PopupState, TextMeasure};
use crate::sync::ScrollSync;
use crate::thumb::ThumbGeometry;

/// Duration of the width and color change between idle and active.
const SCROLLBAR_TRANSITION_MS: f32 = 150.0;

/// Whether the scroller consumed a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Ignored,
    /// The thumb is being dragged; the list must not scroll on this gesture
    Handled,
}

/// Width and color interpolation between the idle and active scrollbar.
#[derive(Debug)]
struct ScrollbarAnimator {
    thumb_width: AnimationState<f32>,
    track_width: AnimationState<f32>,
    thumb_color: AnimationState<Color>,
}

impl ScrollbarAnimator {
    fn new(config: &FastScrollConfig) -> Self {
        let transition = Transition::new(SCROLLBAR_TRANSITION_MS, TimingFunction::AccelerateDecelerate);
        Self {
            thumb_width: AnimationState::new(config.thumb_min_width as f32, transition.clone()),
            track_width: AnimationState::new(config.thumb_min_width as f32, transition.clone()),
            thumb_color: AnimationState::new(config.thumb_inactive_color, transition),
        }
    }

    fn is_animating(&self) -> bool {
        self.thumb_width.is_animating()
            || self.track_width.is_animating()
            || self.thumb_color.is_animating()
    }
}

/// Fast scroll thumb, track and section popup for a [`ListHost`].
///
/// The host forwards its touch, scroll and layout callbacks, calls
/// [`FastScroller::tick`] once per frame while [`FastScroller::is_animating`]
/// or a hide is pending, and redraws the region from
/// [`FastScroller::take_invalidation`].
#[derive(Debug)]
pub struct FastScroller {
    config: FastScrollConfig,
    thumb: ThumbGeometry,
    popup: PopupState,
    drag: DragController,
    sync: ScrollSync,
    animator: ScrollbarAnimator,
    hide_timer: HideTimer,
    /// Whether the scrollbar is expanded or expanding
    active: bool,
    track_padding: Padding,
    scroll_phase: ScrollPhase,
    /// Last vertical scroll step reported by the host
    last_dy: i32,
    geometry: ListGeometry,
    invalidation: Invalidation,
}

impl FastScroller {
    pub fn new(config: FastScrollConfig) -> Self {
        Self::with_measurer(config, Box::new(EstimatedTextMeasurer::default()))
    }

    pub fn with_measurer(config: FastScrollConfig, measurer: Box<dyn TextMeasure>) -> Self {
        let mut scroller = Self {
            thumb: ThumbGeometry::new(&config),
            popup: PopupState::new(&config, measurer),
            drag: DragController::new(&config),
            sync: ScrollSync::new(),
            animator: ScrollbarAnimator::new(&config),
            hide_timer: HideTimer::default(),
            active: false,
            track_padding: Padding::default(),
            scroll_phase: ScrollPhase::Idle,
            last_dy: 0,
            geometry: ListGeometry::default(),
            invalidation: Invalidation::default(),
            config,
        };
        if scroller.config.always_show {
            scroller.active = true;
            let width = scroller.config.thumb_max_width;
            scroller.animator.thumb_width.snap_to(width as f32);
            scroller.animator.track_width.snap_to(width as f32);
            scroller
                .animator
                .thumb_color
                .snap_to(scroller.config.thumb_active_color);
            scroller.thumb.set_width(width);
            scroller.thumb.set_track_width(width, 0);
        }
        scroller
    }

    pub fn config(&self) -> &FastScrollConfig {
        &self.config
    }

    pub fn thumb(&self) -> &ThumbGeometry {
        &self.thumb
    }

    pub fn thumb_offset(&self) -> Point {
        self.thumb.offset()
    }

    pub fn thumb_color(&self) -> Color {
        *self.animator.thumb_color.current()
    }

    pub fn popup(&self) -> &PopupState {
        &self.popup
    }

    pub fn popup_record(&self) -> PopupRecord {
        self.popup.record()
    }

    pub fn drag_session(&self) -> &DragSession {
        self.drag.session()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_thumb_detached(&self) -> bool {
        self.drag.is_detached()
    }

    /// Thumb top of the last drag move, 0 outside a drag
    pub fn last_touch_y(&self) -> i32 {
        self.drag.last_touch_y()
    }

    /// Scroll state captured by the last sync pass
    pub fn scroll_state(&self) -> &ScrollPositionState {
        self.sync.state()
    }

    pub fn is_hide_pending(&self) -> bool {
        self.hide_timer.is_pending()
    }

    pub fn hide_deadline(&self) -> Option<Instant> {
        self.hide_timer.deadline()
    }

    /// Padding of the list background; the track stays inside it.
    pub fn set_track_padding(&mut self, padding: impl Into<Padding>) {
        self.track_padding = padding.into();
    }

    pub fn track_padding(&self) -> Padding {
        self.track_padding
    }

    /// Snap a detached thumb back to the list's scroll position on the next pass.
    pub fn reattach_thumb(&mut self) {
        self.drag.reattach();
    }

    pub fn set_thumb_active_color(&mut self, color: Color) {
        self.config.thumb_active_color = color;
        self.repaint_thumb();
    }

    pub fn set_thumb_inactive_color(&mut self, color: Color) {
        self.config.thumb_inactive_color = color;
        self.repaint_thumb();
    }

    pub fn set_track_color(&mut self, color: Color) {
        self.config.track_color = color;
        let region = self.thumb.track_bounds(self.geometry.height);
        self.invalidation.add(region, Layers::TRACK);
    }

    pub fn set_popup_background_color(&mut self, color: Color) {
        self.config.popup_background_color = color;
        self.popup.set_background_color(color);
    }

    pub fn set_popup_text_color(&mut self, color: Color) {
        self.config.popup_text_color = color;
        self.popup.set_text_color(color);
    }

    /// Drain the region changed since the last call.
    pub fn take_invalidation(&mut self) -> Invalidation {
        std::mem::take(&mut self.invalidation)
    }

    /// Feed one touch event from the host list.
    ///
    /// Returns [`EventResponse::Handled`] while the gesture is a thumb drag.
    pub fn handle_touch<H: ListHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: TouchEvent,
        now: Instant,
    ) -> EventResponse {
        self.refresh_geometry(&*host);

        if matches!(event, TouchEvent::Down { .. }) && self.should_stop_scroll() {
            log::trace!("touch down stops slow scroll (last dy {})", self.last_dy);
            host.stop_scroll();
        }

        let space = self.scroll_space();
        let placement = self.popup_placement();
        let mut ctx = DragContext {
            host,
            geometry: self.geometry,
            space,
            placement,
            thumb: &mut self.thumb,
            popup: &mut self.popup,
            now,
        };
        let update = self.drag.handle(event, &mut ctx);

        if let Some(damage) = update.damage {
            self.invalidation
                .add(damage, Layers::THUMB | Layers::POPUP);
        }
        match update.transition {
            DragTransition::Started => {
                self.hide_timer.cancel();
                self.animate_scrollbar(true, now);
            }
            DragTransition::Released { was_dragging: true } => self.hide_scrollbar(now),
            _ => {}
        }

        if self.drag.is_dragging() {
            EventResponse::Handled
        } else {
            EventResponse::Ignored
        }
    }

    /// The list scrolled by `dy` pixels.
    pub fn on_scrolled<H: ListHost + ?Sized>(&mut self, host: &H, dy: i32) {
        self.last_dy = dy;
        if dy != 0 && !self.drag.is_dragging() && self.drag.is_detached() {
            self.drag.reattach();
        }
        self.update_scrollbar(host);
    }

    /// The list finished a layout or draw pass without scrolling.
    pub fn on_layout<H: ListHost + ?Sized>(&mut self, host: &H) {
        self.update_scrollbar(host);
    }

    /// The list's own scroll state changed.
    pub fn on_scroll_state_changed(&mut self, phase: ScrollPhase, now: Instant) {
        self.scroll_phase = phase;
        if self.config.always_show {
            return;
        }
        match phase {
            ScrollPhase::Dragging => {
                self.hide_timer.cancel();
                self.animate_scrollbar(true, now);
            }
            ScrollPhase::Idle => self.hide_scrollbar(now),
            ScrollPhase::Settling => {}
        }
    }

    /// Advance animations and the hide timer. Returns true while another frame is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.hide_timer.poll(now) && !self.drag.is_dragging() {
            log::debug!("hide delay elapsed, shrinking scrollbar");
            self.animate_scrollbar(false, now);
        }

        if self.animator.thumb_width.advance(now).is_changed() {
            let width = self.animator.thumb_width.current().round() as i32;
            let mut region = self.thumb.set_width(width);
            if !self.thumb.is_hidden() {
                // The outer edge stays put against the track padding.
                let x = self.scroll_space().thumb_x(
                    self.geometry.width,
                    width,
                    self.geometry.direction.is_rtl(),
                );
                let y = self.thumb.offset().y;
                if let Some(moved) = self.thumb.set_offset(x, y) {
                    region = region.union(&moved);
                }
            }
            self.invalidation.add(region, Layers::THUMB);
        }
        if self.animator.track_width.advance(now).is_changed() {
            let width = self.animator.track_width.current().round() as i32;
            let region = self.thumb.set_track_width(width, self.geometry.height);
            self.invalidation.add(region, Layers::TRACK);
        }
        if self.animator.thumb_color.advance(now).is_changed() {
            self.invalidation.add(self.thumb.paint_bounds(), Layers::THUMB);
        }
        if let Some(region) = self.popup.advance(now) {
            self.invalidation.add(region, Layers::POPUP);
        }

        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating() || self.popup.is_animating()
    }

    /// Draw track, thumb and popup. Nothing is drawn while the thumb is hidden.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if self.thumb.is_hidden() {
            return;
        }

        let track_color = self.config.track_color;
        if track_color.a > 0.0 {
            canvas.draw_rect(self.track_rect(), track_color);
        }
        canvas.draw_path(self.thumb.path(), self.thumb_color());

        if let Some(label) = self.popup.section_label().filter(|_| self.popup.is_visible()) {
            let alpha = self.popup.alpha();
            let bg = self.popup.background_bounds();
            canvas.draw_rounded_rect(
                bg,
                self.popup.background_color().multiply_alpha(alpha),
                bg.height() as f32 / 2.0,
            );
            canvas.draw_text(
                label,
                self.popup.text_rect(),
                self.popup.text_color().multiply_alpha(alpha),
                self.popup.text_size(),
            );
        }
    }

    /// Track column aligned to the thumb's outer edge
    fn track_rect(&self) -> Rect {
        let offset = self.thumb.offset();
        let dims = self.thumb.dimensions();
        if self.geometry.direction.is_rtl() {
            Rect::new(offset.x, 0, offset.x + dims.track_width, self.geometry.height)
        } else {
            let right = offset.x + dims.width;
            Rect::new(right - dims.track_width, 0, right, self.geometry.height)
        }
    }

    fn should_stop_scroll(&self) -> bool {
        self.scroll_phase != ScrollPhase::Idle
            && self.last_dy.abs() < self.config.scroll_delta_threshold
    }

    fn update_scrollbar<H: ListHost + ?Sized>(&mut self, host: &H) {
        self.refresh_geometry(host);
        if self.drag.is_dragging() {
            return;
        }
        let space = self.scroll_space();
        let damage = if self.drag.is_detached() {
            let damage = self
                .sync
                .update_detached(host, &self.geometry, &space, &mut self.thumb);
            if self.thumb.is_hidden() {
                log::debug!("list stopped being scrollable, reattaching thumb");
                self.drag.reattach();
            }
            damage
        } else {
            self.sync
                .update(host, &self.geometry, &space, &mut self.thumb)
        };
        if let Some(region) = damage {
            self.invalidation.add(region, Layers::THUMB);
        }
    }

    fn refresh_geometry<H: ListHost + ?Sized>(&mut self, host: &H) {
        self.geometry = host.geometry();
        if let Some(region) = self.thumb.set_rtl(self.geometry.direction.is_rtl()) {
            self.invalidation.add(region, Layers::THUMB);
        }
    }

    fn scroll_space(&self) -> ScrollSpace {
        ScrollSpace {
            viewport_height: self.geometry.height,
            content_padding: self.geometry.padding,
            track_padding: self.track_padding,
            thumb_height: self.thumb.height(),
        }
    }

    fn popup_placement(&self) -> PopupPlacement {
        PopupPlacement {
            list_width: self.geometry.width,
            list_height: self.geometry.height,
            track_padding: self.track_padding,
            max_thumb_width: self.thumb.max_width(),
            direction: self.geometry.direction,
        }
    }

    fn animate_scrollbar(&mut self, active: bool, now: Instant) {
        self.active = active;
        let width = if active {
            self.config.thumb_max_width
        } else {
            self.config.thumb_min_width
        } as f32;
        self.animator.thumb_width.animate_to(width, now);
        self.animator.track_width.animate_to(width, now);

        if self.config.thumb_active_color != self.config.thumb_inactive_color {
            let color = if active {
                self.config.thumb_active_color
            } else {
                self.config.thumb_inactive_color
            };
            self.animator.thumb_color.animate_to(color, now);
        }
    }

    fn hide_scrollbar(&mut self, now: Instant) {
        if self.config.always_show {
            return;
        }
        log::debug!("scheduling scrollbar hide in {:?}", self.config.hide_delay);
        self.hide_timer.schedule(now, self.config.hide_delay);
    }

    fn repaint_thumb(&mut self) {
        if !self.animator.thumb_color.is_animating() {
            let color = if self.active {
                self.config.thumb_active_color
            } else {
                self.config.thumb_inactive_color
            };
            self.animator.thumb_color.snap_to(color);
        }
        self.invalidation.add(self.thumb.paint_bounds(), Layers::THUMB);
    }
}
