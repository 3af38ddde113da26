//! Touch state machine for dragging the thumb.

use std::time::Instant;

use crate::config::FastScrollConfig;
use crate::geometry::Rect;
use crate::host::{ListGeometry, ListHost};
use crate::mapper::{position_at_fraction, row_count, ScrollPositionState, ScrollSpace};
use crate::popup::{PopupPlacement, PopupState};
use crate::sync::capture_scroll_state;
use crate::thumb::ThumbGeometry;

/// Touch input delivered by the host list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Cancel,
}

/// Where the current gesture stands relative to the thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No gesture, or a gesture that did not start on the thumb
    #[default]
    Idle,
    /// Touch went down on the thumb but has not moved past the touch slop
    Armed,
    /// The thumb follows the finger and drives the list
    Dragging,
}

/// Per-gesture touch bookkeeping, reset on every release.
///
/// Whether the thumb is detached is not kept here: it outlives the gesture,
/// so it lives on [`DragController`] (see [`DragController::is_detached`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragSession {
    pub down_x: i32,
    pub down_y: i32,
    pub last_y: i32,
    /// Distance from the thumb top to the finger, so the thumb does not jump under it
    pub touch_offset: i32,
    pub phase: DragPhase,
    /// Set once the gesture moved past the paging slop; it is then a list scroll
    pub ignore_gesture: bool,
}

impl DragSession {
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }
}

/// What a touch event did to the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragTransition {
    #[default]
    None,
    /// The gesture just became a thumb drag
    Started,
    /// An active drag moved the list
    Moved,
    /// The gesture ended
    Released { was_dragging: bool },
}

/// Outcome of one touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragUpdate {
    pub transition: DragTransition,
    /// Union of the popup and thumb regions that changed
    pub damage: Option<Rect>,
}

/// Everything a drag touches while handling one event.
pub struct DragContext<'a, H: ListHost + ?Sized> {
    pub host: &'a mut H,
    pub geometry: ListGeometry,
    pub space: ScrollSpace,
    pub placement: PopupPlacement,
    pub thumb: &'a mut ThumbGeometry,
    pub popup: &'a mut PopupState,
    pub now: Instant,
}

/// Decides when a touch becomes a thumb drag and maps the finger to a list position.
#[derive(Debug)]
pub struct DragController {
    session: DragSession,
    touch_inset: i32,
    touch_slop: i32,
    paging_touch_slop: i32,
    can_detach: bool,
    /// Survives release until the list scrolls, reattaches or stops being scrollable
    detached: bool,
    /// Thumb top of the last drag move, 0 when not dragging
    last_touch_y: i32,
    scroll_state: ScrollPositionState,
}

impl DragController {
    pub fn new(config: &FastScrollConfig) -> Self {
        Self {
            session: DragSession::default(),
            touch_inset: config.touch_inset,
            touch_slop: config.touch_slop,
            paging_touch_slop: config.paging_touch_slop,
            can_detach: config.detach_on_drag,
            detached: false,
            last_touch_y: 0,
            scroll_state: ScrollPositionState::UNSET,
        }
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn reattach(&mut self) {
        self.detached = false;
    }

    pub fn last_touch_y(&self) -> i32 {
        self.last_touch_y
    }

    pub fn handle<H: ListHost + ?Sized>(
        &mut self,
        event: TouchEvent,
        ctx: &mut DragContext<'_, H>,
    ) -> DragUpdate {
        match event {
            TouchEvent::Down { x, y } => self.on_down(x as i32, y as i32, ctx),
            TouchEvent::Move { y, .. } => self.on_move(y as i32, ctx),
            TouchEvent::Up { .. } | TouchEvent::Cancel => self.on_release(ctx),
        }
    }

    fn on_down<H: ListHost + ?Sized>(
        &mut self,
        x: i32,
        y: i32,
        ctx: &mut DragContext<'_, H>,
    ) -> DragUpdate {
        let mut update = DragUpdate::default();
        if self.session.is_dragging() {
            // A new down without an up for the old gesture ends that drag first.
            update = self.on_release(ctx);
        }

        self.session = DragSession {
            down_x: x,
            down_y: y,
            last_y: y,
            ..Default::default()
        };
        if ctx.thumb.is_near(x, y, self.touch_inset) {
            self.session.touch_offset = y - ctx.thumb.offset().y;
            self.session.phase = DragPhase::Armed;
        }
        update
    }

    fn on_move<H: ListHost + ?Sized>(
        &mut self,
        y: i32,
        ctx: &mut DragContext<'_, H>,
    ) -> DragUpdate {
        let mut update = DragUpdate::default();
        let session = &mut self.session;
        session.last_y = y;

        let moved = (y - session.down_y).abs();
        session.ignore_gesture |= moved > self.paging_touch_slop;

        if session.phase == DragPhase::Armed
            && !session.ignore_gesture
            && ctx.thumb.is_near(session.down_x, session.last_y, self.touch_inset)
            && moved > self.touch_slop
        {
            ctx.host.request_disallow_intercept(true);
            session.phase = DragPhase::Dragging;
            if self.can_detach {
                self.detached = true;
            }
            session.touch_offset += session.last_y - session.down_y;
            ctx.popup.animate_visibility(true, ctx.now);
            update.transition = DragTransition::Started;
            log::debug!(
                "thumb drag started at y={} (touch offset {})",
                y,
                session.touch_offset
            );
        }

        if session.is_dragging() {
            let (top, bottom) = ctx.space.track_bounds();
            let bounded_y = (y - session.touch_offset).min(bottom).max(top);
            let fraction = ctx.space.track_fraction(bounded_y);

            // The scroll target has to land before the label is read from it.
            let label = self.scroll_to_fraction(fraction, ctx);
            let has_label = label.as_deref().is_some_and(|label| !label.is_empty());
            ctx.popup.set_section_label(label);
            ctx.popup.animate_visibility(has_label, ctx.now);

            let popup_damage = ctx.popup.update_bounds(&ctx.placement, self.session.last_y);
            let x = ctx.thumb.offset().x;
            let damage = match ctx.thumb.set_offset(x, bounded_y) {
                Some(thumb_damage) => popup_damage.union(&thumb_damage),
                None => popup_damage,
            };

            self.last_touch_y = bounded_y;
            update.damage = Some(damage);
            if update.transition == DragTransition::None {
                update.transition = DragTransition::Moved;
            }
        }
        update
    }

    fn on_release<H: ListHost + ?Sized>(&mut self, ctx: &mut DragContext<'_, H>) -> DragUpdate {
        let was_dragging = self.session.is_dragging();
        self.session = DragSession::default();
        self.last_touch_y = 0;

        if was_dragging {
            ctx.popup.animate_visibility(false, ctx.now);
            log::debug!("thumb drag released (detached: {})", self.detached);
        }
        DragUpdate {
            transition: DragTransition::Released { was_dragging },
            damage: None,
        }
    }

    /// Move the list to `fraction` of its range and return the section label there.
    fn scroll_to_fraction<H: ListHost + ?Sized>(
        &mut self,
        fraction: f32,
        ctx: &mut DragContext<'_, H>,
    ) -> Option<String> {
        let item_count = ctx.host.item_count();
        if item_count == 0 {
            return None;
        }
        let span_count = ctx.host.span_count().max(1);
        let rows = row_count(item_count, span_count);

        ctx.host.stop_scroll();
        capture_scroll_state(&*ctx.host, &ctx.geometry, &mut self.scroll_state);

        if let Some(command) = ctx.space.scroll_command(
            fraction,
            rows,
            span_count,
            self.scroll_state.row_height,
            item_count,
        ) {
            log::trace!(
                "fast scroll to {} offset {} (fraction {:.3})",
                command.position,
                command.offset,
                fraction
            );
            ctx.host
                .scroll_to_position_with_offset(command.position, command.offset);
        }

        position_at_fraction(fraction, item_count).and_then(|position| ctx.host.section_name(position))
    }
}
