//! Time-sampled interpolation for the scrollbar width, thumb color and popup alpha.
//!
//! Nothing here owns a clock. Callers pass the frame's `Instant` to
//! [`AnimationState::animate_to`] and [`AnimationState::advance`], so every value
//! is a pure function of elapsed time.

mod animatable;
mod timing;

use std::time::Instant;

pub use animatable::Animatable;
pub use timing::TimingFunction;

/// Configuration for how a property should animate when it changes
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the animation in milliseconds
    pub duration_ms: f32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
    /// Delay before animation starts in milliseconds
    pub delay_ms: f32,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
        }
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(150.0, TimingFunction::AccelerateDecelerate)
    }
}

/// Result of advancing an animation, indicating whether the value changed
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult<T> {
    /// Value did not change (animation not running or same value)
    NoChange,
    /// Value changed to a new value
    Changed(T),
}

impl<T> AdvanceResult<T> {
    /// Returns true if the value changed
    pub fn is_changed(&self) -> bool {
        matches!(self, AdvanceResult::Changed(_))
    }
}

/// Interpolation state for one animatable property
#[derive(Debug)]
pub struct AnimationState<T: Animatable> {
    current: T,
    target: T,
    /// Value when the running animation started
    start: T,
    /// Progress from 0.0 to 1.0
    progress: f32,
    start_time: Option<Instant>,
    transition: Transition,
}

impl<T: Animatable> AnimationState<T> {
    pub fn new(initial_value: T, transition: Transition) -> Self {
        Self {
            current: initial_value.clone(),
            target: initial_value.clone(),
            start: initial_value,
            progress: 1.0,
            start_time: None,
            transition,
        }
    }

    /// Start animating from the current value toward `new_target`.
    ///
    /// Retargeting mid-flight restarts from wherever the value currently is,
    /// which cancels the previous run.
    pub fn animate_to(&mut self, new_target: T, now: Instant) {
        if new_target == self.target {
            return;
        }

        self.start = self.current.clone();
        self.target = new_target;
        self.progress = 0.0;
        self.start_time = Some(now);
    }

    /// Swap the transition used by the next `animate_to`.
    pub fn set_transition(&mut self, transition: Transition) {
        self.transition = transition;
    }

    /// Sample the animation at `now`.
    pub fn advance(&mut self, now: Instant) -> AdvanceResult<T> {
        if self.progress >= 1.0 {
            return AdvanceResult::NoChange;
        }
        let Some(start_time) = self.start_time else {
            return AdvanceResult::NoChange;
        };

        let elapsed = now.saturating_duration_since(start_time).as_secs_f32() * 1000.0;
        let adjusted_elapsed = (elapsed - self.transition.delay_ms).max(0.0);
        if adjusted_elapsed <= 0.0 {
            return AdvanceResult::NoChange;
        }

        let t = if self.transition.duration_ms <= 0.0 {
            1.0
        } else {
            (adjusted_elapsed / self.transition.duration_ms).min(1.0)
        };
        self.progress = t;

        let new_value = if t >= 1.0 {
            self.target.clone()
        } else {
            T::lerp(&self.start, &self.target, self.transition.timing.evaluate(t))
        };

        if new_value == self.current {
            return AdvanceResult::NoChange;
        }
        self.current = new_value.clone();
        AdvanceResult::Changed(new_value)
    }

    /// Check if animation is still running
    pub fn is_animating(&self) -> bool {
        self.progress < 1.0
    }

    /// Get current value
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Get target value
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Jump straight to `value`, dropping any running animation
    pub fn snap_to(&mut self, value: T) {
        self.current = value.clone();
        self.target = value.clone();
        self.start = value;
        self.progress = 1.0;
        self.start_time = None;
    }
}
