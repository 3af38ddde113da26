//! Easing curves for the scrollbar width, thumb color and popup fades.

use std::f32::consts::PI;

/// Maps linear time progress in `0.0..=1.0` to eased value progress.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum TimingFunction {
    /// Constant speed, used for the popup fades
    Linear,
    /// Cosine ease at both ends, the stock curve for property animators
    #[default]
    AccelerateDecelerate,
}

impl TimingFunction {
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            TimingFunction::Linear => t,
            TimingFunction::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}
