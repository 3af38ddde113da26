use std::time::{Duration, Instant};

/// A single pending "shrink the scrollbar" deadline.
///
/// Scheduling replaces whatever was pending, so only the most recent request
/// can fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HideTimer {
    deadline: Option<Instant>,
}

impl HideTimer {
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true once when the deadline has passed, clearing it.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
