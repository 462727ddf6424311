/// Countdown timer for the next automatic transition.
///
/// Holds at most one deadline; the pending deadline is the only cancellable
/// unit in the crate. Driven by the same `advance(dt)` ticks as everything
/// else, so it never touches a wall clock.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scheduler {
    remaining: Option<f64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer `delay_secs` from now, replacing any pending deadline.
    pub fn schedule_in(&mut self, delay_secs: f64) {
        self.remaining = Some(delay_secs);
    }

    /// Drop the pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.remaining.take().is_some()
    }

    pub fn is_scheduled(&self) -> bool {
        self.remaining.is_some()
    }

    /// Seconds until the pending deadline, if any.
    pub fn remaining(&self) -> Option<f64> {
        self.remaining
    }

    /// Advance by `dt` seconds; true exactly once when the deadline passes.
    pub fn tick(&mut self, dt: f64) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let remaining = remaining - dt.max(0.0);
        if remaining <= 0.0 {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(remaining);
            false
        }
    }
}
