//! Cancellable dwell timer for the guided tour.
//!
//! Each scheduled advance gets a fresh [`AdvanceToken`]. Scheduling again or
//! cancelling invalidates the previous token, so a superseded advance can
//! never fire. The timer is frame-driven: [`AdvanceTimer::tick`] counts the
//! delay down with the frame delta.

/// Identifies one scheduled advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AdvanceToken(u64);

#[derive(Clone, Copy, Debug)]
struct Pending {
    token: AdvanceToken,
    remaining: f32,
}

/// At most one pending advance, identified by token.
#[derive(Clone, Debug, Default)]
pub struct AdvanceTimer {
    next_token: u64,
    pending: Option<Pending>,
}

impl AdvanceTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an advance after `delay` seconds, replacing any pending one.
    pub fn schedule(&mut self, delay: f32) -> AdvanceToken {
        let token = AdvanceToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(Pending {
            token,
            remaining: delay.max(0.0),
        });
        token
    }

    /// Drop the pending advance, returning its token if there was one.
    pub fn cancel(&mut self) -> Option<AdvanceToken> {
        self.pending.take().map(|p| p.token)
    }

    /// Compare-and-clear: cancel only if `token` is still the pending one.
    pub fn cancel_token(&mut self, token: AdvanceToken) -> bool {
        if self.pending_token() == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending_token(&self) -> Option<AdvanceToken> {
        self.pending.map(|p| p.token)
    }

    /// Seconds left on the pending advance.
    #[must_use]
    pub fn remaining(&self) -> Option<f32> {
        self.pending.map(|p| p.remaining)
    }

    /// Advance time by `dt`. Returns the token exactly once, on the frame the
    /// delay elapses.
    pub fn tick(&mut self, dt: f32) -> Option<AdvanceToken> {
        let pending = self.pending.as_mut()?;
        pending.remaining -= dt;
        if pending.remaining <= 0.0 {
            self.cancel()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let mut timer = AdvanceTimer::new();
        let token = timer.schedule(3.0);
        assert_eq!(timer.tick(1.0), None);
        assert_eq!(timer.tick(1.5), None);
        assert_eq!(timer.tick(0.6), Some(token));
        assert_eq!(timer.tick(10.0), None);
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_reschedule_supersedes_previous() {
        let mut timer = AdvanceTimer::new();
        let first = timer.schedule(1.0);
        let second = timer.schedule(2.0);
        assert_ne!(first, second);
        assert!(!timer.cancel_token(first));
        assert_eq!(timer.tick(1.5), None);
        assert_eq!(timer.tick(0.5), Some(second));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut timer = AdvanceTimer::new();
        let token = timer.schedule(0.5);
        assert_eq!(timer.cancel(), Some(token));
        assert_eq!(timer.tick(1.0), None);
    }

    #[test]
    fn test_cancel_token_matches_pending() {
        let mut timer = AdvanceTimer::new();
        let token = timer.schedule(0.5);
        assert!(timer.cancel_token(token));
        assert!(!timer.is_pending());
        assert_eq!(timer.remaining(), None);
    }

    #[test]
    fn test_zero_delay_fires_on_next_tick() {
        let mut timer = AdvanceTimer::new();
        let token = timer.schedule(0.0);
        assert_eq!(timer.tick(0.0), Some(token));
    }
}
