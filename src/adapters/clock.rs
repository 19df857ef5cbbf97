//! Clock adapters.
//!
//! - `SystemClock` - wall clock for production
//! - `ManualClock` - settable clock for tests and simulations

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Starts at the given Unix milliseconds (epoch if out of range).
    pub fn at_millis(millis: i64) -> Self {
        let start = Timestamp::from_unix_millis(millis)
            .or_else(|| Timestamp::from_unix_millis(0))
            .unwrap_or_default();
        Self::new(start)
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = now.plus(by);
    }

    /// Jumps to an absolute instant.
    pub fn set(&self, to: Timestamp) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_only_when_told() {
        let clock = ManualClock::at_millis(1_000);
        assert_eq!(clock.now().as_unix_millis(), 1_000);
        clock.advance(Duration::from_millis(500));
        assert_eq!(clock.now().as_unix_millis(), 1_500);
    }

    #[test]
    fn manual_clock_set_jumps() {
        let clock = ManualClock::at_millis(0);
        let target = Timestamp::from_unix_millis(42_000).unwrap();
        clock.set(target);
        assert_eq!(clock.now(), target);
    }

    #[test]
    fn system_clock_tracks_wall_time() {
        let before = Timestamp::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }
}
