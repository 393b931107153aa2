//! Wall clock used to gate ordering windows and stamp orders.

use std::sync::Mutex;

use jiff::Zoned;

/// Source of the current local time.
pub trait Clock: Send + Sync {
    /// Current time in the session's time zone.
    fn now(&self) -> Zoned;
}

/// Reads the system clock in the system time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Zoned {
        Zoned::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Zoned>,
}

impl FixedClock {
    /// Create a clock stopped at `now`.
    #[must_use]
    pub fn new(now: Zoned) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock to `now`.
    pub fn set(&self, now: Zoned) {
        *self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Zoned {
        self.now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz::TimeZone};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn fixed_clock_moves_only_when_set() -> TestResult {
        let start = date(2026, 3, 14).at(9, 0, 0, 0).to_zoned(TimeZone::UTC)?;
        let later = date(2026, 3, 14).at(19, 0, 0, 0).to_zoned(TimeZone::UTC)?;
        let clock = FixedClock::new(start.clone());

        assert_eq!(clock.now(), start);

        clock.set(later.clone());

        assert_eq!(clock.now(), later);

        Ok(())
    }
}
