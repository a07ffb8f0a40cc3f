//! Wall-clock source for registration and service timestamps.
//!
//! Records carry local wall-clock time, the way the front desk reads it. Services take the clock
//! as a trait object so tests can pin timestamps.

use chrono::NaiveDateTime;
use std::sync::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock that starts at a given instant.
///
/// Each call to [`Clock::now`] returns the current instant and then advances it by `step`, so a
/// sequence of calls yields strictly increasing timestamps when `step` is positive.
#[derive(Debug)]
pub struct FixedClock {
    instant: Mutex<NaiveDateTime>,
    step: chrono::Duration,
}

impl FixedClock {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self::stepping(instant, chrono::Duration::zero())
    }

    pub fn stepping(instant: NaiveDateTime, step: chrono::Duration) -> Self {
        Self {
            instant: Mutex::new(instant),
            step,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        let mut guard = self.instant.lock().unwrap_or_else(|e| e.into_inner());
        let now = *guard;
        *guard = now + self.step;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn nine_am() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .expect("valid date")
    }

    #[test]
    fn fixed_clock_returns_set_instant() {
        let clock = FixedClock::new(nine_am());
        assert_eq!(clock.now(), nine_am());
        assert_eq!(clock.now(), nine_am());
    }

    #[test]
    fn stepping_clock_advances_between_reads() {
        let clock = FixedClock::stepping(nine_am(), chrono::Duration::minutes(5));
        let first = clock.now();
        let second = clock.now();
        assert_eq!(second - first, chrono::Duration::minutes(5));
    }
}
