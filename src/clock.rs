use std::{cell::Cell, fmt};

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current time for ledger transitions
pub trait Clock: fmt::Debug {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Clone)]
pub struct FixedClock {
    /// The instant reported by `now`
    current: Cell<DateTime<Utc>>,
}

impl FixedClock {
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { current: Cell::new(start) }
    }

    /// Move the clock forward by `delta`, saturating at the maximum instant
    pub fn advance(&self, delta: TimeDelta) {
        let next = self.current.get().checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.current.set(next);
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.current.set(instant);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.current.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};

    use super::{Clock, FixedClock};

    #[test]
    fn test_fixed_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).single().unwrap_or_default();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(TimeDelta::days(2));
        assert_eq!(clock.now().signed_duration_since(start), TimeDelta::days(2));
    }
}
