//! Sources of "now" for time-window evaluation.

use chrono::{DateTime, Local, TimeZone};

/// Supplies the current instant.
///
/// Calendar windows start at local midnight in the clock's timezone, so the
/// timezone is part of the clock rather than fixed to UTC.
pub trait Clock {
    /// Timezone the calendar windows are computed in.
    type Tz: TimeZone;

    /// Returns the current instant.
    fn now(&self) -> DateTime<Self::Tz>;
}

/// The system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rollcall_query::{Clock, FixedClock};
///
/// let at = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
/// let clock = FixedClock::new(at);
/// assert_eq!(clock.now(), at);
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone> {
    now: DateTime<Tz>,
}

impl<Tz: TimeZone> FixedClock<Tz> {
    pub fn new(now: DateTime<Tz>) -> Self {
        FixedClock { now }
    }
}

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.now.clone()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    type Tz = C::Tz;

    fn now(&self) -> DateTime<C::Tz> {
        (**self).now()
    }
}
