//! Time-of-day sources.
//!
//! Suggestions anchored on "now" read the time through a [`Clock`] so callers
//! can swap the system clock for a fixed one.

use chrono::{Local, NaiveTime};

use crate::wall_time::WallTime;

/// Something that knows the local time of day.
pub trait Clock: Send + Sync {
    /// The current local time of day.
    fn time_of_day(&self) -> NaiveTime;
}

/// The host's local clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn time_of_day(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// A clock stopped at one time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    /// A clock stopped at `hour:minute` (24-hour). Out-of-range input yields
    /// `None`.
    pub fn at(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }
}

impl Clock for FixedClock {
    fn time_of_day(&self) -> NaiveTime {
        self.0
    }
}

/// Reads the system clock as a 12-hour [`WallTime`]. Midnight reads as
/// `12:xx AM`.
pub fn current_wall_time() -> WallTime {
    current_wall_time_from(&SystemClock)
}

/// Reads `clock` as a 12-hour [`WallTime`].
pub fn current_wall_time_from(clock: &dyn Clock) -> WallTime {
    WallTime::from_naive(clock.time_of_day())
}
