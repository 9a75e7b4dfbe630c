//! Time math behind the somnia sleep calculator.
//!
//! Everything here is pure: [`WallTime`] is a 12-hour clock reading,
//! [`OffsetMinutes`] shifts it with wrap-around at noon and midnight, and
//! [`SleepCycleConfig`] turns an anchor time into bedtime or wake-up
//! suggestions. The only impure input is the time of day, which goes through
//! [`Clock`].
//!
//! ```
//! use somnia_foundation::{FixedClock, compute_wake_suggestions_from, current_wall_time_from};
//!
//! let clock = FixedClock::at(23, 0).unwrap();
//! let now = current_wall_time_from(&clock);
//! assert_eq!(now.to_string(), "11:00 PM");
//! assert_eq!(compute_wake_suggestions_from(now)[0], "8:15 AM");
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod clock;
pub mod sleep_cycle;
pub mod wall_time;

pub use crate::{
    clock::{Clock, FixedClock, SystemClock, current_wall_time, current_wall_time_from},
    sleep_cycle::{
        ConfigError, CycleDirection, MAX_CONFIG_HOURS, MAX_SUGGESTIONS, SleepCycleConfig,
        compute_bedtime_suggestions, compute_wake_suggestions, compute_wake_suggestions_from,
    },
    wall_time::{
        HALF_DAY_MINUTES, Meridiem, OffsetMinutes, ParseWallTimeError, WallTime, WallTimeError,
        format_time,
    },
};
