//! 12-hour wall-clock readings and whole-minute offsets.
//!
//! ## Usage
//!
//! Shift a [`WallTime`] by an [`OffsetMinutes`] and format the result:
//!
//! ```
//! use somnia_foundation::{Meridiem, OffsetMinutes, WallTime, format_time};
//!
//! let wake = WallTime::new(6, 30, Meridiem::Am).unwrap();
//! assert_eq!(wake.shifted(OffsetMinutes::from_hours(-9.25)).to_string(), "9:15 PM");
//! assert_eq!(format_time(wake, None), "6:30 AM");
//! ```

use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

/// Minutes in one half day.
pub const HALF_DAY_MINUTES: i32 = 720;

/// AM or PM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Meridiem {
    /// Ante meridiem (midnight to noon).
    Am,
    /// Post meridiem (noon to midnight).
    Pm,
}

impl Meridiem {
    /// Both values in picker order.
    pub const ALL: [Meridiem; 2] = [Meridiem::Am, Meridiem::Pm];

    /// Returns the other half of the day.
    pub fn flip(self) -> Self {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }

    /// `"AM"` or `"PM"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Meridiem {
    type Err = ParseWallTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("am") {
            Ok(Meridiem::Am)
        } else if s.eq_ignore_ascii_case("pm") {
            Ok(Meridiem::Pm)
        } else {
            Err(ParseWallTimeError::Meridiem(s.to_owned()))
        }
    }
}

/// Range violations when building a [`WallTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WallTimeError {
    /// Hour outside `1..=12` (or `0..=23` for 24-hour input).
    #[error("hour {0} is out of range")]
    Hour(u8),
    /// Minute outside `0..=59`.
    #[error("minute {0} is out of range")]
    Minute(u8),
}

/// Failures when parsing text such as `"6:30 AM"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWallTimeError {
    /// The text is not shaped like `H:MM [AM|PM]`.
    #[error("expected a time like \"6:30 AM\" or \"18:30\", got {0:?}")]
    Format(String),
    /// The suffix is neither AM nor PM.
    #[error("unknown meridiem {0:?}")]
    Meridiem(String),
    /// The numbers are out of range.
    #[error(transparent)]
    Range(#[from] WallTimeError),
}

/// A 12-hour clock reading.
///
/// `hours` is always in `1..=12`; hour 0 never exists, midnight is `12:00 AM`
/// and noon is `12:00 PM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallTime {
    hours: u8,
    minutes: u8,
    meridiem: Meridiem,
}

impl WallTime {
    /// Builds a wall time, validating `hours` in `1..=12` and `minutes` in
    /// `0..=59`.
    pub fn new(hours: u8, minutes: u8, meridiem: Meridiem) -> Result<Self, WallTimeError> {
        if !(1..=12).contains(&hours) {
            return Err(WallTimeError::Hour(hours));
        }
        if minutes > 59 {
            return Err(WallTimeError::Minute(minutes));
        }
        Ok(Self {
            hours,
            minutes,
            meridiem,
        })
    }

    /// Builds a wall time in const context.
    ///
    /// Out-of-range input fails const evaluation; use [`WallTime::new`] for
    /// runtime values.
    pub const fn new_const(hours: u8, minutes: u8, meridiem: Meridiem) -> Self {
        assert!(hours >= 1 && hours <= 12, "hour out of range");
        assert!(minutes <= 59, "minute out of range");
        Self {
            hours,
            minutes,
            meridiem,
        }
    }

    /// Converts a 24-hour reading. Hours above 11 are PM; hour 0 becomes 12.
    pub fn from_24h(hour: u8, minute: u8) -> Result<Self, WallTimeError> {
        if hour > 23 {
            return Err(WallTimeError::Hour(hour));
        }
        let (hours, meridiem) = if hour > 11 {
            (hour - 12, Meridiem::Pm)
        } else {
            (hour, Meridiem::Am)
        };
        Self::new(if hours == 0 { 12 } else { hours }, minute, meridiem)
    }

    /// Converts a chrono time of day, dropping seconds.
    pub fn from_naive(time: NaiveTime) -> Self {
        let hour = time.hour();
        let (hours, meridiem) = if hour > 11 {
            (hour - 12, Meridiem::Pm)
        } else {
            (hour, Meridiem::Am)
        };
        Self {
            hours: if hours == 0 { 12 } else { hours as u8 },
            minutes: time.minute() as u8,
            meridiem,
        }
    }

    /// Converts to a chrono time of day with zero seconds.
    pub fn to_naive(&self) -> NaiveTime {
        let hour = u32::from(self.hours % 12)
            + match self.meridiem {
                Meridiem::Am => 0,
                Meridiem::Pm => 12,
            };
        NaiveTime::from_hms_opt(hour, u32::from(self.minutes), 0).unwrap_or(NaiveTime::MIN)
    }

    /// Hour on the 12-hour dial, `1..=12`.
    pub fn hours(&self) -> u8 {
        self.hours
    }

    /// Minute, `0..=59`.
    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    /// AM or PM.
    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Returns a copy with a different hour.
    pub fn with_hours(self, hours: u8) -> Result<Self, WallTimeError> {
        Self::new(hours, self.minutes, self.meridiem)
    }

    /// Returns a copy with a different minute.
    pub fn with_minutes(self, minutes: u8) -> Result<Self, WallTimeError> {
        Self::new(self.hours, minutes, self.meridiem)
    }

    /// Returns a copy with a different meridiem.
    pub fn with_meridiem(self, meridiem: Meridiem) -> Self {
        Self { meridiem, ..self }
    }

    /// Minutes since the start of this half day, `0..720`. `12:xx` counts as
    /// the first hour of its half.
    pub fn minutes_into_half(&self) -> i32 {
        i32::from(self.hours % 12) * 60 + i32::from(self.minutes)
    }

    /// Applies `offset`, wrapping with a 720-minute modulus and flipping the
    /// meridiem once per wrap.
    pub fn shifted(self, offset: OffsetMinutes) -> Self {
        let half = i64::from(HALF_DAY_MINUTES);
        let total = i64::from(self.minutes_into_half()) + i64::from(offset.0);
        let wraps = total.div_euclid(half);
        let within = total.rem_euclid(half);
        let meridiem = if wraps.rem_euclid(2) == 0 {
            self.meridiem
        } else {
            self.meridiem.flip()
        };
        let hours = (within / 60) as u8;
        Self {
            hours: if hours == 0 { 12 } else { hours },
            minutes: (within % 60) as u8,
            meridiem,
        }
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hours, self.minutes, self.meridiem)
    }
}

impl FromStr for WallTime {
    type Err = ParseWallTimeError;

    /// Accepts `"6:30 AM"`, `"6:30pm"`, `"06:30 PM"` and 24-hour `"18:30"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let format_error = || ParseWallTimeError::Format(s.to_owned());

        let split = trimmed
            .char_indices()
            .find(|(_, c)| c.is_ascii_alphabetic())
            .map(|(index, _)| index);
        let (clock, meridiem) = match split {
            Some(index) => {
                let meridiem = trimmed[index..].trim().parse::<Meridiem>()?;
                (trimmed[..index].trim_end(), Some(meridiem))
            }
            None => (trimmed, None),
        };

        let (hours, minutes) = clock.split_once(':').ok_or_else(format_error)?;
        let all_digits = |text: &str| text.bytes().all(|b| b.is_ascii_digit());
        if minutes.len() != 2 || hours.is_empty() || hours.len() > 2 {
            return Err(format_error());
        }
        if !all_digits(hours) || !all_digits(minutes) {
            return Err(format_error());
        }
        let hours: u8 = hours.parse().map_err(|_| format_error())?;
        let minutes: u8 = minutes.parse().map_err(|_| format_error())?;

        let time = match meridiem {
            Some(meridiem) => WallTime::new(hours, minutes, meridiem)?,
            None => WallTime::from_24h(hours, minutes)?,
        };
        Ok(time)
    }
}

/// A signed whole-minute delta. Positive is later.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OffsetMinutes(pub i32);

impl OffsetMinutes {
    /// No offset.
    pub const ZERO: Self = Self(0);

    /// Rounds a fractional hour delta to whole minutes. Non-finite input
    /// saturates (NaN becomes zero).
    pub fn from_hours(hours: f64) -> Self {
        Self((hours * 60.0).round() as i32)
    }

    /// The delta in fractional hours.
    pub fn as_hours(self) -> f64 {
        f64::from(self.0) / 60.0
    }
}

/// Formats `time` shifted by `offset_hours` as `"{h}:{mm} {AM|PM}"`.
///
/// `None` and `Some(0.0)` leave the time unchanged.
pub fn format_time(time: WallTime, offset_hours: Option<f64>) -> String {
    let offset = offset_hours
        .map(OffsetMinutes::from_hours)
        .unwrap_or_default();
    time.shifted(offset).to_string()
}
