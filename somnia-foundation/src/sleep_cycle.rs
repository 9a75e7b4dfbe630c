//! Bedtime and wake-up suggestions from whole sleep cycles.
//!
//! A suggestion sits a whole number of sleep cycles plus the time it takes to
//! fall asleep away from an anchor time. With the defaults (90-minute cycles,
//! 15 minutes to fall asleep, six suggestions) bedtimes are offset by
//! `-9.25, -7.75, -6.25, -4.75, -3.25, -1.75` hours from the wake time and
//! wake times by `9.25, 7.75, 6.25, 4.75, 3.25, 1.75` hours from now.
//!
//! ## Usage
//!
//! ```
//! use somnia_foundation::{Meridiem, WallTime, compute_bedtime_suggestions};
//!
//! let wake = WallTime::new(6, 30, Meridiem::Am).unwrap();
//! let bedtimes = compute_bedtime_suggestions(wake);
//! assert_eq!(bedtimes.first().map(String::as_str), Some("9:15 PM"));
//! assert_eq!(bedtimes.len(), 6);
//! ```

use thiserror::Error;
use tracing::debug;

use crate::{
    clock::current_wall_time,
    wall_time::{OffsetMinutes, WallTime},
};

/// Upper bound for [`SleepCycleConfig::cycle_hours`] and
/// [`SleepCycleConfig::fall_asleep_hours`].
pub const MAX_CONFIG_HOURS: f64 = 24.0;

/// Upper bound for [`SleepCycleConfig::suggestion_count`].
pub const MAX_SUGGESTIONS: usize = 48;

/// Invalid [`SleepCycleConfig`] values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Cycle length must be in `(0, 24]` hours.
    #[error("cycle length must be between 0 and 24 hours, got {0}")]
    CycleHours(f64),
    /// Fall-asleep latency must be in `[0, 24]` hours.
    #[error("fall-asleep time must be between 0 and 24 hours, got {0}")]
    FallAsleepHours(f64),
    /// At least one suggestion is required.
    #[error("at least one suggestion is required")]
    NoSuggestions,
    /// More suggestions than [`MAX_SUGGESTIONS`].
    #[error("at most 48 suggestions are supported, got {0}")]
    TooManySuggestions(usize),
    /// More recommended entries than suggestions.
    #[error("{recommended} recommended entries exceed {count} suggestions")]
    Recommended {
        /// Configured recommended count.
        recommended: usize,
        /// Configured suggestion count.
        count: usize,
    },
}

/// Which way suggestions point from the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    /// Earlier than the anchor: bedtimes for a wake time.
    Bedtime,
    /// Later than the anchor: wake times for a bedtime.
    WakeUp,
}

/// Sleep-cycle parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct SleepCycleConfig {
    /// Length of one sleep cycle in hours.
    pub cycle_hours: f64,
    /// Time it takes to fall asleep in hours.
    pub fall_asleep_hours: f64,
    /// Number of suggestions produced.
    pub suggestion_count: usize,
    /// How many of the first suggestions are flagged as recommended.
    pub recommended_count: usize,
}

impl Default for SleepCycleConfig {
    fn default() -> Self {
        Self {
            cycle_hours: 1.5,
            fall_asleep_hours: 0.25,
            suggestion_count: 6,
            recommended_count: 2,
        }
    }
}

impl SleepCycleConfig {
    /// Checks the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // NaN fails both range checks
        if !(self.cycle_hours > 0.0 && self.cycle_hours <= MAX_CONFIG_HOURS) {
            return Err(ConfigError::CycleHours(self.cycle_hours));
        }
        if !(0.0..=MAX_CONFIG_HOURS).contains(&self.fall_asleep_hours) {
            return Err(ConfigError::FallAsleepHours(self.fall_asleep_hours));
        }
        if self.suggestion_count == 0 {
            return Err(ConfigError::NoSuggestions);
        }
        if self.suggestion_count > MAX_SUGGESTIONS {
            return Err(ConfigError::TooManySuggestions(self.suggestion_count));
        }
        if self.recommended_count > self.suggestion_count {
            return Err(ConfigError::Recommended {
                recommended: self.recommended_count,
                count: self.suggestion_count,
            });
        }
        Ok(())
    }

    /// Offsets in hours, most cycles first.
    ///
    /// Entry `i` is `(count - i) * cycle + fall_asleep`, negated for
    /// [`CycleDirection::Bedtime`].
    pub fn offset_hours(&self, direction: CycleDirection) -> Vec<f64> {
        let count = self.suggestion_count;
        (0..count)
            .map(|i| {
                let cycles = (count - i) as f64;
                match direction {
                    CycleDirection::Bedtime => cycles * -self.cycle_hours - self.fall_asleep_hours,
                    CycleDirection::WakeUp => cycles * self.cycle_hours + self.fall_asleep_hours,
                }
            })
            .collect()
    }

    /// Suggested times around `anchor`, in offset order.
    pub fn suggested_times(&self, anchor: WallTime, direction: CycleDirection) -> Vec<WallTime> {
        let times: Vec<WallTime> = self
            .offset_hours(direction)
            .into_iter()
            .map(|hours| anchor.shifted(OffsetMinutes::from_hours(hours)))
            .collect();
        debug!(%anchor, ?direction, count = times.len(), "computed sleep-cycle suggestions");
        times
    }

    /// Bedtimes for waking at `wake_time`, earliest first.
    pub fn bedtime_suggestions(&self, wake_time: WallTime) -> Vec<String> {
        self.suggested_times(wake_time, CycleDirection::Bedtime)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Wake times for falling asleep from `anchor`, latest first.
    pub fn wake_suggestions(&self, anchor: WallTime) -> Vec<String> {
        self.suggested_times(anchor, CycleDirection::WakeUp)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

/// Six bedtimes for waking at `wake_time`, offsets `-9.25` to `-1.75` hours.
pub fn compute_bedtime_suggestions(wake_time: WallTime) -> Vec<String> {
    SleepCycleConfig::default().bedtime_suggestions(wake_time)
}

/// Six wake times for going to bed now, offsets `9.25` to `1.75` hours from
/// the system clock.
pub fn compute_wake_suggestions() -> Vec<String> {
    compute_wake_suggestions_from(current_wall_time())
}

/// Six wake times for going to bed at `anchor`.
pub fn compute_wake_suggestions_from(anchor: WallTime) -> Vec<String> {
    SleepCycleConfig::default().wake_suggestions(anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wall_time::Meridiem;

    fn t(hours: u8, minutes: u8, meridiem: Meridiem) -> WallTime {
        WallTime::new(hours, minutes, meridiem).expect("valid test time")
    }

    #[test]
    fn default_offsets_match_the_cycle_table() {
        let config = SleepCycleConfig::default();
        assert_eq!(
            config.offset_hours(CycleDirection::Bedtime),
            vec![-9.25, -7.75, -6.25, -4.75, -3.25, -1.75]
        );
        assert_eq!(
            config.offset_hours(CycleDirection::WakeUp),
            vec![9.25, 7.75, 6.25, 4.75, 3.25, 1.75]
        );
    }

    #[test]
    fn bedtimes_for_six_thirty() {
        assert_eq!(
            compute_bedtime_suggestions(t(6, 30, Meridiem::Am)),
            vec!["9:15 PM", "10:45 PM", "12:15 AM", "1:45 AM", "3:15 AM", "4:45 AM"]
        );
    }

    #[test]
    fn wake_times_for_eleven_pm() {
        assert_eq!(
            compute_wake_suggestions_from(t(11, 0, Meridiem::Pm)),
            vec!["8:15 AM", "6:45 AM", "5:15 AM", "3:45 AM", "2:15 AM", "12:45 AM"]
        );
    }

    #[test]
    fn always_six_bedtimes_in_offset_order() {
        let config = SleepCycleConfig::default();
        let offsets = config.offset_hours(CycleDirection::Bedtime);
        assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));

        for meridiem in Meridiem::ALL {
            for hours in 1..=12 {
                for minutes in (0..60).step_by(7) {
                    let wake = t(hours, minutes, meridiem);
                    let bedtimes = compute_bedtime_suggestions(wake);
                    assert_eq!(bedtimes.len(), 6);
                    // the last bedtime is 1h45 before waking
                    assert_eq!(bedtimes[5], wake.shifted(OffsetMinutes(-105)).to_string());
                }
            }
        }
    }

    #[test]
    fn wake_suggestions_from_system_clock_has_six_entries() {
        assert_eq!(compute_wake_suggestions().len(), 6);
    }

    #[test]
    fn custom_cycle_length_changes_spacing() {
        let config = SleepCycleConfig {
            cycle_hours: 1.0,
            fall_asleep_hours: 0.0,
            suggestion_count: 3,
            recommended_count: 1,
        };
        assert_eq!(
            config.bedtime_suggestions(t(7, 0, Meridiem::Am)),
            vec!["4:00 AM", "5:00 AM", "6:00 AM"]
        );
    }

    #[test]
    fn validation_rejects_nonsense() {
        let mut config = SleepCycleConfig::default();
        assert_eq!(config.validate(), Ok(()));

        config.cycle_hours = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::CycleHours(0.0)));

        config = SleepCycleConfig {
            fall_asleep_hours: -0.5,
            ..SleepCycleConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::FallAsleepHours(-0.5)));

        config = SleepCycleConfig {
            suggestion_count: 0,
            recommended_count: 0,
            ..SleepCycleConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoSuggestions));

        config = SleepCycleConfig {
            suggestion_count: 1,
            ..SleepCycleConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Recommended {
                recommended: 2,
                count: 1
            })
        );
    }

    #[test]
    fn validation_bounds_runaway_values() {
        let huge_cycle = SleepCycleConfig {
            cycle_hours: 1.0e9,
            ..SleepCycleConfig::default()
        };
        assert_eq!(huge_cycle.validate(), Err(ConfigError::CycleHours(1.0e9)));
        // suggestions stay well-formed even when validation is skipped
        assert_eq!(huge_cycle.wake_suggestions(t(6, 30, Meridiem::Am)).len(), 6);

        let nan_cycle = SleepCycleConfig {
            cycle_hours: f64::NAN,
            ..SleepCycleConfig::default()
        };
        assert!(matches!(nan_cycle.validate(), Err(ConfigError::CycleHours(_))));

        let slow_sleeper = SleepCycleConfig {
            fall_asleep_hours: 25.0,
            ..SleepCycleConfig::default()
        };
        assert_eq!(slow_sleeper.validate(), Err(ConfigError::FallAsleepHours(25.0)));

        let longest = SleepCycleConfig {
            cycle_hours: MAX_CONFIG_HOURS,
            fall_asleep_hours: MAX_CONFIG_HOURS,
            suggestion_count: MAX_SUGGESTIONS,
            ..SleepCycleConfig::default()
        };
        assert_eq!(longest.validate(), Ok(()));

        let too_many = SleepCycleConfig {
            suggestion_count: 10_000,
            ..SleepCycleConfig::default()
        };
        assert_eq!(too_many.validate(), Err(ConfigError::TooManySuggestions(10_000)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialises_partial_toml() {
        let config: SleepCycleConfig =
            toml::from_str("cycle_hours = 1.25\n").expect("valid toml");
        assert_eq!(config.cycle_hours, 1.25);
        assert_eq!(config.suggestion_count, 6);
    }
}
