//! Sleep calculator view: a time picker plus bedtime and wake-up results.
//!
//! ## Usage
//!
//! ```
//! use somnia_components::sleep_calculator::{
//!     CalculationMode, CalculatorView, SleepCalculator, SleepCalculatorArgs,
//! };
//!
//! let mut calculator = SleepCalculator::new(SleepCalculatorArgs::default()).unwrap();
//! let view = calculator.calculate_bedtime();
//! assert_eq!(view.mode(), Some(CalculationMode::Bedtime));
//! assert_eq!(view.entries()[0].text, "9:15 PM");
//!
//! calculator.go_back();
//! assert_eq!(calculator.view(), &CalculatorView::Picker);
//! ```

use std::sync::Arc;

use derive_setters::Setters;
use somnia_foundation::{
    Clock, ConfigError, CycleDirection, SleepCycleConfig, SystemClock, WallTime,
    current_wall_time_from,
};
use somnia_ui::{CursorEvent, Document, EventFlow, InputHandler};
use tracing::debug;

use crate::time_picker::{TimePicker, TimePickerArgs};

/// Which question the results answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationMode {
    /// When to go to bed to wake at the picked time.
    Bedtime,
    /// When to wake when going to bed now.
    WakeUp,
}

impl From<CalculationMode> for CycleDirection {
    fn from(mode: CalculationMode) -> Self {
        match mode {
            CalculationMode::Bedtime => CycleDirection::Bedtime,
            CalculationMode::WakeUp => CycleDirection::WakeUp,
        }
    }
}

/// One suggested time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionEntry {
    /// Formatted time, e.g. `"9:15 PM"`.
    pub text: String,
    /// Whether the entry is highlighted as a recommended choice.
    pub recommended: bool,
}

/// What the calculator shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CalculatorView {
    /// The time picker with its calculate actions.
    #[default]
    Picker,
    /// Suggestions for `anchor`.
    Results {
        /// Which calculation produced the entries.
        mode: CalculationMode,
        /// The picked wake time or the bedtime read from the clock.
        anchor: WallTime,
        /// Suggestions in offset order.
        entries: Vec<SuggestionEntry>,
    },
}

impl CalculatorView {
    /// The calculation mode when showing results.
    pub fn mode(&self) -> Option<CalculationMode> {
        match self {
            CalculatorView::Picker => None,
            CalculatorView::Results { mode, .. } => Some(*mode),
        }
    }

    /// The suggestions, empty when showing the picker.
    pub fn entries(&self) -> &[SuggestionEntry] {
        match self {
            CalculatorView::Picker => &[],
            CalculatorView::Results { entries, .. } => entries,
        }
    }
}

/// Arguments for [`SleepCalculator`].
#[derive(Clone, Setters)]
pub struct SleepCalculatorArgs {
    /// Time picker configuration, including the initial wake time.
    pub picker: TimePickerArgs,
    /// Sleep-cycle parameters.
    pub config: SleepCycleConfig,
    /// Source of "now" for wake-up suggestions.
    #[setters(skip)]
    pub clock: Arc<dyn Clock>,
}

impl SleepCalculatorArgs {
    /// Replaces the clock.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}

impl Default for SleepCalculatorArgs {
    fn default() -> Self {
        Self {
            picker: TimePickerArgs::default(),
            config: SleepCycleConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

/// The sleep calculator state machine.
pub struct SleepCalculator {
    picker: TimePicker,
    view: CalculatorView,
    config: SleepCycleConfig,
    clock: Arc<dyn Clock>,
}

impl SleepCalculator {
    /// Creates a calculator showing the picker.
    pub fn new(args: SleepCalculatorArgs) -> Result<Self, ConfigError> {
        args.config.validate()?;
        Ok(Self {
            picker: TimePicker::new(args.picker),
            view: CalculatorView::Picker,
            config: args.config,
            clock: args.clock,
        })
    }

    /// The time picker.
    pub fn picker(&self) -> &TimePicker {
        &self.picker
    }

    /// The time picker, for relayout.
    pub fn picker_mut(&mut self) -> &mut TimePicker {
        &mut self.picker
    }

    /// Sleep-cycle parameters in use.
    pub fn config(&self) -> &SleepCycleConfig {
        &self.config
    }

    /// What the calculator currently shows.
    pub fn view(&self) -> &CalculatorView {
        &self.view
    }

    /// Shows bedtimes for waking at the picked time.
    pub fn calculate_bedtime(&mut self) -> &CalculatorView {
        let anchor = self.picker.time();
        self.show_results(CalculationMode::Bedtime, anchor)
    }

    /// Shows wake times for going to bed now.
    pub fn calculate_wake_up(&mut self) -> &CalculatorView {
        let anchor = current_wall_time_from(self.clock.as_ref());
        self.show_results(CalculationMode::WakeUp, anchor)
    }

    /// Returns to the picker and drops the results.
    pub fn go_back(&mut self) {
        self.picker.cancel_drag();
        self.view = CalculatorView::Picker;
        debug!("sleep calculator back to picker");
    }

    fn show_results(&mut self, mode: CalculationMode, anchor: WallTime) -> &CalculatorView {
        // the picker is hidden, so a drag started on it must not keep editing
        self.picker.cancel_drag();
        let entries = self
            .config
            .suggested_times(anchor, mode.into())
            .into_iter()
            .enumerate()
            .map(|(index, time)| SuggestionEntry {
                text: time.to_string(),
                recommended: index < self.config.recommended_count,
            })
            .collect();
        debug!(?mode, %anchor, "sleep calculator showing results");
        self.view = CalculatorView::Results {
            mode,
            anchor,
            entries,
        };
        &self.view
    }
}

impl InputHandler for SleepCalculator {
    fn handle_input(&self, event: &CursorEvent, document: &Document) -> EventFlow {
        match self.view {
            CalculatorView::Picker => self.picker.handle_input(event, document),
            CalculatorView::Results { .. } => EventFlow::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use somnia_foundation::{FixedClock, Meridiem};
    use somnia_ui::{PointerSource, Px, PxPosition};

    use super::*;

    fn calculator_at(hour: u32, minute: u32) -> SleepCalculator {
        let clock = FixedClock::at(hour, minute).expect("valid clock");
        SleepCalculator::new(SleepCalculatorArgs::default().clock(clock)).expect("valid config")
    }

    #[test]
    fn starts_on_picker_with_default_time() {
        let calculator = calculator_at(12, 0);
        assert_eq!(calculator.view(), &CalculatorView::Picker);
        assert_eq!(calculator.picker().time().to_string(), "6:30 AM");
        assert!(calculator.view().entries().is_empty());
    }

    #[test]
    fn bedtime_results_flag_first_two() {
        let mut calculator = calculator_at(12, 0);
        let view = calculator.calculate_bedtime();
        let texts: Vec<&str> = view.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(
            texts,
            ["9:15 PM", "10:45 PM", "12:15 AM", "1:45 AM", "3:15 AM", "4:45 AM"]
        );
        let flags: Vec<bool> = view.entries().iter().map(|e| e.recommended).collect();
        assert_eq!(flags, [true, true, false, false, false, false]);
    }

    #[test]
    fn wake_up_reads_the_clock() {
        let mut calculator = calculator_at(0, 10);
        match calculator.calculate_wake_up() {
            CalculatorView::Results {
                mode,
                anchor,
                entries,
            } => {
                assert_eq!(*mode, CalculationMode::WakeUp);
                assert_eq!(anchor.to_string(), "12:10 AM");
                assert_eq!(entries[0].text, "9:25 AM");
                assert_eq!(entries[5].text, "1:55 AM");
            }
            CalculatorView::Picker => panic!("expected results"),
        }
    }

    #[test]
    fn go_back_clears_results() {
        let mut calculator = calculator_at(23, 0);
        calculator.calculate_wake_up();
        calculator.go_back();
        assert_eq!(calculator.view(), &CalculatorView::Picker);
        assert_eq!(calculator.view().mode(), None);
    }

    #[test]
    fn picker_input_only_while_picking() {
        let mut calculator = calculator_at(23, 0);
        let document = Document::new();
        let over_hours = PxPosition::new(Px(20), Px(100));

        document.dispatch(&CursorEvent::scroll(over_hours, 0.0, 1.0), Some(&calculator));
        assert_eq!(calculator.picker().time().to_string(), "7:30 AM");

        calculator.calculate_bedtime();
        document.dispatch(&CursorEvent::pressed(PointerSource::Mouse, over_hours), Some(&calculator));
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn leaving_the_picker_ends_a_drag() {
        let mut calculator = calculator_at(23, 0);
        let document = Document::new();
        let over_hours = PxPosition::new(Px(20), Px(100));

        document.dispatch(&CursorEvent::pressed(PointerSource::Mouse, over_hours), Some(&calculator));
        assert!(calculator.picker().is_dragging());
        let view = calculator.calculate_bedtime();
        assert_eq!(view.entries()[0].text, "9:15 PM");
        assert!(!calculator.picker().is_dragging());
        assert_eq!(document.listener_count(), 0);

        // a stray move after the switch edits nothing
        document.dispatch(
            &CursorEvent::moved(PointerSource::Mouse, PxPosition::new(Px(20), Px(4))),
            None,
        );
        assert_eq!(calculator.picker().time().to_string(), "6:30 AM");

        calculator.go_back();
        document.dispatch(&CursorEvent::pressed(PointerSource::Touch, over_hours), Some(&calculator));
        assert_eq!(document.listener_count(), 1);
        calculator.calculate_wake_up();
        assert_eq!(document.listener_count(), 0);

        // back again mid-drag from a fresh press
        calculator.go_back();
        document.dispatch(&CursorEvent::pressed(PointerSource::Touch, over_hours), Some(&calculator));
        calculator.go_back();
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn custom_config_controls_count_and_flags() {
        let args = SleepCalculatorArgs::default()
            .picker(
                TimePickerArgs::default()
                    .initial_time(WallTime::new(7, 0, Meridiem::Am).expect("valid")),
            )
            .config(SleepCycleConfig {
                suggestion_count: 4,
                recommended_count: 1,
                ..SleepCycleConfig::default()
            });
        let mut calculator = SleepCalculator::new(args).expect("valid config");
        let entries = calculator.calculate_bedtime().entries().to_vec();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries.iter().filter(|e| e.recommended).count(), 1);
        assert_eq!(entries[0].text, "12:45 AM");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let args = SleepCalculatorArgs::default().config(SleepCycleConfig {
            cycle_hours: -1.0,
            ..SleepCycleConfig::default()
        });
        assert!(matches!(
            SleepCalculator::new(args),
            Err(ConfigError::CycleHours(_))
        ));
    }
}
