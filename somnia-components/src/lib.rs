//! Components for the somnia sleep calculator.
//!
//! # Example
//!
//! A host owns a [`Document`](somnia_ui::Document), feeds it normalised
//! input and renders what the components expose:
//!
//! ```
//! use somnia_components::time_picker::{TimePicker, TimePickerArgs};
//! use somnia_ui::cursor::{CursorEvent, PointerSource};
//! use somnia_ui::{Document, Px, PxPosition};
//!
//! let picker = TimePicker::new(TimePickerArgs::default());
//! let document = Document::new();
//!
//! // drag the hour column up by one item
//! let start = PxPosition::new(Px(40), Px(120));
//! document.dispatch(&CursorEvent::pressed(PointerSource::Mouse, start), Some(&picker));
//! document.dispatch(&CursorEvent::moved(PointerSource::Mouse, PxPosition::new(Px(40), Px(72))), None);
//! document.dispatch(&CursorEvent::released(PointerSource::Mouse, PxPosition::new(Px(40), Px(72))), None);
//!
//! assert_eq!(picker.time().to_string(), "7:30 AM");
//! for column in picker.visible_columns() {
//!     assert_eq!(column.slots.len(), 7);
//! }
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod sleep_calculator;
pub mod theme;
pub mod time_picker;
pub mod wheel_picker;

pub use crate::{
    sleep_calculator::{
        CalculationMode, CalculatorView, SleepCalculator, SleepCalculatorArgs, SuggestionEntry,
    },
    theme::{PickerTheme, SlotStyle},
    time_picker::{ColumnView, TimeColumn, TimePicker, TimePickerArgs},
    wheel_picker::{
        LabelFormat, PickerError, PickerMetrics, PickerOption, PickerSlot, PickerValue,
        WheelPicker, WheelPickerArgs, options_from_values,
    },
};
