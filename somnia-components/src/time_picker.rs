//! Time picker built from three wheel picker columns.
//!
//! ## Usage
//!
//! Use to let users choose a 12-hour clock time, e.g. the time they want to
//! wake up.
//!
//! The hour, minute and AM/PM columns sit side by side in a fixed frame and
//! write into one shared [`WallTime`]. Presses and wheel events are routed to
//! the column under the pointer.

use derive_setters::Setters;
use smallvec::SmallVec;
use somnia_foundation::{Meridiem, WallTime};
use somnia_ui::{
    CallbackWith, CursorEvent, CursorEventContent, Document, Dp, EventFlow, InputHandler,
    PxPosition, PxRect, PxSize, State,
};
use tracing::debug;

use crate::{
    theme::PickerTheme,
    wheel_picker::{
        LabelFormat, PickerMetrics, PickerSlot, VISIBLE_SLOT_COUNT, WheelPicker, WheelPickerArgs,
        options_from_values,
    },
};

/// Frame width.
pub const TIME_PICKER_WIDTH: Dp = Dp(350.0);
/// Frame height.
pub const TIME_PICKER_HEIGHT: Dp = Dp(208.0);
/// Time shown before the user picks one.
pub const DEFAULT_TIME: WallTime = WallTime::new_const(6, 30, Meridiem::Am);

/// The three columns, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeColumn {
    /// Hours `1..=12`.
    Hour,
    /// Minutes `00..=59`.
    Minute,
    /// AM or PM.
    Meridiem,
}

impl TimeColumn {
    /// All columns in layout order.
    pub const ALL: [TimeColumn; 3] = [TimeColumn::Hour, TimeColumn::Minute, TimeColumn::Meridiem];

    fn position(self) -> i32 {
        match self {
            TimeColumn::Hour => 0,
            TimeColumn::Minute => 1,
            TimeColumn::Meridiem => 2,
        }
    }
}

/// Configuration options for [`TimePicker`].
#[derive(Clone, Setters)]
pub struct TimePickerArgs {
    /// Initially selected time.
    pub initial_time: WallTime,
    /// Top-left corner of the frame in client coordinates.
    pub origin: PxPosition,
    /// Gesture and layout sizes shared by the columns.
    pub metrics: PickerMetrics,
    /// Slot styling shared by the columns.
    pub theme: PickerTheme,
    /// Called with the full time after any column changes.
    #[setters(into)]
    pub on_change: CallbackWith<WallTime>,
}

impl Default for TimePickerArgs {
    fn default() -> Self {
        Self {
            initial_time: DEFAULT_TIME,
            origin: PxPosition::ZERO,
            metrics: PickerMetrics::default(),
            theme: PickerTheme::default(),
            on_change: CallbackWith::default(),
        }
    }
}

/// One column ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    /// Which column this is.
    pub column: TimeColumn,
    /// Client-space bounds of the column.
    pub bounds: PxRect,
    /// The seven visible slots, top to bottom.
    pub slots: SmallVec<[PickerSlot; VISIBLE_SLOT_COUNT]>,
}

/// Hour, minute and meridiem wheels editing one [`WallTime`].
pub struct TimePicker {
    time: State<WallTime>,
    hours: WheelPicker<u8>,
    minutes: WheelPicker<u8>,
    meridiem: WheelPicker<Meridiem>,
    frame: PxRect,
}

impl TimePicker {
    /// Creates a time picker.
    pub fn new(args: TimePickerArgs) -> Self {
        let initial = args.initial_time;
        let time = State::new(initial);

        let hours = WheelPicker::new(
            WheelPickerArgs::new(
                initial.hours(),
                options_from_values(1u8..=12, LabelFormat::Plain),
            )
            .on_change(edit_handler(&time, &args.on_change, |time, hours: u8| {
                time.with_hours(hours).unwrap_or(time)
            }))
            .metrics(args.metrics)
            .theme(args.theme.clone()),
        );
        let minutes = WheelPicker::new(
            WheelPickerArgs::new(
                initial.minutes(),
                options_from_values(0u8..60, LabelFormat::ZeroPadded),
            )
            .on_change(edit_handler(&time, &args.on_change, |time, minutes: u8| {
                time.with_minutes(minutes).unwrap_or(time)
            }))
            .metrics(args.metrics)
            .theme(args.theme.clone()),
        );
        let meridiem = WheelPicker::new(
            WheelPickerArgs::new(
                initial.meridiem(),
                options_from_values(Meridiem::ALL, LabelFormat::Plain),
            )
            .on_change(edit_handler(&time, &args.on_change, WallTime::with_meridiem))
            .metrics(args.metrics)
            .theme(args.theme),
        );

        Self {
            time,
            hours,
            minutes,
            meridiem,
            frame: frame_at(args.origin),
        }
    }

    /// The selected time.
    pub fn time(&self) -> WallTime {
        self.time.get()
    }

    /// Replaces the selected time without calling `on_change`.
    pub fn set_time(&self, time: WallTime) {
        self.time.set(time);
        self.hours.set_value(time.hours());
        self.minutes.set_value(time.minutes());
        self.meridiem.set_value(time.meridiem());
    }

    /// Moves the frame so its top-left corner sits at `origin`.
    pub fn set_origin(&mut self, origin: PxPosition) {
        self.frame = frame_at(origin);
    }

    /// Client-space bounds of the whole picker.
    pub fn frame(&self) -> PxRect {
        self.frame
    }

    /// Returns whether any column is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.hours.is_dragging() || self.minutes.is_dragging() || self.meridiem.is_dragging()
    }

    /// Ends a drag in any column, keeping the current time.
    pub fn cancel_drag(&self) {
        self.hours.cancel_drag();
        self.minutes.cancel_drag();
        self.meridiem.cancel_drag();
    }

    /// Client-space bounds of `column`. The last column takes the rounding
    /// remainder.
    pub fn column_bounds(&self, column: TimeColumn) -> PxRect {
        let width = self.frame.width / 3;
        let x = self.frame.x + width * column.position();
        let width = match column {
            TimeColumn::Meridiem => self.frame.width - width * 2,
            _ => width,
        };
        PxRect::new(x, self.frame.y, width, self.frame.height)
    }

    /// The column under `position`, if any.
    pub fn column_at(&self, position: PxPosition) -> Option<TimeColumn> {
        TimeColumn::ALL
            .into_iter()
            .find(|column| self.column_bounds(*column).contains(position))
    }

    /// All three columns ready for rendering, left to right.
    pub fn visible_columns(&self) -> [ColumnView; 3] {
        TimeColumn::ALL.map(|column| ColumnView {
            column,
            bounds: self.column_bounds(column),
            slots: match column {
                TimeColumn::Hour => self.hours.visible_slots(),
                TimeColumn::Minute => self.minutes.visible_slots(),
                TimeColumn::Meridiem => self.meridiem.visible_slots(),
            },
        })
    }

    fn column_handler(&self, column: TimeColumn) -> &dyn InputHandler {
        match column {
            TimeColumn::Hour => &self.hours,
            TimeColumn::Minute => &self.minutes,
            TimeColumn::Meridiem => &self.meridiem,
        }
    }
}

impl Default for TimePicker {
    fn default() -> Self {
        Self::new(TimePickerArgs::default())
    }
}

impl InputHandler for TimePicker {
    fn handle_input(&self, event: &CursorEvent, document: &Document) -> EventFlow {
        match &event.content {
            CursorEventContent::Pressed(_) | CursorEventContent::Scroll(_) => {
                match self.column_at(event.position) {
                    Some(column) => {
                        debug!(?column, "time picker input routed");
                        self.column_handler(column).handle_input(event, document)
                    }
                    None => EventFlow::Continue,
                }
            }
            _ => EventFlow::Continue,
        }
    }
}

fn frame_at(origin: PxPosition) -> PxRect {
    PxRect::from_position_size(
        origin,
        PxSize::new(TIME_PICKER_WIDTH.to_px(), TIME_PICKER_HEIGHT.to_px()),
    )
}

fn edit_handler<V: 'static>(
    time: &State<WallTime>,
    on_change: &CallbackWith<WallTime>,
    edit: impl Fn(WallTime, V) -> WallTime + Send + Sync + 'static,
) -> CallbackWith<V> {
    let time = time.clone();
    let on_change = on_change.clone();
    CallbackWith::new(move |value: V| {
        let next = time.with_mut(|time| {
            *time = edit(*time, value);
            *time
        });
        on_change.call(next);
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use somnia_ui::{PointerSource, Px};

    use super::*;

    fn at(x: i32, y: i32) -> PxPosition {
        PxPosition::new(Px(x), Px(y))
    }

    #[test]
    fn columns_split_the_frame() {
        let picker = TimePicker::default();
        assert_eq!(picker.frame().width, Px(350));
        assert_eq!(picker.column_at(at(10, 100)), Some(TimeColumn::Hour));
        assert_eq!(picker.column_at(at(120, 100)), Some(TimeColumn::Minute));
        assert_eq!(picker.column_at(at(349, 207)), Some(TimeColumn::Meridiem));
        assert_eq!(picker.column_at(at(350, 100)), None);
        assert_eq!(picker.column_bounds(TimeColumn::Meridiem).width, Px(118));
    }

    #[test]
    fn wheel_over_minutes_edits_minutes_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let picker = TimePicker::new(
            TimePickerArgs::default()
                .on_change(move |time: WallTime| sink.lock().push(time.to_string())),
        );
        let document = Document::new();

        for _ in 0..30 {
            document.dispatch(&CursorEvent::scroll(at(150, 50), 0.0, 1.0), Some(&picker));
        }
        assert_eq!(picker.time().to_string(), "6:00 AM");
        assert_eq!(seen.lock().last().map(String::as_str), Some("6:00 AM"));
        assert_eq!(seen.lock().len(), 30);
    }

    #[test]
    fn dragging_meridiem_flips_half() {
        let picker = TimePicker::default();
        let document = Document::new();
        document.dispatch(&CursorEvent::pressed(PointerSource::Touch, at(300, 100)), Some(&picker));
        assert!(picker.is_dragging());
        document.dispatch(&CursorEvent::moved(PointerSource::Touch, at(20, 52)), None);
        document.dispatch(&CursorEvent::released(PointerSource::Touch, at(20, 52)), None);
        assert_eq!(picker.time().to_string(), "6:30 PM");
        assert!(!picker.is_dragging());
    }

    #[test]
    fn cancel_drag_stops_every_column() {
        let picker = TimePicker::default();
        let document = Document::new();
        document.dispatch(&CursorEvent::pressed(PointerSource::Mouse, at(150, 100)), Some(&picker));
        assert!(picker.is_dragging());
        picker.cancel_drag();
        assert!(!picker.is_dragging());
        assert_eq!(document.listener_count(), 0);
        document.dispatch(&CursorEvent::moved(PointerSource::Mouse, at(150, 4)), None);
        assert_eq!(picker.time().to_string(), "6:30 AM");
    }

    #[test]
    fn presses_outside_the_frame_are_ignored() {
        let picker = TimePicker::default();
        let document = Document::new();
        document.dispatch(&CursorEvent::pressed(PointerSource::Mouse, at(-5, 100)), Some(&picker));
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn set_time_moves_every_column() {
        let picker = TimePicker::default();
        let time = WallTime::new(11, 5, Meridiem::Pm).expect("valid");
        picker.set_time(time);
        assert_eq!(picker.time(), time);
        let [hours, minutes, meridiem] = picker.visible_columns();
        assert_eq!(hours.slots[3].text, "11");
        assert_eq!(minutes.slots[3].text, "05");
        assert_eq!(meridiem.slots[3].text, "PM");
        // two options wrap into an alternating window
        assert_eq!(meridiem.slots[2].text, "AM");
        assert_eq!(meridiem.slots[0].text, "AM");
        assert_eq!(meridiem.slots[6].text, "AM");
    }
}
