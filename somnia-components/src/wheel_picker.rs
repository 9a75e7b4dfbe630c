//! An infinitely wrapping wheel picker column.
//!
//! ## Usage
//!
//! Use for a small fixed ring of values such as hours, minutes or AM/PM where
//! scrolling past either end should continue from the other end.
//!
//! ```
//! use somnia_components::wheel_picker::{
//!     LabelFormat, WheelPicker, WheelPickerArgs, options_from_values,
//! };
//! use somnia_ui::cursor::CursorEvent;
//! use somnia_ui::{Document, Px, PxPosition};
//!
//! let minutes = options_from_values(0u8..60, LabelFormat::ZeroPadded);
//! let picker = WheelPicker::new(WheelPickerArgs::new(59u8, minutes));
//! let document = Document::new();
//!
//! let over = PxPosition::new(Px(10), Px(10));
//! document.dispatch(&CursorEvent::scroll(over, 0.0, 120.0), Some(&picker));
//! assert_eq!(picker.value(), 0);
//! assert_eq!(picker.visible_slots()[3].text, "00");
//! ```
//!
//! # Gestures
//!
//! A press starts a drag session and subscribes to the [`Document`] for moves
//! and releases from the same pointer source, so dragging keeps working after
//! the pointer leaves the column. Every move resolves
//! `start_index + round((start_y - y) / item_height)` against the ring and
//! reports the result through `on_change`. A wheel event moves exactly one
//! position in the direction of its vertical delta.

use std::{fmt, sync::Arc};

use derive_setters::Setters;
use smallvec::SmallVec;
use somnia_ui::{
    CallbackWith, CursorEvent, CursorEventContent, Document, Dp, EventFlow, InputHandler,
    PointerSource, Px, State, Subscription, WeakState, cursor::PressKeyEventType,
};
use thiserror::Error;
use tracing::{debug, trace};

use crate::theme::{PickerTheme, SlotStyle};

/// Positions rendered on each side of the selection.
pub const VISIBLE_RADIUS: i32 = 3;
/// Number of slots in one windowed render.
pub const VISIBLE_SLOT_COUNT: usize = 7;

/// Values a [`WheelPicker`] can hold.
pub trait PickerValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T> PickerValue for T where T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

/// Errors raised when building a [`WheelPicker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickerError {
    /// The option list is empty.
    #[error("a wheel picker needs at least one option")]
    EmptyOptions,
}

/// One entry of the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerOption<T> {
    /// Identity used to locate the selection.
    pub value: T,
    /// Label shown for the entry.
    pub text: String,
}

impl<T> PickerOption<T> {
    /// Creates an option.
    pub fn new(value: T, text: impl Into<String>) -> Self {
        Self {
            value,
            text: text.into(),
        }
    }
}

/// How option labels are derived from values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFormat {
    /// Pads numeric labels to two digits when the ring has 60 entries and
    /// leaves them alone otherwise.
    #[default]
    Auto,
    /// Pads numeric labels to two digits.
    ZeroPadded,
    /// Uses the value's text unchanged.
    Plain,
}

impl LabelFormat {
    /// Formats `text` for a ring of `option_count` entries.
    pub fn apply(self, text: &str, option_count: usize) -> String {
        match self {
            LabelFormat::Auto if option_count == 60 => pad_numeric(text),
            LabelFormat::ZeroPadded => pad_numeric(text),
            LabelFormat::Auto | LabelFormat::Plain => text.to_owned(),
        }
    }
}

fn pad_numeric(text: &str) -> String {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        format!("{text:0>2}")
    } else {
        text.to_owned()
    }
}

/// Builds options whose labels are the values' `Display` text run through
/// `format`.
pub fn options_from_values<T: fmt::Display>(
    values: impl IntoIterator<Item = T>,
    format: LabelFormat,
) -> Vec<PickerOption<T>> {
    let values: Vec<T> = values.into_iter().collect();
    let count = values.len();
    values
        .into_iter()
        .map(|value| {
            let text = format.apply(&value.to_string(), count);
            PickerOption { value, text }
        })
        .collect()
}

/// Sizes used by gesture math and slot layout.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct PickerMetrics {
    /// Drag distance that moves the selection by one position.
    pub item_height: Dp,
    /// Vertical distance between rendered slots.
    pub slot_pitch: Dp,
}

impl Default for PickerMetrics {
    fn default() -> Self {
        Self {
            item_height: Dp(48.0),
            slot_pitch: Dp(64.0),
        }
    }
}

/// Arguments for [`WheelPicker`].
#[derive(Clone, Setters)]
pub struct WheelPickerArgs<T> {
    /// Initially selected value.
    #[setters(skip)]
    pub value: T,
    /// The ring, in display order. Must not be empty.
    #[setters(skip)]
    pub options: Vec<PickerOption<T>>,
    /// Called with the new value whenever a gesture resolves a selection.
    #[setters(into)]
    pub on_change: CallbackWith<T>,
    /// Gesture and layout sizes.
    pub metrics: PickerMetrics,
    /// Slot styling hints.
    pub theme: PickerTheme,
}

impl<T> WheelPickerArgs<T> {
    /// Arguments with the default metrics and theme and no change handler.
    pub fn new(value: T, options: Vec<PickerOption<T>>) -> Self {
        Self {
            value,
            options,
            on_change: CallbackWith::default(),
            metrics: PickerMetrics::default(),
            theme: PickerTheme::default(),
        }
    }
}

/// One rendered position of the windowed ring.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerSlot {
    /// Position relative to the selection, `-3..=3`.
    pub offset: i32,
    /// Index into the option list.
    pub index: usize,
    /// Label to draw.
    pub text: String,
    /// Top edge relative to the column's vertical centre.
    pub top: Dp,
    /// Styling hint.
    pub style: SlotStyle,
}

impl PickerSlot {
    /// Returns whether this slot shows the selection.
    pub fn is_selected(&self) -> bool {
        self.offset == 0
    }
}

struct Column<T> {
    options: Vec<PickerOption<T>>,
    metrics: PickerMetrics,
    on_change: CallbackWith<T>,
}

impl<T: PickerValue> Column<T> {
    fn index_of(&self, value: &T) -> usize {
        match self.options.iter().position(|option| &option.value == value) {
            Some(index) => index,
            None => {
                debug!(?value, "value not among picker options, showing the first option");
                0
            }
        }
    }

    fn wrap(&self, index: i64) -> usize {
        let len = self.options.len() as i64;
        if len == 0 {
            return 0;
        }
        index.rem_euclid(len) as usize
    }

    fn drag_index(&self, session: &DragSession, current_y: Px) -> usize {
        let item_height = self.metrics.item_height.to_pixels_f32();
        if item_height <= 0.0 {
            return session.start_index;
        }
        let dragged = ((session.start_y - current_y).to_f32() / item_height).round() as i64;
        self.wrap(session.start_index as i64 + dragged)
    }
}

struct DragSession {
    source: PointerSource,
    start_y: Px,
    start_index: usize,
    _subscription: Subscription,
}

struct ColumnState<T> {
    value: T,
    drag: Option<DragSession>,
}

/// A wheel picker column.
///
/// The column owns its selected value; `on_change` tells the owner about
/// gesture-driven changes. Dropping the picker ends any drag in progress.
pub struct WheelPicker<T> {
    column: Arc<Column<T>>,
    state: State<ColumnState<T>>,
    theme: PickerTheme,
}

impl<T: PickerValue> WheelPicker<T> {
    /// Creates a picker, rejecting an empty option list.
    pub fn try_new(args: WheelPickerArgs<T>) -> Result<Self, PickerError> {
        if args.options.is_empty() {
            return Err(PickerError::EmptyOptions);
        }
        Ok(Self::build(args))
    }

    /// Creates a picker. The option list must not be empty.
    pub fn new(args: WheelPickerArgs<T>) -> Self {
        debug_assert!(
            !args.options.is_empty(),
            "a wheel picker needs at least one option"
        );
        Self::build(args)
    }

    fn build(args: WheelPickerArgs<T>) -> Self {
        Self {
            column: Arc::new(Column {
                options: args.options,
                metrics: args.metrics,
                on_change: args.on_change,
            }),
            state: State::new(ColumnState {
                value: args.value,
                drag: None,
            }),
            theme: args.theme,
        }
    }

    /// The selected value.
    pub fn value(&self) -> T {
        self.state.with(|state| state.value.clone())
    }

    /// Replaces the selected value without calling `on_change`.
    pub fn set_value(&self, value: T) {
        self.state.with_mut(|state| state.value = value);
    }

    /// Index of the selected value, `0` when it is not among the options.
    pub fn selected_index(&self) -> usize {
        self.state.with(|state| self.column.index_of(&state.value))
    }

    /// The ring in display order.
    pub fn options(&self) -> &[PickerOption<T>] {
        &self.column.options
    }

    /// Gesture and layout sizes.
    pub fn metrics(&self) -> PickerMetrics {
        self.column.metrics
    }

    /// Returns whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.state.with(|state| state.drag.is_some())
    }

    /// Ends any drag in progress without changing the value and detaches its
    /// document listener.
    pub fn cancel_drag(&self) {
        end_drag(&self.state, "cancelled");
    }

    /// The seven slots around the selection, top to bottom.
    pub fn visible_slots(&self) -> SmallVec<[PickerSlot; VISIBLE_SLOT_COUNT]> {
        if self.column.options.is_empty() {
            return SmallVec::new();
        }
        let selected = self.selected_index() as i64;
        let pitch = self.column.metrics.slot_pitch.0;
        (-VISIBLE_RADIUS..=VISIBLE_RADIUS)
            .map(|offset| {
                let index = self.column.wrap(selected + i64::from(offset));
                PickerSlot {
                    offset,
                    index,
                    text: self.column.options[index].text.clone(),
                    top: Dp(f64::from(offset) * pitch - pitch / 2.0),
                    style: self.theme.slot_style(offset.unsigned_abs()),
                }
            })
            .collect()
    }

    fn begin_drag(&self, event: &CursorEvent, document: &Document) {
        end_drag(&self.state, "superseded");

        let start_index = self.selected_index();
        let subscription = document.subscribe(event.source, {
            let state = self.state.downgrade();
            let column = Arc::clone(&self.column);
            move |event: &CursorEvent| drag_event(&state, &column, event)
        });
        let session = DragSession {
            source: event.source,
            start_y: event.position.y,
            start_index,
            _subscription: subscription,
        };
        self.state.with_mut(|state| state.drag = Some(session));
        debug!(source = ?event.source, start_index, "wheel picker drag started");
    }

    fn step(&self, step: i32) -> EventFlow {
        if step == 0 {
            return EventFlow::Continue;
        }
        let value = self.state.with_mut(|state| {
            let current = self.column.index_of(&state.value) as i64;
            let index = self.column.wrap(current + i64::from(step));
            state.value = self.column.options[index].value.clone();
            state.value.clone()
        });
        trace!(step, ?value, "wheel picker stepped");
        self.column.on_change.call(value);
        EventFlow::Consumed
    }
}

impl<T: PickerValue> InputHandler for WheelPicker<T> {
    fn handle_input(&self, event: &CursorEvent, document: &Document) -> EventFlow {
        match &event.content {
            CursorEventContent::Pressed(PressKeyEventType::Left) => {
                self.begin_drag(event, document);
                EventFlow::Continue
            }
            CursorEventContent::Scroll(scroll) => self.step(scroll.vertical_step()),
            // Moves and releases arrive through the drag subscription.
            _ => EventFlow::Continue,
        }
    }
}

fn drag_event<T: PickerValue>(
    state: &WeakState<ColumnState<T>>,
    column: &Column<T>,
    event: &CursorEvent,
) -> EventFlow {
    let Some(state) = state.upgrade() else {
        return EventFlow::Continue;
    };
    match &event.content {
        CursorEventContent::Moved => {
            let moved = state.with_mut(|state| {
                let session = state.drag.as_ref()?;
                let index = column.drag_index(session, event.position.y);
                state.value = column.options[index].value.clone();
                Some((index, state.value.clone()))
            });
            let Some((index, value)) = moved else {
                return EventFlow::Continue;
            };
            trace!(index, y = event.position.y.raw(), "wheel picker dragged");
            column.on_change.call(value);
            if event.source == PointerSource::Touch {
                EventFlow::Consumed
            } else {
                EventFlow::Continue
            }
        }
        CursorEventContent::Released(_) => {
            end_drag(&state, "released");
            EventFlow::Continue
        }
        _ => EventFlow::Continue,
    }
}

fn end_drag<T: PickerValue>(state: &State<ColumnState<T>>, reason: &'static str) {
    // Take the session out first so its subscription drops outside the lock.
    let session = state.with_mut(|state| state.drag.take());
    if let Some(session) = session {
        debug!(source = ?session.source, reason, "wheel picker drag ended");
    }
}
