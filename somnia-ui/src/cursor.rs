//! Cursor, touch and wheel event model.
//!
//! Hosts feed raw input into [`CursorState`], which normalises mouse buttons,
//! the primary touch point and wheel deltas into a queue of [`CursorEvent`]s.
//! The queue is drained with [`CursorState::take_events`] and handed to a
//! [`Document`](crate::Document) for dispatch.
//!
//! # Usage
//!
//! ```
//! use somnia_ui::cursor::{CursorEventContent, CursorState, PointerSource};
//! use somnia_ui::{Px, PxPosition};
//!
//! let mut cursor_state = CursorState::default();
//! cursor_state.handle_touch_start(7, PxPosition::new(Px(20), Px(200)));
//! cursor_state.handle_touch_move(7, PxPosition::new(Px(20), Px(152)));
//! cursor_state.handle_touch_end(7);
//!
//! let events = cursor_state.take_events();
//! assert_eq!(events.len(), 3);
//! assert!(events.iter().all(|e| e.source == PointerSource::Touch));
//! assert!(matches!(events[1].content, CursorEventContent::Moved));
//! ```

use std::{collections::VecDeque, time::Instant};

use tracing::warn;

use crate::PxPosition;

/// Maximum number of events to keep in the queue while the host is not
/// draining it.
const KEEP_EVENTS_COUNT: usize = 64;

/// Which input device produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSource {
    /// Mouse, pen or trackpad pointer.
    Mouse,
    /// The primary touch point.
    Touch,
}

/// A single normalised input event.
#[derive(Debug, Clone)]
pub struct CursorEvent {
    /// When the host observed the event.
    pub timestamp: Instant,
    /// Device that produced the event.
    pub source: PointerSource,
    /// Client coordinates of the pointer when the event occurred.
    pub position: PxPosition,
    /// What happened.
    pub content: CursorEventContent,
}

impl CursorEvent {
    /// A primary press at `position`.
    pub fn pressed(source: PointerSource, position: PxPosition) -> Self {
        Self::now(
            source,
            position,
            CursorEventContent::Pressed(PressKeyEventType::Left),
        )
    }

    /// A pointer move to `position`.
    pub fn moved(source: PointerSource, position: PxPosition) -> Self {
        Self::now(source, position, CursorEventContent::Moved)
    }

    /// A primary release at `position`.
    pub fn released(source: PointerSource, position: PxPosition) -> Self {
        Self::now(
            source,
            position,
            CursorEventContent::Released(PressKeyEventType::Left),
        )
    }

    /// A wheel event over `position`.
    pub fn scroll(position: PxPosition, delta_x: f32, delta_y: f32) -> Self {
        Self::now(
            PointerSource::Mouse,
            position,
            CursorEventContent::Scroll(ScrollEventContent { delta_x, delta_y }),
        )
    }

    fn now(source: PointerSource, position: PxPosition, content: CursorEventContent) -> Self {
        Self {
            timestamp: Instant::now(),
            source,
            position,
            content,
        }
    }

    /// Returns whether this is a move or release, the two kinds document-level
    /// listeners observe.
    pub fn is_drag_phase(&self) -> bool {
        matches!(
            self.content,
            CursorEventContent::Moved | CursorEventContent::Released(_)
        )
    }
}

/// Scroll deltas reported by a wheel or trackpad.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollEventContent {
    /// Horizontal scroll distance. Positive scrolls right.
    pub delta_x: f32,
    /// Vertical scroll distance. Positive scrolls down.
    pub delta_y: f32,
}

impl ScrollEventContent {
    /// Sign of the vertical delta: `1` down, `-1` up, `0` for no vertical
    /// movement.
    pub fn vertical_step(&self) -> i32 {
        if self.delta_y > 0.0 {
            1
        } else if self.delta_y < 0.0 {
            -1
        } else {
            0
        }
    }
}

/// Enumeration of all possible cursor event kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum CursorEventContent {
    /// A button or touch point went down.
    Pressed(PressKeyEventType),
    /// The pointer or touch point moved.
    Moved,
    /// A button or touch point went up.
    Released(PressKeyEventType),
    /// A wheel step or trackpad scroll.
    Scroll(ScrollEventContent),
}

/// Which button a press or release refers to. Touches report `Left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKeyEventType {
    /// The primary mouse button or the primary touch.
    Left,
    /// The secondary mouse button.
    Right,
    /// The middle mouse button.
    Middle,
}

/// Input normaliser between the host and a [`Document`](crate::Document).
///
/// Only the first touch point of a gesture is tracked; additional fingers are
/// ignored until it lifts.
///
/// # Thread Safety
///
/// `CursorState` is meant to be owned by the thread that receives host input.
#[derive(Debug, Default)]
pub struct CursorState {
    position: Option<PxPosition>,
    events: VecDeque<CursorEvent>,
    primary_touch: Option<u64>,
}

impl CursorState {
    /// Queues an event. When the queue is full the oldest move is coalesced
    /// away; presses and releases are never dropped.
    pub fn push_event(&mut self, event: CursorEvent) {
        self.events.push_back(event);

        if self.events.len() > KEEP_EVENTS_COUNT {
            let oldest_move = self
                .events
                .iter()
                .position(|e| matches!(e.content, CursorEventContent::Moved));
            match oldest_move {
                Some(index) => {
                    self.events.remove(index);
                }
                None => {
                    warn!(
                        "cursor event queue exceeded {KEEP_EVENTS_COUNT} entries without moves to coalesce"
                    );
                }
            }
        }
    }

    /// Records a mouse button press.
    pub fn handle_mouse_press(&mut self, button: PressKeyEventType, position: PxPosition) {
        self.position = Some(position);
        self.push_event(CursorEvent::now(
            PointerSource::Mouse,
            position,
            CursorEventContent::Pressed(button),
        ));
    }

    /// Records a mouse move.
    pub fn handle_mouse_move(&mut self, position: PxPosition) {
        self.position = Some(position);
        self.push_event(CursorEvent::moved(PointerSource::Mouse, position));
    }

    /// Records a mouse button release at the last known position.
    pub fn handle_mouse_release(&mut self, button: PressKeyEventType) {
        let position = self.position.unwrap_or_default();
        self.push_event(CursorEvent::now(
            PointerSource::Mouse,
            position,
            CursorEventContent::Released(button),
        ));
    }

    /// Records a wheel step at the last known position.
    pub fn handle_wheel(&mut self, delta_x: f32, delta_y: f32) {
        let position = self.position.unwrap_or_default();
        self.push_event(CursorEvent::scroll(position, delta_x, delta_y));
    }

    /// Records a touch start. Becomes the primary touch if none is active.
    pub fn handle_touch_start(&mut self, touch_id: u64, position: PxPosition) {
        if self.primary_touch.is_some() {
            return;
        }
        self.primary_touch = Some(touch_id);
        self.position = Some(position);
        self.push_event(CursorEvent::pressed(PointerSource::Touch, position));
    }

    /// Records a touch move. Moves of non-primary touches are ignored.
    pub fn handle_touch_move(&mut self, touch_id: u64, position: PxPosition) {
        if self.primary_touch != Some(touch_id) {
            return;
        }
        self.position = Some(position);
        self.push_event(CursorEvent::moved(PointerSource::Touch, position));
    }

    /// Records a touch end or cancel.
    pub fn handle_touch_end(&mut self, touch_id: u64) {
        if self.primary_touch != Some(touch_id) {
            return;
        }
        self.primary_touch = None;
        let position = self.position.unwrap_or_default();
        self.push_event(CursorEvent::released(PointerSource::Touch, position));
    }

    /// Drains the queued events in arrival order.
    pub fn take_events(&mut self) -> Vec<CursorEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Px;

    fn at(y: i32) -> PxPosition {
        PxPosition::new(Px(10), Px(y))
    }

    #[test]
    fn secondary_touches_are_ignored() {
        let mut state = CursorState::default();
        state.handle_touch_start(1, at(100));
        state.handle_touch_start(2, at(300));
        state.handle_touch_move(2, at(250));
        state.handle_touch_end(2);
        state.handle_touch_move(1, at(52));
        state.handle_touch_end(1);

        let events = state.take_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].position, at(52));
        assert!(matches!(events[2].content, CursorEventContent::Released(_)));
    }

    #[test]
    fn overflow_coalesces_moves_but_keeps_release() {
        let mut state = CursorState::default();
        state.handle_mouse_press(PressKeyEventType::Left, at(0));
        for y in 1..=(KEEP_EVENTS_COUNT as i32 * 2) {
            state.handle_mouse_move(at(y));
        }
        state.handle_mouse_release(PressKeyEventType::Left);

        let events = state.take_events();
        assert_eq!(events.len(), KEEP_EVENTS_COUNT);
        assert!(matches!(events[0].content, CursorEventContent::Pressed(_)));
        assert!(matches!(
            events.last().map(|e| &e.content),
            Some(CursorEventContent::Released(_))
        ));
        // the newest move survives
        assert_eq!(events[events.len() - 2].position, at(KEEP_EVENTS_COUNT as i32 * 2));
    }

    #[test]
    fn wheel_step_uses_sign_only() {
        let scroll = ScrollEventContent {
            delta_x: 0.0,
            delta_y: 120.0,
        };
        assert_eq!(scroll.vertical_step(), 1);
        let scroll = ScrollEventContent {
            delta_x: 0.0,
            delta_y: -0.5,
        };
        assert_eq!(scroll.vertical_step(), -1);
        let scroll = ScrollEventContent {
            delta_x: 3.0,
            delta_y: 0.0,
        };
        assert_eq!(scroll.vertical_step(), 0);
    }
}
