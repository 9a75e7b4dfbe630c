//! somnia-ui is the host event layer the somnia widgets run on.
//!
//! # Events
//!
//! Hosts translate their native input into [`cursor::CursorEvent`]s, usually
//! through [`cursor::CursorState`], and hand them to a [`Document`]:
//!
//! ```
//! use somnia_ui::cursor::{CursorEvent, PointerSource};
//! use somnia_ui::{Document, Px, PxPosition};
//!
//! let document = Document::new();
//! let outcome = document.dispatch(
//!     &CursorEvent::moved(PointerSource::Mouse, PxPosition::new(Px(4), Px(8))),
//!     None,
//! );
//! assert!(!outcome.default_prevented);
//! ```
//!
//! # State
//!
//! Components keep their state in a [`State<T>`] so listener closures can
//! reach it through a [`WeakState<T>`], and report changes through
//! [`CallbackWith<T>`]:
//!
//! ```
//! use somnia_ui::{CallbackWith, State};
//!
//! let selected = State::new(0u8);
//! let sink = selected.clone();
//! let on_change = CallbackWith::new(move |value: u8| sink.set(value));
//! on_change.call(7);
//! assert_eq!(selected.get(), 7);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod color;
pub mod cursor;
pub mod document;
pub mod dp;
pub mod entry_point;
pub mod prop;
pub mod px;
pub mod state;

pub use crate::{
    color::Color,
    cursor::{CursorEvent, CursorEventContent, CursorState, PointerSource},
    document::{DispatchOutcome, Document, EventFlow, InputHandler, ListenerId, Subscription},
    dp::Dp,
    entry_point::init_tracing,
    prop::CallbackWith,
    px::{Px, PxPosition, PxRect, PxSize},
    state::{State, WeakState},
};
