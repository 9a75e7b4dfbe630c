//! Event dispatch and document-level listener subscriptions.
//!
//! A [`Document`] stands in for the host surface. Press and wheel events go to
//! the component under the pointer through [`InputHandler`]. Moves and releases
//! additionally reach every document-level listener, which is how a drag keeps
//! tracking after the pointer leaves the component that started it.
//!
//! Listeners are held by a [`Subscription`] guard. Dropping the guard detaches
//! the listener, so a component that stores the guard in its drag session
//! releases it on every exit path: release, a superseding press, or the
//! component itself being dropped.
//!
//! # Usage
//!
//! ```
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! use somnia_ui::cursor::{CursorEvent, PointerSource};
//! use somnia_ui::{Document, EventFlow, Px, PxPosition};
//!
//! let document = Document::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seen);
//! let subscription = document.subscribe(PointerSource::Mouse, move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     EventFlow::Continue
//! });
//!
//! let at = PxPosition::new(Px(0), Px(0));
//! document.dispatch(&CursorEvent::moved(PointerSource::Mouse, at), None);
//! drop(subscription);
//! document.dispatch(&CursorEvent::moved(PointerSource::Mouse, at), None);
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::cursor::{CursorEvent, PointerSource};

new_key_type! {
    /// Identifies a document-level listener.
    pub struct ListenerId;
}

/// Whether a handler consumed an event.
///
/// `Consumed` maps to "prevent default" on the host: page scrolling is
/// suppressed for the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventFlow {
    /// The handler did not act on the event.
    #[default]
    Continue,
    /// The handler acted on the event; the host must not apply its default.
    Consumed,
}

impl EventFlow {
    /// Combines two flows; consumed wins.
    pub fn merge(self, other: EventFlow) -> EventFlow {
        if self == EventFlow::Consumed || other == EventFlow::Consumed {
            EventFlow::Consumed
        } else {
            EventFlow::Continue
        }
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// Some handler consumed the event.
    pub default_prevented: bool,
    /// Number of document-level listeners that observed the event.
    pub listeners_notified: usize,
}

/// Components that receive events targeted at them.
pub trait InputHandler {
    /// Handles `event`. Implementations subscribe to `document` when a gesture
    /// needs to outlive the pointer leaving their bounds.
    fn handle_input(&self, event: &CursorEvent, document: &Document) -> EventFlow;
}

type ListenerFn = dyn Fn(&CursorEvent) -> EventFlow + Send + Sync;

struct ListenerEntry {
    source: PointerSource,
    handler: Arc<ListenerFn>,
}

type ListenerTable = RwLock<SlotMap<ListenerId, ListenerEntry>>;

/// The host surface that routes events.
///
/// Cloning a `Document` yields another handle to the same listener table.
#[derive(Clone, Default)]
pub struct Document {
    listeners: Arc<ListenerTable>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document-level listener for moves and releases coming
    /// from `source`.
    ///
    /// The listener stays attached until the returned [`Subscription`] drops.
    #[must_use = "dropping the subscription detaches the listener immediately"]
    pub fn subscribe<F>(&self, source: PointerSource, handler: F) -> Subscription
    where
        F: Fn(&CursorEvent) -> EventFlow + Send + Sync + 'static,
    {
        let id = self.listeners.write().insert(ListenerEntry {
            source,
            handler: Arc::new(handler),
        });
        debug!(?id, ?source, "document listener attached");
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Number of attached document-level listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Dispatches `event`.
    ///
    /// The target, if any, sees the event first. Moves and releases then reach
    /// the document-level listeners registered for the event's source. The
    /// listener table is snapshotted before listeners run, so a listener may
    /// drop its own subscription.
    pub fn dispatch(
        &self,
        event: &CursorEvent,
        target: Option<&dyn InputHandler>,
    ) -> DispatchOutcome {
        let mut flow = target
            .map(|target| target.handle_input(event, self))
            .unwrap_or_default();

        let mut notified = 0;
        if event.is_drag_phase() {
            let handlers: SmallVec<[Arc<ListenerFn>; 4]> = self
                .listeners
                .read()
                .values()
                .filter(|entry| entry.source == event.source)
                .map(|entry| Arc::clone(&entry.handler))
                .collect();
            for handler in handlers {
                flow = flow.merge(handler(event));
                notified += 1;
            }
        }

        trace!(content = ?event.content, notified, ?flow, "event dispatched");
        DispatchOutcome {
            default_prevented: flow == EventFlow::Consumed,
            listeners_notified: notified,
        }
    }
}

/// Guard for a document-level listener.
///
/// Detaches the listener on drop. Holding a `Subscription` does not keep the
/// [`Document`] alive.
pub struct Subscription {
    id: ListenerId,
    listeners: Weak<ListenerTable>,
}

impl Subscription {
    /// The listener's id.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Returns whether the listener is still attached to a live document.
    pub fn is_active(&self) -> bool {
        self.listeners
            .upgrade()
            .is_some_and(|listeners| listeners.read().contains_key(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        // The entry is dropped after the table lock is released.
        let removed = listeners.write().remove(self.id);
        if removed.is_some() {
            debug!(id = ?self.id, "document listener detached");
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    use super::*;
    use crate::{Px, PxPosition};

    fn at(y: i32) -> PxPosition {
        PxPosition::new(Px(0), Px(y))
    }

    #[test]
    fn listeners_only_see_their_source() {
        let document = Document::new();
        let mouse_hits = Arc::new(AtomicUsize::new(0));
        let hits = Arc::clone(&mouse_hits);
        let _sub = document.subscribe(PointerSource::Mouse, move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
            EventFlow::Continue
        });

        document.dispatch(&CursorEvent::moved(PointerSource::Touch, at(1)), None);
        document.dispatch(&CursorEvent::moved(PointerSource::Mouse, at(2)), None);
        assert_eq!(mouse_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn presses_and_wheel_do_not_reach_listeners() {
        let document = Document::new();
        let _sub = document.subscribe(PointerSource::Mouse, |_| EventFlow::Consumed);

        let outcome = document.dispatch(&CursorEvent::pressed(PointerSource::Mouse, at(0)), None);
        assert_eq!(outcome.listeners_notified, 0);
        let outcome = document.dispatch(&CursorEvent::scroll(at(0), 0.0, 1.0), None);
        assert!(!outcome.default_prevented);
    }

    #[test]
    fn listener_may_drop_its_own_subscription() {
        let document = Document::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let slot_in_listener = Arc::clone(&slot);
        let subscription = document.subscribe(PointerSource::Mouse, move |_| {
            slot_in_listener.lock().take();
            EventFlow::Consumed
        });
        *slot.lock() = Some(subscription);
        assert_eq!(document.listener_count(), 1);

        let outcome =
            document.dispatch(&CursorEvent::released(PointerSource::Mouse, at(9)), None);
        assert!(outcome.default_prevented);
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_document_is_inert() {
        let document = Document::new();
        let subscription = document.subscribe(PointerSource::Touch, |_| EventFlow::Continue);
        assert!(subscription.is_active());
        drop(document);
        assert!(!subscription.is_active());
        drop(subscription);
    }
}
