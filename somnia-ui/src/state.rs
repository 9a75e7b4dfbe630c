//! Shared state handles.
//!
//! [`State<T>`] is a cloneable handle around a lock. Components keep their
//! state behind one so document-level listeners can reach it, and hand out
//! [`WeakState<T>`] to anything that must not keep the component alive.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

/// Cloneable handle to shared component state.
///
/// # Examples
///
/// ```
/// use somnia_ui::State;
///
/// let count = State::new(0usize);
/// let alias = count.clone();
/// alias.with_mut(|c| *c += 1);
/// assert_eq!(count.get(), 1);
/// ```
pub struct State<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> State<T> {
    /// Wraps `value` in a new handle.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Execute a closure with a shared reference to the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with a mutable reference to the stored value.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Get a cloned value. Requires `T: Clone`.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(Clone::clone)
    }

    /// Replace the stored value.
    pub fn set(&self, value: T) {
        self.with_mut(|slot| *slot = value);
    }

    /// Creates a non-owning handle.
    pub fn downgrade(&self) -> WeakState<T> {
        WeakState {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Returns whether both handles point at the same state.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Non-owning counterpart of [`State<T>`].
pub struct WeakState<T> {
    inner: Weak<RwLock<T>>,
}

impl<T> Clone for WeakState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> WeakState<T> {
    /// Returns the owning handle if the state is still alive.
    pub fn upgrade(&self) -> Option<State<T>> {
        self.inner.upgrade().map(|inner| State { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_handle_does_not_keep_state_alive() {
        let state = State::new(String::from("6:30 AM"));
        let weak = state.downgrade();
        assert_eq!(weak.upgrade().map(|s| s.get()).as_deref(), Some("6:30 AM"));

        drop(state);
        assert!(weak.upgrade().is_none());
    }
}
