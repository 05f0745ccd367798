#![forbid(unsafe_code)]

//! Keyed registry of [`Signal`]s.
//!
//! A [`SignalStore`] is an explicitly owned handle (cheap `Clone`, shared
//! interior) rather than a process global, so independent stores can coexist,
//! for example one per test or one per mounted application.
//!
//! # Invariants
//!
//! 1. At most one signal exists per key for the lifetime of the store.
//! 2. `get_or_create` is idempotent: the seed of the first call wins and later
//!    seeds are ignored (and, for `get_or_create_with`, never computed).
//! 3. Signals are never removed; dropping a binding does not drop its signal.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::signal::Signal;

/// Registry mapping keys to shared signals.
pub struct SignalStore<T> {
    signals: Rc<RefCell<BTreeMap<String, Signal<T>>>>,
}

impl<T> Clone for SignalStore<T> {
    fn clone(&self) -> Self {
        Self {
            signals: Rc::clone(&self.signals),
        }
    }
}

impl<T> Default for SignalStore<T> {
    fn default() -> Self {
        Self {
            signals: Rc::new(RefCell::new(BTreeMap::new())),
        }
    }
}

impl<T> fmt::Debug for SignalStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalStore")
            .field("keys", &self.signals.borrow().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: Clone + 'static> SignalStore<T> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the signal for `key`, creating it with `initial` if missing.
    pub fn get_or_create(&self, key: &str, initial: T) -> Signal<T> {
        self.get_or_create_with(key, || initial)
    }

    /// Like [`get_or_create`](Self::get_or_create), computing the seed only
    /// when the key is new.
    pub fn get_or_create_with(&self, key: &str, seed: impl FnOnce() -> T) -> Signal<T> {
        if let Some(existing) = self.get(key) {
            tracing::trace!(key, "signal store hit");
            return existing;
        }
        // Seed outside the borrow: it may consult this store.
        let signal = Signal::new(key, seed());
        let mut signals = self.signals.borrow_mut();
        let signal = signals.entry(key.to_owned()).or_insert(signal).clone();
        tracing::trace!(key, "signal store miss; created");
        signal
    }

    /// The signal for `key`, if one exists.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Signal<T>> {
        self.signals.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.signals.borrow().contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.signals.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All keys, in order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.signals.borrow().keys().cloned().collect()
    }

    /// Whether both handles share the same registry.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.signals, &other.signals)
    }
}
