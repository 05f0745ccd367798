#![forbid(unsafe_code)]

//! Keyed signal: a shared value cell with unconditional change fan-out.
//!
//! # Design
//!
//! [`Signal<T>`] wraps a value in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). Unlike an equality-gated observable, every
//! [`Signal::write`] notifies, even when the new value equals the old one, so
//! forced re-synchronizations still reach every subscriber.
//!
//! | Operation     | Complexity                 |
//! |---------------|----------------------------|
//! | `get()`       | O(1) + clone               |
//! | `write()`     | O(S) where S = subscribers |
//! | `subscribe()` | O(1) amortized             |
//! | `unsubscribe` | O(S)                       |
//!
//! # Failure Modes
//!
//! - **Panicking subscriber**: caught per listener with `catch_unwind`,
//!   logged at `warn`, and the remaining listeners still run. The writer
//!   never observes the panic.
//! - **Re-entrant write**: allowed. Listeners run outside the interior
//!   borrow. When a listener writes again, the nested write notifies
//!   everyone with the newer value and the outer notification stops, so no
//!   subscriber ends on a stale value.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::{Rc, Weak};

use super::subscription::Subscription;

struct Listener<T> {
    id: u64,
    alive: Cell<bool>,
    callback: Box<dyn Fn(&T)>,
}

struct SignalInner<T> {
    key: String,
    value: T,
    version: u64,
    next_id: u64,
    listeners: Vec<Rc<Listener<T>>>,
}

/// A shared value cell identified by a key.
///
/// Cloning a `Signal` creates a new handle to the **same** cell.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on every write, changed or not.
/// 2. A write updates the value before any subscriber runs.
/// 3. Every subscriber registered when the write starts is called once,
///    unless it unsubscribes first or a nested write supersedes this one.
/// 4. A subscriber panic never escapes `write`.
pub struct Signal<T> {
    inner: Rc<RefCell<SignalInner<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Signal")
            .field("key", &inner.key)
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.listeners.len())
            .finish()
    }
}

impl<T: Clone + 'static> Signal<T> {
    /// Create a signal with an initial value. Version starts at 0.
    #[must_use]
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                key: key.into(),
                value,
                version: 0,
                next_id: 1,
                listeners: Vec::new(),
            })),
        }
    }

    /// The key this signal was created under.
    #[must_use]
    pub fn key(&self) -> String {
        self.inner.borrow().key.clone()
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify every current subscriber.
    pub fn write(&self, value: T) {
        let (version, value, listeners) = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
            (inner.version, inner.value.clone(), inner.listeners.clone())
        };
        self.notify(version, &value, &listeners);
    }

    /// Compute the next value from the authoritative current one, write it,
    /// and return it.
    ///
    /// `f` runs before any borrow is held for writing, so it may read other
    /// signals (but not write this one).
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> T {
        let next = self.with(f);
        self.write(next.clone());
        next
    }

    /// Register a listener called with the new value after every write.
    ///
    /// The returned [`Subscription`] unsubscribes on
    /// [`unsubscribe`](Subscription::unsubscribe) or drop; both are
    /// idempotent.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let listener = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let listener = Rc::new(Listener {
                id,
                alive: Cell::new(true),
                callback: Box::new(callback),
            });
            inner.listeners.push(Rc::clone(&listener));
            listener
        };
        let weak: Weak<RefCell<SignalInner<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            listener.alive.set(false);
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|l| l.id != listener.id);
            }
        })
    }

    /// Number of writes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Whether both handles point at the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self, version: u64, value: &T, listeners: &[Rc<Listener<T>>]) {
        for listener in listeners {
            if self.inner.borrow().version != version {
                // A listener wrote again; that write already notified everyone.
                break;
            }
            if !listener.alive.get() {
                continue;
            }
            let outcome = catch_unwind(AssertUnwindSafe(|| (listener.callback)(value)));
            if let Err(payload) = outcome {
                let key = self.inner.borrow().key.clone();
                tracing::warn!(
                    key = %key,
                    listener = listener.id,
                    panic = panic_message(payload.as_ref()),
                    "signal subscriber panicked; continuing with remaining subscribers"
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
