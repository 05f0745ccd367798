#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::fmt;

/// RAII guard for a signal listener.
///
/// [`unsubscribe`](Self::unsubscribe) detaches the listener immediately.
/// Calling it again, or dropping the guard afterwards, is a no-op.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    release: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    pub(crate) fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: RefCell::new(Some(Box::new(release))),
        }
    }

    /// Detach the listener. Idempotent.
    pub fn unsubscribe(&self) {
        let release = self.release.borrow_mut().take();
        if let Some(release) = release {
            release();
        }
    }

    /// Whether the listener is still attached.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.release.borrow().is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn release_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let sub = Subscription::new(move || c.set(c.get() + 1));
        assert!(sub.is_active());

        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        drop(sub);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn drop_releases() {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        drop(Subscription::new(move || c.set(c.get() + 1)));
        assert_eq!(calls.get(), 1);
    }
}
