#![forbid(unsafe_code)]

//! Deterministic in-process session history.
//!
//! [`MemoryHost`] models the browser's history stack closely enough to drive
//! every controller path without a browser: `commit` pushes or replaces the
//! current entry silently, while [`back`](MemoryHost::back),
//! [`forward`](MemoryHost::forward) and [`go`](MemoryHost::go) move the
//! cursor and then fire every navigation listener.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{HostError, HostLocation, NavigationGuard, UrlHost};
use crate::config::HistoryMode;

type Listener = Rc<dyn Fn()>;

struct History {
    entries: Vec<String>,
    index: usize,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Shared handle to an in-memory history stack. Clones share the stack.
#[derive(Clone)]
pub struct MemoryHost {
    history: Rc<RefCell<History>>,
}

impl MemoryHost {
    /// Start with a single entry at `url` (path plus optional query).
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            history: Rc::new(RefCell::new(History {
                entries: vec![url.into()],
                index: 0,
                next_id: 1,
                listeners: Vec::new(),
            })),
        }
    }

    /// The current entry.
    #[must_use]
    pub fn current_url(&self) -> String {
        let history = self.history.borrow();
        history.entries[history.index].clone()
    }

    /// Every entry, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.history.borrow().entries.clone()
    }

    /// Position of the current entry in [`entries`](Self::entries).
    #[must_use]
    pub fn index(&self) -> usize {
        self.history.borrow().index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of registered navigation listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.history.borrow().listeners.len()
    }

    /// Push an entry on behalf of some other party (a link, another router)
    /// without notifying listeners, as `history.pushState` would.
    pub fn navigate_external(&self, url: impl Into<String>) {
        self.push(url.into());
    }

    /// Traverse one entry back. Returns whether the cursor moved.
    pub fn back(&self) -> bool {
        self.go(-1)
    }

    /// Traverse one entry forward. Returns whether the cursor moved.
    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Traverse by `delta` entries and notify listeners. Out-of-range and
    /// zero deltas do nothing.
    pub fn go(&self, delta: isize) -> bool {
        let listeners = {
            let mut history = self.history.borrow_mut();
            let Some(target) = history.index.checked_add_signed(delta) else {
                return false;
            };
            if delta == 0 || target >= history.entries.len() {
                return false;
            }
            history.index = target;
            tracing::debug!(
                url = %history.entries[target],
                index = target,
                "memory history traversal"
            );
            history
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect::<Vec<_>>()
        };
        // Listeners read the location, so no borrow may be held here.
        for listener in listeners {
            listener();
        }
        true
    }

    fn push(&self, url: String) {
        let mut history = self.history.borrow_mut();
        let next = history.index + 1;
        history.entries.truncate(next);
        history.entries.push(url);
        history.index = next;
    }

    fn replace(&self, url: String) {
        let mut history = self.history.borrow_mut();
        let index = history.index;
        history.entries[index] = url;
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new("/")
    }
}

impl fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history = self.history.borrow();
        f.debug_struct("MemoryHost")
            .field("entries", &history.entries)
            .field("index", &history.index)
            .field("listener_count", &history.listeners.len())
            .finish()
    }
}

impl UrlHost for MemoryHost {
    fn location(&self) -> Option<HostLocation> {
        Some(HostLocation::parse(&self.current_url()))
    }

    fn commit(&self, url: &str, mode: HistoryMode) -> Result<(), HostError> {
        match mode {
            HistoryMode::Push => self.push(url.to_string()),
            HistoryMode::Replace => self.replace(url.to_string()),
        }
        Ok(())
    }

    fn listen(&self, on_navigate: Rc<dyn Fn()>) -> Option<NavigationGuard> {
        let id = {
            let mut history = self.history.borrow_mut();
            let id = history.next_id;
            history.next_id += 1;
            history.listeners.push((id, on_navigate));
            id
        };
        let weak = Rc::downgrade(&self.history);
        Some(NavigationGuard::new(move || {
            if let Some(history) = weak.upgrade() {
                history.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        }))
    }
}
