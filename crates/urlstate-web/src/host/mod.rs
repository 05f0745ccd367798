#![forbid(unsafe_code)]

//! Platform adapters for the page URL, session history and navigation.
//!
//! A [`UrlHost`] is everything the controller needs from its environment:
//!
//! - [`UrlHost::location`] reads the live path and query
//! - [`UrlHost::commit`] pushes or replaces a history entry
//! - [`UrlHost::listen`] observes back/forward traversal
//!
//! Committing never triggers the navigation listener; only traversal does
//! (the `popstate` contract).

mod detached;
mod memory;

#[cfg(target_arch = "wasm32")]
mod browser;

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use urlstate_core::QueryString;

use crate::config::HistoryMode;

pub use detached::DetachedHost;
pub use memory::MemoryHost;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHost;

/// Snapshot of the live URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostLocation {
    /// Path component, e.g. `/search`.
    pub path: String,
    /// Query component including the leading `?`, or empty.
    pub search: String,
}

impl HostLocation {
    /// Split an href-like string (`/path?query#fragment`) into its parts.
    /// The fragment is dropped.
    #[must_use]
    pub fn parse(url: &str) -> Self {
        let url = url.split_once('#').map_or(url, |(head, _)| head);
        match url.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_string(),
                search: if query.is_empty() {
                    String::new()
                } else {
                    format!("?{query}")
                },
            },
            None => Self {
                path: url.to_string(),
                search: String::new(),
            },
        }
    }

    /// Parsed query parameters.
    #[must_use]
    pub fn query(&self) -> QueryString {
        QueryString::parse(&self.search)
    }

    /// `path` followed by `search`.
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}{}", self.path, self.search)
    }
}

/// Why a host could not perform an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// No URL environment (server render, detached context).
    Unavailable,
    /// The environment refused the operation.
    Rejected(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "URL environment unavailable"),
            Self::Rejected(reason) => write!(f, "history update rejected: {reason}"),
        }
    }
}

impl std::error::Error for HostError {}

/// Platform adapter for URL state.
pub trait UrlHost {
    /// The live URL, or `None` when there is no URL environment.
    fn location(&self) -> Option<HostLocation>;

    /// Commit `url` (path plus query) to the session history.
    fn commit(&self, url: &str, mode: HistoryMode) -> Result<(), HostError>;

    /// Call `on_navigate` after every history traversal until the returned
    /// guard is dropped. `None` when the host cannot observe navigation.
    fn listen(&self, on_navigate: Rc<dyn Fn()>) -> Option<NavigationGuard>;
}

/// RAII guard for a navigation listener. Dropping it unregisters the
/// listener; [`release`](Self::release) does so early and is idempotent.
#[must_use = "dropping a NavigationGuard unregisters its listener"]
pub struct NavigationGuard {
    release: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl NavigationGuard {
    /// Wrap the host-specific unregistration.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: RefCell::new(Some(Box::new(release))),
        }
    }

    pub fn release(&self) {
        let release = self.release.borrow_mut().take();
        if let Some(release) = release {
            release();
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.release.borrow().is_some()
    }
}

impl Drop for NavigationGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for NavigationGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationGuard")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    #[test]
    fn parse_location() {
        assert_eq!(
            HostLocation::parse("/search?q=hi&page=2#top"),
            HostLocation {
                path: "/search".to_string(),
                search: "?q=hi&page=2".to_string(),
            }
        );
        assert_eq!(HostLocation::parse("/").search, "");
        assert_eq!(HostLocation::parse("/a?").search, "");
        assert_eq!(HostLocation::parse("/a?x=1").query().get("x"), Some("1"));
    }

    #[test]
    fn href_joins_parts() {
        let location = HostLocation::parse("/a?x=1#frag");
        assert_eq!(location.href(), "/a?x=1");
    }

    #[test]
    fn guard_releases_once() {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let guard = NavigationGuard::new(move || c.set(c.get() + 1));
        assert!(guard.is_active());
        guard.release();
        guard.release();
        assert!(!guard.is_active());
        drop(guard);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn host_error_display() {
        assert_eq!(
            HostError::Unavailable.to_string(),
            "URL environment unavailable"
        );
        assert_eq!(
            HostError::Rejected("SecurityError".into()).to_string(),
            "history update rejected: SecurityError"
        );
    }
}
