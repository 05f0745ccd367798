#![forbid(unsafe_code)]

use std::rc::Rc;

use super::{HostError, HostLocation, NavigationGuard, UrlHost};
use crate::config::HistoryMode;

/// Host for contexts without a URL (server rendering, headless use).
///
/// Reads see no location, commits fail with [`HostError::Unavailable`], and
/// no navigation is ever observed, so bindings degrade to store-only state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHost;

impl UrlHost for DetachedHost {
    fn location(&self) -> Option<HostLocation> {
        None
    }

    fn commit(&self, _url: &str, _mode: HistoryMode) -> Result<(), HostError> {
        Err(HostError::Unavailable)
    }

    fn listen(&self, _on_navigate: Rc<dyn Fn()>) -> Option<NavigationGuard> {
        None
    }
}
