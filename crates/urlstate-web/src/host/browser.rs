#![forbid(unsafe_code)]

//! `window.location` / `window.history` adapter for wasm32 builds.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use super::{HostError, HostLocation, NavigationGuard, UrlHost};
use crate::config::HistoryMode;

/// Host backed by the page's real URL and session history.
///
/// Every call looks up `window` afresh, so the host is usable (and inert) in
/// workers where there is none.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHost;

fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

impl UrlHost for BrowserHost {
    fn location(&self) -> Option<HostLocation> {
        let location = web_sys::window()?.location();
        Some(HostLocation {
            path: location.pathname().unwrap_or_else(|_| "/".to_string()),
            search: location.search().unwrap_or_default(),
        })
    }

    fn commit(&self, url: &str, mode: HistoryMode) -> Result<(), HostError> {
        let window = web_sys::window().ok_or(HostError::Unavailable)?;
        let history = window
            .history()
            .map_err(|e| HostError::Rejected(js_reason(&e)))?;
        let result = match mode {
            HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(url)),
            HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(url)),
        };
        result.map_err(|e| HostError::Rejected(js_reason(&e)))
    }

    fn listen(&self, on_navigate: Rc<dyn Fn()>) -> Option<NavigationGuard> {
        let window = web_sys::window()?;
        let closure: Closure<dyn Fn()> = Closure::new(move || on_navigate());
        if let Err(err) = window
            .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
        {
            tracing::warn!(reason = %js_reason(&err), "popstate listener rejected");
            return None;
        }
        Some(NavigationGuard::new(move || {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "popstate",
                    closure.as_ref().unchecked_ref(),
                );
            }
            drop(closure);
        }))
    }
}
