#![forbid(unsafe_code)]

//! Page fixtures for urlstate scenario tests.
//!
//! A [`Page`] is one simulated document: a signal store, an in-memory
//! session history and a context tying them together. Bindings are mounted
//! the way a UI framework would mount them, and history is driven with
//! [`Page::back`] / [`Page::forward`].
//!
//! ```
//! use urlstate_harness::{Page, assert_url};
//!
//! let page = Page::new("/");
//! let q = page.mount("q", "");
//! q.set("hello");
//! assert_url!(page, "/?q=hello");
//! ```

pub mod strategies;

use urlstate_core::{QueryString, Value, decode};
use urlstate_runtime::SignalStore;
use urlstate_web::{
    InitialParams, MemoryHost, NoParams, SyncConfig, UrlBinding, UrlHost, UrlStateContext,
};

/// Assert the page's current URL (path plus query).
#[macro_export]
macro_rules! assert_url {
    ($page:expr, $expected:expr $(,)?) => {{
        let actual = $page.url();
        assert_eq!(
            actual, $expected,
            "url mismatch (history: {:?})",
            $page.host().entries()
        );
    }};
}

/// One simulated document.
#[derive(Debug, Clone)]
pub struct Page {
    ctx: UrlStateContext,
    host: MemoryHost,
}

impl Page {
    /// A page opened at `url` with the default policy.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self::with_config(url, SyncConfig::default())
    }

    #[must_use]
    pub fn with_config(url: &str, config: SyncConfig) -> Self {
        let host = MemoryHost::new(url);
        let ctx = UrlStateContext::new(host.clone()).with_config(config);
        Self { ctx, host }
    }

    /// A full reload of the current URL: fresh store, fresh history, and the
    /// current query as the server-rendered parameters.
    #[must_use]
    pub fn reload(&self) -> (Self, QueryString) {
        let page = Self::with_config(&self.url(), self.ctx.config().clone());
        let params = page.query();
        (page, params)
    }

    #[must_use]
    pub fn ctx(&self) -> &UrlStateContext {
        &self.ctx
    }

    #[must_use]
    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    #[must_use]
    pub fn store(&self) -> &SignalStore<Value> {
        self.ctx.store()
    }

    /// Bind without initial parameters and mount.
    #[must_use]
    pub fn mount(&self, name: &str, default: impl Into<Value>) -> UrlBinding {
        self.mount_with(name, &NoParams, default)
    }

    /// Bind with initial parameters and mount.
    #[must_use]
    pub fn mount_with(
        &self,
        name: &str,
        params: &(impl InitialParams + ?Sized),
        default: impl Into<Value>,
    ) -> UrlBinding {
        let mut binding = self.ctx.bind(name, params, default);
        binding.mount();
        binding
    }

    /// Current URL.
    #[must_use]
    pub fn url(&self) -> String {
        self.host.current_url()
    }

    /// Current query, decoded once.
    #[must_use]
    pub fn query(&self) -> QueryString {
        self.host
            .location()
            .map(|location| location.query())
            .unwrap_or_default()
    }

    /// Whether the URL carries the parameter for `key`.
    #[must_use]
    pub fn has_param(&self, key: &str) -> bool {
        self.query().contains(key)
    }

    /// Decode the URL's parameter for `key` as a binding would.
    #[must_use]
    pub fn param_value(&self, key: &str, hint: &Value) -> Value {
        decode(self.query().get(key), Some(hint))
    }

    /// Value of the signal stored under `key`.
    #[must_use]
    pub fn signal_value(&self, key: &str) -> Option<Value> {
        self.store().get(key).map(|signal| signal.get())
    }

    pub fn back(&self) -> bool {
        self.host.back()
    }

    pub fn forward(&self) -> bool {
        self.host.forward()
    }

    pub fn go(&self, delta: isize) -> bool {
        self.host.go(delta)
    }

    /// Number of history entries.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.host.len()
    }
}
