#![forbid(unsafe_code)]

use std::fmt;
use std::rc::Rc;

use urlstate_core::Value;
use urlstate_runtime::SignalStore;

use crate::binding::{Setter, UrlBinding};
use crate::config::SyncConfig;
use crate::host::{DetachedHost, UrlHost};
use crate::params::InitialParams;

/// Everything bindings share: the signal store, the URL host and the policy.
///
/// Cheap to clone; clones share the store and host. Create one per mounted
/// application (or per test) and hand it to whatever builds bindings.
#[derive(Clone)]
pub struct UrlStateContext {
    store: SignalStore<Value>,
    host: Rc<dyn UrlHost>,
    config: Rc<SyncConfig>,
}

impl UrlStateContext {
    /// Fresh store, default policy.
    pub fn new(host: impl UrlHost + 'static) -> Self {
        Self {
            store: SignalStore::new(),
            host: Rc::new(host),
            config: Rc::new(SyncConfig::default()),
        }
    }

    /// A context with no URL environment (server rendering).
    #[must_use]
    pub fn detached() -> Self {
        Self::new(DetachedHost)
    }

    /// A context bound to the page's real URL.
    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn browser() -> Self {
        Self::new(crate::host::BrowserHost)
    }

    /// Share an existing store, e.g. one seeded during server rendering.
    #[must_use]
    pub fn with_store(mut self, store: SignalStore<Value>) -> Self {
        self.store = store;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = Rc::new(config);
        self
    }

    #[must_use]
    pub fn store(&self) -> &SignalStore<Value> {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> Rc<dyn UrlHost> {
        Rc::clone(&self.host)
    }

    /// Create a binding in the `Created` phase. Call
    /// [`UrlBinding::mount`] once the element is on screen.
    pub fn bind(
        &self,
        name: &str,
        params: &(impl InitialParams + ?Sized),
        default: impl Into<Value>,
    ) -> UrlBinding {
        UrlBinding::create(
            &self.store,
            Rc::clone(&self.host),
            &self.config,
            name,
            params,
            default.into(),
        )
    }

    /// Bind, mount, and return the current value with a setter.
    ///
    /// The setter owns the binding; it stays live until the setter and all
    /// of its clones are dropped.
    pub fn use_url_state(
        &self,
        name: &str,
        params: &(impl InitialParams + ?Sized),
        default: impl Into<Value>,
    ) -> (Value, Setter) {
        let mut binding = self.bind(name, params, default);
        binding.mount();
        (binding.value(), binding.into_setter())
    }
}

impl fmt::Debug for UrlStateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlStateContext")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
