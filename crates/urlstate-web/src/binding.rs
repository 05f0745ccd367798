#![forbid(unsafe_code)]

//! One UI element's view of a URL-backed key.
//!
//! # Lifecycle
//!
//! ```text
//! Created ──mount()──▶ Mounted ──(host can observe navigation)──▶ Live
//!    │                    │                                        │
//!    └────────────────────┴──────────── release() / drop ──────────┴──▶ TornDown
//! ```
//!
//! - **Created**: the signal exists (seeded from the initial parameters or
//!   the default) and the local copy mirrors it.
//! - **Mounted**: the live URL has been reconciled into the signal and the
//!   local copy follows every write.
//! - **Live**: history traversal is reconciled as well.
//! - **TornDown**: both registrations are gone; the signal is untouched.
//!
//! # URL layout
//!
//! The query parameter is named by the binding's storage key (the name
//! escaped once). Its value is the codec text escaped once more before the
//! query string applies its own escaping, so the codec always receives text
//! it can percent-decode exactly once.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use urlstate_core::percent::encode_component;
use urlstate_core::{Value, decode, encode, href, storage_key};
use urlstate_runtime::{BindingScope, Signal, SignalStore};

use crate::config::{AbsentKeyPolicy, HistoryMode, SyncConfig};
use crate::host::{HostError, UrlHost};
use crate::params::InitialParams;

/// Where a [`UrlBinding`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingPhase {
    Created,
    Mounted,
    Live,
    TornDown,
}

/// A value change: a literal, or a function of the authoritative current
/// value.
pub enum Update {
    Set(Value),
    With(Box<dyn FnOnce(&Value) -> Value>),
}

impl Update {
    /// Wrap an updater function.
    pub fn with(f: impl FnOnce(&Value) -> Value + 'static) -> Self {
        Self::With(Box::new(f))
    }
}

impl From<Value> for Update {
    fn from(value: Value) -> Self {
        Self::Set(value)
    }
}

impl fmt::Debug for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set(value) => f.debug_tuple("Set").field(value).finish(),
            Self::With(_) => f.write_str("With(..)"),
        }
    }
}

/// Shared write path: signal first, then the URL.
struct UrlWriter {
    name: String,
    key: String,
    signal: Signal<Value>,
    host: Rc<dyn UrlHost>,
    history: HistoryMode,
}

impl UrlWriter {
    fn apply(&self, update: Update) {
        let next = match update {
            Update::Set(value) => {
                self.signal.write(value.clone());
                value
            }
            Update::With(f) => self.signal.update(f),
        };
        self.mirror(&next);
    }

    fn mirror(&self, value: &Value) {
        let Some(location) = self.host.location() else {
            tracing::debug!(key = %self.key, "no URL environment; mirror skipped");
            return;
        };
        let mut query = location.query();
        if value.is_absent() {
            query.remove(&self.key);
        } else {
            query.set(&self.key, encode_component(&encode(value)));
        }
        let url = href(&location.path, &query);
        match self.host.commit(&url, self.history) {
            Ok(()) => tracing::debug!(
                key = %self.key,
                url = %url,
                mode = self.history.as_str(),
                "url committed"
            ),
            Err(HostError::Unavailable) => {
                tracing::debug!(key = %self.key, "history unavailable; commit skipped");
            }
            Err(err) => tracing::warn!(key = %self.key, url = %url, error = %err, "history commit failed"),
        }
    }

    /// Raw parameter text in the live URL. Outer `None`: no URL at all.
    fn live_param(&self) -> Option<Option<String>> {
        let location = self.host.location()?;
        Some(location.query().get(&self.key).map(str::to_owned))
    }

    fn follow_navigation(&self, default: &Value) {
        let Some(raw) = self.live_param() else {
            return;
        };
        let value = decode(raw.as_deref(), Some(default));
        tracing::debug!(key = %self.key, present = raw.is_some(), "navigation reconciled");
        self.signal.write(value);
    }
}

/// Cloneable write handle for one key.
///
/// A setter obtained from
/// [`UrlStateContext::use_url_state`](crate::UrlStateContext::use_url_state)
/// also owns its binding: the binding is torn down when the last clone drops.
#[derive(Clone)]
pub struct Setter {
    writer: Rc<UrlWriter>,
    owner: Option<Rc<UrlBinding>>,
}

impl Setter {
    /// Write a literal value.
    pub fn set(&self, value: impl Into<Value>) {
        self.writer.apply(Update::Set(value.into()));
    }

    /// Write `f(current)`, where `current` is the signal's value at call time.
    pub fn update(&self, f: impl FnOnce(&Value) -> Value + 'static) {
        self.writer.apply(Update::with(f));
    }

    pub fn apply(&self, update: impl Into<Update>) {
        self.writer.apply(update.into());
    }

    /// The signal's current value.
    #[must_use]
    pub fn current(&self) -> Value {
        self.writer.signal.get()
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.writer.key
    }

    /// The binding this setter keeps alive, if any.
    #[must_use]
    pub fn binding(&self) -> Option<&UrlBinding> {
        self.owner.as_deref()
    }
}

impl fmt::Debug for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setter")
            .field("key", &self.writer.key)
            .field("owns_binding", &self.owner.is_some())
            .finish()
    }
}

type ChangeHook = Rc<RefCell<Option<Rc<dyn Fn(&Value)>>>>;

/// A single UI element's binding to a URL-backed key.
pub struct UrlBinding {
    writer: Rc<UrlWriter>,
    default: Value,
    absent_on_mount: AbsentKeyPolicy,
    local: Rc<RefCell<Value>>,
    on_change: ChangeHook,
    scope: BindingScope,
    phase: BindingPhase,
}

impl UrlBinding {
    pub(crate) fn create(
        store: &SignalStore<Value>,
        host: Rc<dyn UrlHost>,
        config: &SyncConfig,
        name: &str,
        params: &(impl InitialParams + ?Sized),
        default: Value,
    ) -> Self {
        let name = if name.is_empty() {
            tracing::warn!(
                placeholder = %config.placeholder_name,
                "url state bound with an empty name; using placeholder"
            );
            config.placeholder_name.clone()
        } else {
            name.to_string()
        };
        let key = storage_key(&name);

        let signal = store.get_or_create_with(&key, || {
            let raw = params.param(&key).or_else(|| params.param(&name));
            decode(raw.as_deref(), Some(&default))
        });
        let local = Rc::new(RefCell::new(signal.get()));

        Self {
            writer: Rc::new(UrlWriter {
                name,
                key,
                signal,
                host,
                history: config.history,
            }),
            default,
            absent_on_mount: config.absent_on_mount,
            local,
            on_change: Rc::new(RefCell::new(None)),
            scope: BindingScope::new(),
            phase: BindingPhase::Created,
        }
    }

    /// Public name (after placeholder substitution).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.writer.name
    }

    /// Storage key, also used as the query parameter name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.writer.key
    }

    #[must_use]
    pub fn phase(&self) -> BindingPhase {
        self.phase
    }

    /// The binding's local copy of the value.
    #[must_use]
    pub fn value(&self) -> Value {
        self.local.borrow().clone()
    }

    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// The shared signal behind this binding.
    #[must_use]
    pub fn signal(&self) -> &Signal<Value> {
        &self.writer.signal
    }

    /// Current value and a setter, the hook-style pair.
    #[must_use]
    pub fn state(&self) -> (Value, Setter) {
        (self.value(), self.setter())
    }

    #[must_use]
    pub fn setter(&self) -> Setter {
        Setter {
            writer: Rc::clone(&self.writer),
            owner: None,
        }
    }

    pub fn set(&self, value: impl Into<Value>) {
        self.writer.apply(Update::Set(value.into()));
    }

    pub fn update(&self, f: impl FnOnce(&Value) -> Value + 'static) {
        self.writer.apply(Update::with(f));
    }

    /// Install the re-render hook, called with each new value once mounted.
    /// Replaces any previous hook.
    pub fn on_change(&self, hook: impl Fn(&Value) + 'static) {
        *self.on_change.borrow_mut() = Some(Rc::new(hook));
    }

    /// Reconcile with the live URL and start following the signal and
    /// history traversal. Only the first call has an effect.
    pub fn mount(&mut self) {
        if self.phase != BindingPhase::Created {
            tracing::trace!(key = %self.writer.key, phase = ?self.phase, "mount ignored");
            return;
        }

        let local = Rc::clone(&self.local);
        let hook = Rc::clone(&self.on_change);
        self.scope.subscribe(&self.writer.signal, move |value: &Value| {
            *local.borrow_mut() = value.clone();
            let hook = hook.borrow().clone();
            if let Some(hook) = hook {
                hook(value);
            }
        });

        self.reconcile_on_mount();
        *self.local.borrow_mut() = self.writer.signal.get();
        self.phase = BindingPhase::Mounted;

        let writer: Weak<UrlWriter> = Rc::downgrade(&self.writer);
        let default = self.default.clone();
        let on_navigate: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(writer) = writer.upgrade() {
                writer.follow_navigation(&default);
            }
        });
        match self.writer.host.listen(on_navigate) {
            Some(guard) => {
                self.scope.hold(guard);
                self.phase = BindingPhase::Live;
            }
            None => {
                tracing::debug!(key = %self.writer.key, "host cannot observe navigation");
            }
        }
    }

    fn reconcile_on_mount(&self) {
        let Some(raw) = self.writer.live_param() else {
            tracing::debug!(key = %self.writer.key, "no URL environment; mount reconciliation skipped");
            return;
        };
        match raw {
            Some(raw) => {
                let value = decode(Some(&raw), Some(&self.default));
                tracing::debug!(key = %self.writer.key, "mount reconciled from URL");
                self.writer.signal.write(value);
            }
            None => match self.absent_on_mount {
                AbsentKeyPolicy::Keep => {
                    tracing::debug!(key = %self.writer.key, "key absent on mount; value kept");
                }
                AbsentKeyPolicy::ResetToDefault => {
                    tracing::debug!(key = %self.writer.key, "key absent on mount; reset to default");
                    self.writer.signal.write(self.default.clone());
                }
            },
        }
    }

    /// Drop both registrations. The signal keeps its value. Idempotent.
    pub fn release(&mut self) {
        if self.phase == BindingPhase::TornDown {
            return;
        }
        self.scope.clear();
        self.phase = BindingPhase::TornDown;
    }

    pub(crate) fn into_setter(self) -> Setter {
        let writer = Rc::clone(&self.writer);
        Setter {
            writer,
            owner: Some(Rc::new(self)),
        }
    }
}

impl Drop for UrlBinding {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for UrlBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlBinding")
            .field("name", &self.writer.name)
            .field("key", &self.writer.key)
            .field("phase", &self.phase)
            .field("value", &*self.local.borrow())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
