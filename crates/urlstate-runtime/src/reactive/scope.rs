#![forbid(unsafe_code)]

//! Lifecycle management for a binding's registrations.
//!
//! # Invariants
//!
//! 1. Guards are released in reverse registration order on drop or `clear()`.
//! 2. After release, no callback registered through this scope will fire.
//! 3. `clear()` leaves the scope empty but reusable.
//! 4. `binding_count()` is always accurate.

use std::any::Any;
use std::fmt;

use super::signal::Signal;
use super::subscription::Subscription;

/// Collects the registrations of a logical scope (one UI binding).
///
/// Any value whose `Drop` undoes a registration can be held: signal
/// [`Subscription`]s, navigation listener guards, timers.
///
/// ```ignore
/// let mut scope = BindingScope::new();
/// scope.subscribe(&signal, |v| println!("value: {v}"));
/// scope.hold(host.listen(on_navigate));
/// // Dropping the scope releases both.
/// ```
pub struct BindingScope {
    guards: Vec<Box<dyn Any>>,
}

impl BindingScope {
    /// Create an empty binding scope.
    #[must_use]
    pub fn new() -> Self {
        Self { guards: Vec::new() }
    }

    /// Keep `guard` alive until the scope is cleared or dropped.
    pub fn hold(&mut self, guard: impl Any) -> &mut Self {
        self.guards.push(Box::new(guard));
        self
    }

    /// Subscribe to a signal within this scope.
    pub fn subscribe<T: Clone + 'static>(
        &mut self,
        signal: &Signal<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        let sub: Subscription = signal.subscribe(callback);
        self.hold(sub)
    }

    /// Number of held registrations.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.guards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Release everything now, newest first.
    pub fn clear(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

impl Default for BindingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BindingScope {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingScope")
            .field("binding_count", &self.guards.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
