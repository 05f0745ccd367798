#![forbid(unsafe_code)]

//! Keyed reactive state for urlstate.
//!
//! - [`Signal`]: a shared value cell that notifies every subscriber on every
//!   write, with per-listener panic isolation.
//! - [`Subscription`]: RAII guard with an idempotent `unsubscribe()`.
//! - [`SignalStore`]: explicitly owned key → signal registry with
//!   first-seed-wins get-or-create.
//! - [`BindingScope`]: holds a binding's registrations and releases them in
//!   reverse order on teardown.
//!
//! # Architecture
//!
//! Everything is single-threaded (`Rc<RefCell<..>>`): writes, notifications,
//! and teardown all complete within the event turn that triggered them.
//!
//! # Invariants
//!
//! 1. One signal per key per store; every lookup returns the same cell.
//! 2. A write is fully applied before the first subscriber runs.
//! 3. Writes never short-circuit on equality.
//! 4. A panicking subscriber is logged and skipped, never propagated.
//! 5. Releasing a scope never changes a signal's value.

pub mod scope;
pub mod signal;
pub mod store;
pub mod subscription;

pub use scope::BindingScope;
pub use signal::Signal;
pub use store::SignalStore;
pub use subscription::Subscription;
