#![forbid(unsafe_code)]

//! Keyed reactive signal store for urlstate.
//!
//! See [`reactive`] for the primitives and their invariants.

pub mod reactive;

pub use reactive::{BindingScope, Signal, SignalStore, Subscription};
