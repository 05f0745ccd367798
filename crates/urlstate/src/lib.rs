#![forbid(unsafe_code)]

//! urlstate: shared state mirrored into the URL query string.
//!
//! Components that bind the same name share one signal. Writes update that
//! signal and the address bar together, and back/forward navigation flows
//! back into every binding.
//!
//! ```
//! use urlstate::prelude::*;
//!
//! let host = MemoryHost::new("/");
//! let ctx = UrlStateContext::new(host.clone());
//!
//! let (_, set_query) = ctx.use_url_state("q", &NoParams, "");
//! set_query.set("hello");
//!
//! let mut other = ctx.bind("q", &NoParams, "");
//! other.mount();
//! assert_eq!(other.value(), Value::from("hello"));
//! assert_eq!(host.current_url(), "/?q=hello");
//! ```
//!
//! The pieces live in separate crates and are re-exported here:
//! - [`core`]: value model, codec, query strings
//! - [`runtime`]: signals and the keyed store
//! - [`web`]: the URL controller and its hosts

pub use urlstate_core as core;
pub use urlstate_runtime as runtime;
pub use urlstate_web as web;

pub use urlstate_core::{CodecError, QueryString, Shape, Value, decode, encode};
pub use urlstate_runtime::{BindingScope, Signal, SignalStore, Subscription};
pub use urlstate_web::{
    AbsentKeyPolicy, BindingPhase, HistoryMode, InitialParams, MemoryHost, NoParams, Setter,
    SyncConfig, UrlBinding, UrlHost, UrlStateContext,
};

pub mod prelude {
    pub use crate::core::{QueryString, Value};
    pub use crate::runtime::SignalStore;
    pub use crate::web::{
        AbsentKeyPolicy, BindingPhase, DetachedHost, HistoryMode, InitialParams, MemoryHost,
        NoParams, ServerParams, Setter, SyncConfig, Update, UrlBinding, UrlHost, UrlStateContext,
    };

    #[cfg(target_arch = "wasm32")]
    pub use crate::web::BrowserHost;
}
