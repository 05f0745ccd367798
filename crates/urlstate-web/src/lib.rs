#![forbid(unsafe_code)]

//! URL query-string synchronization for urlstate.
//!
//! A [`UrlStateContext`] hands out [`UrlBinding`]s. Each binding mirrors one
//! query parameter into a shared signal: writes go to the signal first and
//! then into the URL, and history traversal flows back into the signal.
//!
//! The environment is abstracted behind [`UrlHost`]:
//! - [`MemoryHost`] for tests and headless use
//! - [`DetachedHost`] where there is no URL (server rendering)
//! - `BrowserHost` on `wasm32`, backed by `web-sys`
//!
//! ```
//! use urlstate_web::{MemoryHost, NoParams, UrlStateContext};
//!
//! let host = MemoryHost::new("/search");
//! let ctx = UrlStateContext::new(host.clone());
//! let (value, set) = ctx.use_url_state("q", &NoParams, "");
//! assert_eq!(value.as_str(), Some(""));
//!
//! set.set("hello");
//! assert_eq!(host.current_url(), "/search?q=hello");
//! ```

pub mod binding;
pub mod config;
pub mod context;
pub mod host;
pub mod params;

pub use binding::{BindingPhase, Setter, Update, UrlBinding};
pub use config::{AbsentKeyPolicy, ConfigError, HistoryMode, SyncConfig};
pub use context::UrlStateContext;
#[cfg(target_arch = "wasm32")]
pub use host::BrowserHost;
pub use host::{DetachedHost, HostError, HostLocation, MemoryHost, NavigationGuard, UrlHost};
pub use params::{InitialParams, NoParams, ParamValue, ServerParams};
pub use urlstate_core::Value;
