#![forbid(unsafe_code)]

//! Synchronization policy.
//!
//! [`SyncConfig`] is plain data: build it in code with the `with_*` methods,
//! or load it from JSON (always) or TOML (`policy-config` feature).
//!
//! ```
//! use urlstate_web::config::{AbsentKeyPolicy, HistoryMode, SyncConfig};
//!
//! let config = SyncConfig::from_json_str(r#"{"history": "replace"}"#).unwrap();
//! assert_eq!(config.history, HistoryMode::Replace);
//! assert_eq!(config.absent_on_mount, AbsentKeyPolicy::Keep);
//! ```

use core::fmt;

use serde::Deserialize;

/// How programmatic writes are committed to the session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    /// Every write becomes its own back/forward entry.
    #[default]
    Push,
    /// Writes rewrite the current entry.
    Replace,
}

impl HistoryMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Replace => "replace",
        }
    }
}

/// What post-mount reconciliation does when the live URL lacks the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentKeyPolicy {
    /// Leave the resolved initial value untouched.
    #[default]
    Keep,
    /// Force the binding's default value into the signal.
    ResetToDefault,
}

/// Errors from loading a configuration or a parameter snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Malformed JSON.
    Json(String),
    /// Malformed TOML.
    Toml(String),
    /// Well-formed but unusable.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::Toml(msg) => write!(f, "TOML parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Policy knobs for URL synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// History commit mode for programmatic writes.
    pub history: HistoryMode,
    /// Post-mount behavior when the live URL lacks the key.
    pub absent_on_mount: AbsentKeyPolicy,
    /// Name substituted when a binding is created with an empty name.
    pub placeholder_name: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            history: HistoryMode::Push,
            absent_on_mount: AbsentKeyPolicy::Keep,
            placeholder_name: "state".to_string(),
        }
    }
}

impl SyncConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_history(mut self, history: HistoryMode) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn with_absent_on_mount(mut self, policy: AbsentKeyPolicy) -> Self {
        self.absent_on_mount = policy;
        self
    }

    /// Set the placeholder name. Blank names are ignored.
    #[must_use]
    pub fn with_placeholder_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.placeholder_name = name;
        }
        self
    }

    /// Reject configurations that cannot be honored.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholder_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "placeholder_name must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML. Missing fields take their defaults.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(toml_text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(toml_text).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
