#![forbid(unsafe_code)]

//! Initial-parameter snapshots.
//!
//! When a binding is created it seeds its signal from whatever query
//! parameters the page was rendered with. Those arrive in many shapes: a
//! parsed [`QueryString`], a map handed over by a server framework, or a JSON
//! payload embedded in the page. [`InitialParams`] hides the difference.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::Deserialize;
use urlstate_core::QueryString;

use crate::config::ConfigError;

/// Read-only lookup of an initial query parameter by name.
pub trait InitialParams {
    /// The first value for `name`, if present.
    fn param(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// No parameters at all (client-only mounts, tests).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoParams;

impl InitialParams for NoParams {
    fn param(&self, _name: &str) -> Option<Cow<'_, str>> {
        None
    }
}

/// One server-side parameter: a single value or a repeated one.
///
/// Untagged, so `{"q": "x", "tag": ["a", "b"]}` deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    One(String),
    Many(Vec<String>),
}

impl ParamValue {
    /// The first value; `None` for an empty list.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.first().map(String::as_str),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// Parameter snapshot deserialized from a server payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ServerParams(BTreeMap<String, ParamValue>);

impl ServerParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `name -> string | [string]`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Add or replace a parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl InitialParams for ServerParams {
    fn param(&self, name: &str) -> Option<Cow<'_, str>> {
        self.0.param(name)
    }
}

// ---------------------------------------------------------------------------
// Standard containers
// ---------------------------------------------------------------------------

impl InitialParams for QueryString {
    fn param(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(Cow::Borrowed)
    }
}

impl<S: BuildHasher> InitialParams for HashMap<String, String, S> {
    fn param(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl InitialParams for BTreeMap<String, String> {
    fn param(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl<S: BuildHasher> InitialParams for HashMap<String, Vec<String>, S> {
    fn param(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name)
            .and_then(|values| values.first())
            .map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl InitialParams for BTreeMap<String, Vec<String>> {
    fn param(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name)
            .and_then(|values| values.first())
            .map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl<S: BuildHasher> InitialParams for HashMap<String, ParamValue, S> {
    fn param(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).and_then(ParamValue::first).map(Cow::Borrowed)
    }
}

impl InitialParams for BTreeMap<String, ParamValue> {
    fn param(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).and_then(ParamValue::first).map(Cow::Borrowed)
    }
}

impl<P: InitialParams> InitialParams for Option<P> {
    fn param(&self, name: &str) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(|params| params.param(name))
    }
}

impl<P: InitialParams + ?Sized> InitialParams for &P {
    fn param(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).param(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lookup(params: &dyn InitialParams, name: &str) -> Option<String> {
        params.param(name).map(Cow::into_owned)
    }

    #[test]
    fn no_params() {
        assert_eq!(lookup(&NoParams, "q"), None);
    }

    #[test]
    fn query_string_first_value() {
        let query = QueryString::parse("q=a&q=b&x=");
        assert_eq!(lookup(&query, "q"), Some("a".into()));
        assert_eq!(lookup(&query, "x"), Some(String::new()));
        assert_eq!(lookup(&query, "missing"), None);
    }

    #[test]
    fn string_maps() {
        let mut hash = HashMap::new();
        hash.insert("q".to_string(), "hi".to_string());
        assert_eq!(lookup(&hash, "q"), Some("hi".into()));

        let tree: BTreeMap<String, String> = [("q".to_string(), "t".to_string())].into();
        assert_eq!(lookup(&tree, "q"), Some("t".into()));
    }

    #[test]
    fn multi_value_maps_take_first() {
        let hash: HashMap<String, Vec<String>> =
            [("tag".to_string(), vec!["a".to_string(), "b".to_string()])].into();
        assert_eq!(lookup(&hash, "tag"), Some("a".into()));

        let empty: BTreeMap<String, Vec<String>> = [("tag".to_string(), Vec::new())].into();
        assert_eq!(lookup(&empty, "tag"), None);
    }

    #[test]
    fn server_params_from_json() {
        let params = ServerParams::from_json(r#"{"q": "hello", "tag": ["x", "y"], "none": []}"#)
            .expect("valid payload");
        assert_eq!(params.len(), 3);
        assert_eq!(lookup(&params, "q"), Some("hello".into()));
        assert_eq!(lookup(&params, "tag"), Some("x".into()));
        assert_eq!(lookup(&params, "none"), None);
    }

    #[test]
    fn server_params_reject_bad_json() {
        assert!(matches!(
            ServerParams::from_json(r#"{"q": 3}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            ServerParams::from_json("[]"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn server_params_builder() {
        let params = ServerParams::new()
            .with("q", "one")
            .with("tags", vec!["a".to_string()]);
        assert_eq!(lookup(&params, "q"), Some("one".into()));
        assert_eq!(lookup(&params, "tags"), Some("a".into()));
    }

    #[test]
    fn optional_and_borrowed() {
        let none: Option<QueryString> = None;
        assert_eq!(lookup(&none, "q"), None);

        let query = QueryString::parse("q=1");
        let some = Some(&query);
        assert_eq!(lookup(&some, "q"), Some("1".into()));
    }
}
