#![forbid(unsafe_code)]

//! Tagged value model shared by the codec, the signal store, and bindings.
//!
//! A [`Value`] is the typed form of a single query parameter. Scalars are
//! modeled directly; structured payloads (arrays and objects) carry arbitrary
//! JSON so callers can mirror records into the address bar.
//!
//! # Invariants
//!
//! 1. `List` always wraps a JSON array and `Map` always wraps a JSON object;
//!    JSON scalars are normalized into the scalar variants by
//!    [`Value::from_json`].
//! 2. [`Value::shape`] is total and [`Value::category`] collapses the six
//!    shapes into the three categories the codec matches on.
//! 3. [`Value::is_absent`] is the single definition of "should not appear in
//!    the URL": `Null`, `Bool(false)`, `Text("")`, and non-finite numbers.

use core::fmt;

use serde_json::{Map, Number};

/// Typed value of a URL-mirrored binding.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value. Encodes to the empty string.
    #[default]
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// A finite or non-finite float. Integral values encode without `.0`.
    Number(f64),
    /// Plain text.
    Text(String),
    /// A JSON array.
    List(Vec<serde_json::Value>),
    /// A JSON object (keys kept sorted by `serde_json`).
    Map(Map<String, serde_json::Value>),
}

/// The variant of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Null,
    Bool,
    Number,
    Text,
    List,
    Map,
}

impl Shape {
    /// Stable lowercase name, used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::Text => "text",
            Self::List => "list",
            Self::Map => "map",
        }
    }

    /// Coarse category used for structured-shape matching.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::List => Category::Array,
            Self::Map => Category::Object,
            Self::Null | Self::Bool | Self::Number | Self::Text => Category::Scalar,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object vs. array vs. everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Object,
    Array,
    Scalar,
}

impl Value {
    /// Build a text value.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// The variant of this value.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        match self {
            Self::Null => Shape::Null,
            Self::Bool(_) => Shape::Bool,
            Self::Number(_) => Shape::Number,
            Self::Text(_) => Shape::Text,
            Self::List(_) => Shape::List,
            Self::Map(_) => Shape::Map,
        }
    }

    /// Shorthand for `self.shape().category()`.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.shape().category()
    }

    /// Whether this value is mirrored as "parameter not present".
    ///
    /// `Null`, `false`, and the empty string collapse to absence, as do
    /// non-finite numbers (no text form decodes back to them). `0` and empty
    /// collections stay in the URL.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Text(s) => s.is_empty(),
            Self::Number(n) => !n.is_finite(),
            Self::List(_) | Self::Map(_) => false,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Normalize a JSON value into the tagged model.
    ///
    /// Numbers that cannot be represented as `f64` degrade to `Null`.
    #[must_use]
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => Self::List(items),
            serde_json::Value::Object(map) => Self::Map(map),
        }
    }

    /// Convert back to JSON. Non-finite numbers become JSON `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::List(items) => serde_json::Value::Array(items.clone()),
            Self::Map(map) => serde_json::Value::Object(map.clone()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Self::from_json(json)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}
