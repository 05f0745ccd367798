//! `proptest` strategies for values a binding can carry through the URL.
//!
//! `Null` is excluded: it is never written to the URL, only removed.

use proptest::prelude::*;
use serde_json::{Map, Value as Json};
use urlstate_core::Value;

/// Finite numbers, including negatives and fractions.
pub fn number() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-1_000_000i64..1_000_000).prop_map(|n| n as f64),
        (-1.0e6f64..1.0e6).prop_filter("finite", |n| n.is_finite()),
    ]
}

/// Arbitrary printable text, including `%`, `&`, `=` and `+`.
pub fn text() -> impl Strategy<Value = String> {
    "[ -~\u{e9}\u{4e2d}]{0,24}"
}

/// Leaf JSON values, including arbitrary finite floats.
pub fn json_leaf() -> impl Strategy<Value = Json> {
    prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        any::<i32>().prop_map(Json::from),
        any::<f64>()
            .prop_filter_map("finite", serde_json::Number::from_f64)
            .prop_map(Json::Number),
        text().prop_map(Json::String),
    ]
}

/// Nested JSON up to a small depth.
pub fn json() -> impl Strategy<Value = Json> {
    json_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Json::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Json::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

pub fn list() -> impl Strategy<Value = Value> {
    prop::collection::vec(json(), 0..4).prop_map(Value::List)
}

pub fn map() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z]{1,6}", json(), 0..4)
        .prop_map(|m| Value::Map(m.into_iter().collect()))
}

/// Any value a binding writes into the URL.
pub fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        number().prop_map(Value::Number),
        text().prop_map(Value::Text),
        list(),
        map(),
    ]
}

/// Query parameter names, some needing escapes.
pub fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9 _&=%]{0,8}"
}
