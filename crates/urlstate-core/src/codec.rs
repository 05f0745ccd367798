#![forbid(unsafe_code)]

//! String codec between query-parameter text and [`Value`].
//!
//! # Encoding
//!
//! | Value            | Encoded form                          |
//! |------------------|---------------------------------------|
//! | `Null`           | `""`                                  |
//! | `Bool`           | `"true"` / `"false"`                  |
//! | `Number`         | shortest decimal, no trailing `.0`    |
//! | `Text`           | the text itself                       |
//! | `List` / `Map`   | canonical JSON (object keys sorted)   |
//!
//! # Decoding
//!
//! Input is percent-decoded first, then classified. A hint (usually the
//! binding's default value) constrains the result:
//!
//! - `Bool` hint: only `"true"`/`"false"` are accepted.
//! - `Number` hint: any finite float literal is accepted.
//! - `List`/`Map` hint: JSON whose category (array vs. object) matches.
//! - `Text` hint: the decoded string, untouched.
//! - `Null` or no hint: inference (`true`/`false`, unsigned digit runs,
//!   JSON starting with `{` or `[`, otherwise text).
//!
//! Signed and fractional numbers are deliberately *not* inferred without a
//! numeric hint, so `"-1"` or `"1.50"` stay text.
//!
//! # Failure Modes
//!
//! | Failure                 | [`decode`] fallback        | [`decode_strict`]           |
//! |-------------------------|----------------------------|-----------------------------|
//! | Malformed `%` escape    | raw text is classified     | `CodecError::Percent`       |
//! | Bad JSON, no hint       | decoded text               | `CodecError::Json`          |
//! | Bad JSON, structured hint | hint                     | `CodecError::Json`          |
//! | Wrong JSON category     | hint                       | `CodecError::ShapeMismatch` |
//! | Not a boolean           | hint                       | `CodecError::NotBoolean`    |
//! | Not a finite number     | hint                       | `CodecError::NotNumber`     |

use core::fmt;

use crate::percent::{self, PercentError};
use crate::value::{Shape, Value};

/// Reasons a strict decode was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Malformed percent escape.
    Percent(PercentError),
    /// Text looked structured but was not valid JSON.
    Json(String),
    /// JSON parsed, but into the wrong category for the hint.
    ShapeMismatch { expected: Shape, found: Shape },
    /// Boolean hint, but the text was neither `true` nor `false`.
    NotBoolean(String),
    /// Numeric hint, but the text was not a finite number.
    NotNumber(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(err) => write!(f, "percent decoding failed: {err}"),
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::ShapeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::NotBoolean(text) => write!(f, "not a boolean: {text:?}"),
            Self::NotNumber(text) => write!(f, "not a number: {text:?}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Percent(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PercentError> for CodecError {
    fn from(err: PercentError) -> Self {
        Self::Percent(err)
    }
}

/// Encode a value into its query-parameter text (not yet percent-escaped).
#[must_use]
pub fn encode(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Text(s) => s.clone(),
        Value::List(items) => serde_json::to_string(items).unwrap_or_default(),
        Value::Map(map) => serde_json::to_string(map).unwrap_or_default(),
    }
}

/// Decode query-parameter text, never failing.
///
/// Absent input returns the hint unchanged (or `Null` without a hint).
#[must_use]
pub fn decode(raw: Option<&str>, hint: Option<&Value>) -> Value {
    let Some(raw) = raw else {
        return hint.cloned().unwrap_or_default();
    };
    let text = match percent::decode_component(raw) {
        Ok(text) => text,
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %err, raw, "codec: keeping undecodable escape as text");
            raw.to_owned()
        }
    };
    match classify(&text, hint) {
        Ok(value) => value,
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %err, "codec: falling back");
            match hint {
                Some(h) if !h.is_null() => h.clone(),
                _ => Value::Text(text),
            }
        }
    }
}

/// Decode query-parameter text, reporting anything [`decode`] would paper over.
pub fn decode_strict(raw: &str, hint: Option<&Value>) -> Result<Value, CodecError> {
    let text = percent::decode_component(raw)?;
    classify(&text, hint)
}

fn classify(text: &str, hint: Option<&Value>) -> Result<Value, CodecError> {
    let shape = hint.map_or(Shape::Null, Value::shape);
    match shape {
        Shape::Bool => parse_bool(text)
            .map(Value::Bool)
            .ok_or_else(|| CodecError::NotBoolean(text.to_owned())),
        Shape::Number => parse_number(text)
            .map(Value::Number)
            .ok_or_else(|| CodecError::NotNumber(text.to_owned())),
        Shape::List | Shape::Map => {
            let parsed = parse_json(text)?;
            if parsed.category() == shape.category() {
                Ok(parsed)
            } else {
                Err(CodecError::ShapeMismatch {
                    expected: shape,
                    found: parsed.shape(),
                })
            }
        }
        Shape::Text => Ok(Value::Text(text.to_owned())),
        Shape::Null => infer(text),
    }
}

fn infer(text: &str) -> Result<Value, CodecError> {
    if let Some(b) = parse_bool(text) {
        return Ok(Value::Bool(b));
    }
    if is_unsigned_integer(text)
        && let Some(n) = parse_number(text)
    {
        return Ok(Value::Number(n));
    }
    if text.starts_with(['{', '[']) {
        return parse_json(text);
    }
    Ok(Value::Text(text.to_owned()))
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_unsigned_integer(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_json(text: &str) -> Result<Value, CodecError> {
    serde_json::from_str::<serde_json::Value>(text)
        .map(Value::from_json)
        .map_err(|e| CodecError::Json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Mirror a value through the URL and back: `Null` is never written,
    /// so it comes back through the absent path.
    fn round_trip(v: &Value) -> Value {
        if v.is_null() {
            return decode(None, Some(v));
        }
        decode(Some(&percent::encode_component(&encode(v))), Some(v))
    }

    // ========================================================================
    // encode
    // ========================================================================

    #[test]
    fn encode_scalars() {
        assert_eq!(encode(&Value::Null), "");
        assert_eq!(encode(&Value::Bool(true)), "true");
        assert_eq!(encode(&Value::Number(3.0)), "3");
        assert_eq!(encode(&Value::Number(-1.25)), "-1.25");
        assert_eq!(encode(&Value::text("hello")), "hello");
    }

    #[test]
    fn encode_structured_is_canonical() {
        let v = Value::from(json!({"z": 1, "a": [true, null]}));
        assert_eq!(encode(&v), r#"{"a":[true,null],"z":1}"#);
        assert_eq!(encode(&Value::from(json!([1, "two"]))), r#"[1,"two"]"#);
    }

    // ========================================================================
    // decode without hint
    // ========================================================================

    #[test]
    fn absent_without_hint_is_null() {
        assert_eq!(decode(None, None), Value::Null);
    }

    #[test]
    fn infers_booleans_and_unsigned_integers() {
        assert_eq!(decode(Some("true"), None), Value::Bool(true));
        assert_eq!(decode(Some("false"), None), Value::Bool(false));
        assert_eq!(decode(Some("42"), None), Value::Number(42.0));
    }

    #[test]
    fn signed_and_fractional_stay_text() {
        assert_eq!(decode(Some("-1"), None), Value::text("-1"));
        assert_eq!(decode(Some("1.50"), None), Value::text("1.50"));
    }

    #[test]
    fn infers_json() {
        assert_eq!(
            decode(Some("%7B%22a%22%3A1%7D"), None),
            Value::from(json!({"a": 1}))
        );
        assert_eq!(decode(Some("[1,2]"), None), Value::from(json!([1, 2])));
    }

    #[test]
    fn bad_json_falls_back_to_text() {
        assert_eq!(decode(Some("{oops"), None), Value::text("{oops"));
    }

    #[test]
    fn malformed_escape_keeps_raw_text() {
        assert_eq!(decode(Some("100%"), None), Value::text("100%"));
        assert_eq!(decode(Some("%E0%A4%A"), None), Value::text("%E0%A4%A"));
    }

    #[test]
    fn plain_text() {
        assert_eq!(decode(Some("hello%20world"), None), Value::text("hello world"));
    }

    // ========================================================================
    // decode with hint
    // ========================================================================

    #[test]
    fn absent_returns_hint() {
        assert_eq!(decode(None, Some(&Value::Bool(false))), Value::Bool(false));
        assert_eq!(decode(None, Some(&Value::Number(0.0))), Value::Number(0.0));
        let obj = Value::from(json!({"page": 1}));
        assert_eq!(decode(None, Some(&obj)), obj);
    }

    #[test]
    fn bool_hint_rejects_non_boolean() {
        let hint = Value::Bool(true);
        assert_eq!(decode(Some("false"), Some(&hint)), Value::Bool(false));
        assert_eq!(decode(Some("yes"), Some(&hint)), Value::Bool(true));
    }

    #[test]
    fn number_hint_accepts_signed_and_fractional() {
        let hint = Value::Number(0.0);
        assert_eq!(decode(Some("-2.5"), Some(&hint)), Value::Number(-2.5));
        assert_eq!(decode(Some("abc"), Some(&hint)), Value::Number(0.0));
        assert_eq!(decode(Some("inf"), Some(&hint)), Value::Number(0.0));
    }

    #[test]
    fn strict_scalar_hints_yield_values() {
        assert_eq!(
            decode_strict("true", Some(&Value::Bool(false))),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            decode_strict("-0.5", Some(&Value::Number(1.0))),
            Ok(Value::Number(-0.5))
        );
        assert_eq!(
            decode_strict("maybe", Some(&Value::Bool(false))),
            Err(CodecError::NotBoolean("maybe".to_string()))
        );
        assert_eq!(
            decode_strict("NaN", Some(&Value::Number(1.0))),
            Err(CodecError::NotNumber("NaN".to_string()))
        );
    }

    #[test]
    fn structured_floats_round_trip_exactly() {
        for f in [
            1.0715660391465826e-75,
            -1.81996730402717e-179,
            -1.603964615428183e143,
            -9.643915712060552e-234,
            0.1,
            5.0,
        ] {
            let v = Value::from(json!({"x": f, "xs": [f]}));
            assert_eq!(round_trip(&v), v, "float {f:e}");
        }
    }

    #[test]
    fn structured_hint_rejects_wrong_category() {
        let obj = Value::from(json!({"page": 1}));
        assert_eq!(decode(Some("[1,2]"), Some(&obj)), obj);
        assert_eq!(decode(Some("7"), Some(&obj)), obj);
        assert_eq!(decode(Some("{broken"), Some(&obj)), obj);

        let list = Value::from(json!(["a"]));
        assert_eq!(decode(Some("{\"a\":1}"), Some(&list)), list);
        assert_eq!(decode(Some("[\"b\"]"), Some(&list)), Value::from(json!(["b"])));
    }

    #[test]
    fn text_hint_pins_text() {
        let hint = Value::text("");
        assert_eq!(decode(Some("42"), Some(&hint)), Value::text("42"));
        assert_eq!(decode(Some("true"), Some(&hint)), Value::text("true"));
    }

    // ========================================================================
    // strict
    // ========================================================================

    #[test]
    fn strict_reports_errors() {
        assert!(matches!(
            decode_strict("%zz", None),
            Err(CodecError::Percent(PercentError::InvalidHex { offset: 0 }))
        ));
        assert!(matches!(decode_strict("{x", None), Err(CodecError::Json(_))));
        assert_eq!(
            decode_strict("[1]", Some(&Value::from(json!({})))),
            Err(CodecError::ShapeMismatch {
                expected: Shape::Map,
                found: Shape::List
            })
        );
        assert_eq!(
            decode_strict("maybe", Some(&Value::Bool(false))),
            Err(CodecError::NotBoolean("maybe".into()))
        );
        assert_eq!(
            decode_strict("", Some(&Value::Number(1.0))),
            Err(CodecError::NotNumber(String::new()))
        );
    }

    // ========================================================================
    // round trip
    // ========================================================================

    #[test]
    fn round_trip_representative_values() {
        let values = [
            Value::Null,
            Value::Bool(true),
            Value::Bool(false),
            Value::Number(0.0),
            Value::Number(-17.125),
            Value::Number(1e21),
            Value::text(""),
            Value::text("42"),
            Value::text("100% & more"),
            Value::from(json!({"filters": {"tag": ["a", "b"]}, "page": 3})),
            Value::from(json!([])),
        ];
        for v in &values {
            assert_eq!(&round_trip(v), v, "round trip failed for {v:?}");
        }
    }
}
