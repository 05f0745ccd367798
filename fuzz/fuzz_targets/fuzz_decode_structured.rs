#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use urlstate_core::{Value, decode, encode};

#[derive(Debug, Arbitrary)]
enum Input {
    Bool(bool),
    Number(f64),
    Text(String),
    Items(Vec<String>),
}

fuzz_target!(|input: Input| {
    let value = match input {
        Input::Bool(b) => Value::Bool(b),
        Input::Number(n) if n.is_finite() => Value::Number(n),
        Input::Number(_) => return,
        Input::Text(s) => Value::Text(s),
        Input::Items(items) => Value::List(items.into_iter().map(serde_json::Value::String).collect()),
    };
    // The text is escaped once, as the query layer would, before decoding.
    let raw = urlstate_core::percent::encode_component(&encode(&value));
    let decoded = decode(Some(&raw), Some(&value));
    assert_eq!(decoded, value);
});
