#![no_main]

use libfuzzer_sys::fuzz_target;
use urlstate_core::{Value, decode, decode_strict};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    for hint in [
        None,
        Some(Value::Bool(false)),
        Some(Value::Number(0.0)),
        Some(Value::Text(String::new())),
        Some(Value::List(Vec::new())),
        Some(Value::Map(serde_json::Map::new())),
    ] {
        let lenient = decode(Some(raw), hint.as_ref());
        // Whenever strict decoding succeeds, lenient decoding agrees.
        if let Ok(strict) = decode_strict(raw, hint.as_ref()) {
            assert_eq!(strict, lenient);
        }
    }
});
