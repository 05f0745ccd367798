#![no_main]

use libfuzzer_sys::fuzz_target;
use urlstate_core::QueryString;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let query = QueryString::parse(text);
    let reparsed = QueryString::parse(&query.to_string());
    assert_eq!(reparsed, query);
});
