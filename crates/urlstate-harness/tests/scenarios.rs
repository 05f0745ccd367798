#![forbid(unsafe_code)]

//! End-to-end scenarios on a simulated page.

use pretty_assertions::assert_eq;
use serde_json::json;
use urlstate_core::Value;
use urlstate_harness::{Page, assert_url};
use urlstate_web::{NoParams, ServerParams};

// ============================================================================
// Basic search box
// ============================================================================

#[test]
fn search_box_scenario() {
    let page = Page::new("/");
    let (value, set) = page.ctx().use_url_state("q", &NoParams, "");
    assert_eq!(value, Value::from(""));

    set.set("hello");
    assert_eq!(page.signal_value("q"), Some(Value::from("hello")));
    assert_url!(page, "/?q=hello");

    let second = page.mount("q", "");
    assert_eq!(second.value(), Value::from("hello"));
}

#[test]
fn other_params_are_preserved() {
    let page = Page::new("/products?sort=price&page=3");
    let q = page.mount("q", "");
    q.set("shoes");
    assert_url!(page, "/products?sort=price&page=3&q=shoes");
    q.set("boots");
    assert_url!(page, "/products?sort=price&page=3&q=boots");
}

// ============================================================================
// Sharing
// ============================================================================

#[test]
fn sharing_writer_first() {
    let page = Page::new("/");
    let writer = page.mount("n", 0);
    writer.set(3);
    let reader = page.mount("n", 0);
    assert_eq!(reader.value(), Value::Number(3.0));
    assert!(writer.signal().ptr_eq(reader.signal()));
}

#[test]
fn sharing_reader_first() {
    let page = Page::new("/");
    let reader = page.mount("n", 0);
    let writer = page.mount("n", 0);
    writer.set(3);
    assert_eq!(reader.value(), Value::Number(3.0));
    assert!(writer.signal().ptr_eq(reader.signal()));
}

#[test]
fn distinct_names_are_independent() {
    let page = Page::new("/");
    let a = page.mount("a", "");
    let b = page.mount("b", "");
    a.set("x");
    assert_eq!(b.value(), Value::from(""));
    assert_url!(page, "/?a=x");
}

// ============================================================================
// Absence policy
// ============================================================================

#[test]
fn falsy_values_remove_the_key() {
    let page = Page::new("/?text=abc&flag=true&obj=%257B%257D");
    let text = page.mount("text", "");
    let flag = page.mount("flag", false);
    let obj = page.mount("obj", Value::Null);

    text.set("");
    assert!(!page.has_param("text"));
    flag.set(false);
    assert!(!page.has_param("flag"));
    obj.set(Value::Null);
    assert!(!page.has_param("obj"));
    assert_url!(page, "/");
}

#[test]
fn zero_is_kept() {
    let page = Page::new("/");
    let n = page.mount("n", 5);
    n.set(0);
    assert_url!(page, "/?n=0");
    assert_eq!(page.param_value("n", &Value::Number(5.0)), Value::Number(0.0));
}

// ============================================================================
// Default fallback
// ============================================================================

#[test]
fn absent_param_yields_default() {
    let page = Page::new("/");
    assert_eq!(page.mount("flag", false).value(), Value::Bool(false));
    assert_eq!(page.mount("n", 0).value(), Value::Number(0.0));
}

#[test]
fn unparseable_structured_param_yields_default() {
    let default = Value::from(json!({"min": 0}));
    let params = ServerParams::new().with("filter", "{not json");
    let page = Page::new("/");
    let b = page.mount_with("filter", &params, default.clone());
    assert_eq!(b.value(), default);

    let params = ServerParams::new().with("filter", "[1,2]");
    let page = Page::new("/");
    let b = page.mount_with("filter", &params, default.clone());
    assert_eq!(b.value(), default, "array where an object was expected");
}

#[test]
fn typed_params_are_parsed_with_the_default_as_hint() {
    let params = ServerParams::new()
        .with("on", "true")
        .with("n", "12.5")
        .with("code", "007")
        .with("tags", r#"["a","b"]"#);
    let page = Page::new("/");
    assert_eq!(page.mount_with("on", &params, false).value(), Value::Bool(true));
    assert_eq!(page.mount_with("n", &params, 0).value(), Value::Number(12.5));
    assert_eq!(page.mount_with("code", &params, "").value(), Value::from("007"));
    assert_eq!(
        page.mount_with("tags", &params, Value::List(Vec::new())).value(),
        Value::from(json!(["a", "b"]))
    );
}

// ============================================================================
// Reload
// ============================================================================

#[test]
fn state_survives_reload() {
    let page = Page::new("/");
    let filter = page.mount("filter", Value::from(json!({})));
    let wanted = Value::from(json!({"color": "red & blue", "sizes": [38, 39]}));
    filter.set(wanted.clone());

    let (fresh, params) = page.reload();
    let filter = fresh.mount_with("filter", &params, Value::from(json!({})));
    assert_eq!(filter.value(), wanted);
}

#[test]
fn escaped_names_round_trip() {
    let page = Page::new("/");
    let b = page.mount("sort by", "");
    b.set("name");
    assert!(page.has_param(b.key()));

    let (fresh, params) = page.reload();
    assert_eq!(fresh.mount_with("sort by", &params, "").value(), Value::from("name"));
}
