#![forbid(unsafe_code)]

//! Ordered query-string model: `count=3&name=alice`.
//!
//! Names and values are stored decoded. Parsing is lossy (form rules, see
//! [`decode_lossy`]) and serialization escapes with [`encode_component`],
//! so `parse(to_string(q))` preserves every pair.

use core::fmt;

use crate::percent::{decode_lossy, encode_component};

/// Parsed URL query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString(Vec<(String, String)>);

impl QueryString {
    /// Empty query.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a query string. A leading `?` is optional, empty segments are
    /// skipped, and a segment without `=` becomes a name with an empty value.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self(
            query
                .split('&')
                .filter(|s| !s.is_empty())
                .map(|pair| match pair.split_once('=') {
                    Some((k, v)) => (decode_lossy(k), decode_lossy(v)),
                    None => (decode_lossy(pair), String::new()),
                })
                .collect(),
        )
    }

    /// First value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `name`, in order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k == name)
    }

    /// Set `name` to `value`. The first occurrence is replaced in place and
    /// later duplicates are dropped; a missing name is appended.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter().position(|(k, _)| k == name) {
            Some(idx) => {
                self.0[idx].1 = value;
                let mut seen = 0usize;
                self.0.retain(|(k, _)| {
                    if k != name {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.0.push((name.to_owned(), value)),
        }
    }

    /// Remove every occurrence of `name`. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|(k, _)| k != name);
        self.0.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", encode_component(k), encode_component(v))?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryString {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Build `<path>[?<query>]`, omitting the `?` when the query is empty.
#[must_use]
pub fn href(path: &str, query: &QueryString) -> String {
    if query.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?{query}")
    }
}

/// Lookup/storage key for a public binding name: the name, percent-encoded once.
#[must_use]
pub fn storage_key(name: &str) -> String {
    encode_component(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse ──

    #[test]
    fn parse_query_params() {
        let q = QueryString::parse("count=3&name=alice");
        assert_eq!(q.get("count"), Some("3"));
        assert_eq!(q.get("name"), Some("alice"));
        assert_eq!(q.get("missing"), None);
    }

    #[test]
    fn parse_strips_leading_question_mark() {
        let q = QueryString::parse("?q=hello");
        assert_eq!(q.get("q"), Some("hello"));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn parse_empty_query() {
        assert!(QueryString::parse("").is_empty());
        assert!(QueryString::parse("?").is_empty());
        assert!(QueryString::parse("&&").is_empty());
    }

    #[test]
    fn parse_bare_name() {
        let q = QueryString::parse("flag&x=1");
        assert_eq!(q.get("flag"), Some(""));
        assert!(q.contains("flag"));
    }

    #[test]
    fn parse_decodes_names_and_values() {
        let q = QueryString::parse("my%20key=a+b%26c");
        assert_eq!(q.get("my key"), Some("a b&c"));
    }

    #[test]
    fn get_all_in_order() {
        let q = QueryString::parse("t=a&x=1&t=b");
        assert_eq!(q.get_all("t"), vec!["a", "b"]);
        assert_eq!(q.get("t"), Some("a"));
    }

    // ── set / remove ──

    #[test]
    fn set_replaces_in_place_and_drops_duplicates() {
        let mut q = QueryString::parse("t=a&x=1&t=b");
        q.set("t", "z");
        assert_eq!(q.to_string(), "t=z&x=1");
    }

    #[test]
    fn set_appends_missing() {
        let mut q = QueryString::parse("x=1");
        q.set("q", "hello");
        assert_eq!(q.to_string(), "x=1&q=hello");
    }

    #[test]
    fn remove_all_occurrences() {
        let mut q = QueryString::parse("t=a&x=1&t=b");
        assert!(q.remove("t"));
        assert!(!q.remove("t"));
        assert_eq!(q.to_string(), "x=1");
    }

    // ── serialize ──

    #[test]
    fn display_escapes() {
        let q: QueryString = [("filter", "{\"a\":1}"), ("q", "a b")].into_iter().collect();
        assert_eq!(q.to_string(), "filter=%7B%22a%22%3A1%7D&q=a%20b");
    }

    #[test]
    fn display_then_parse_preserves_pairs() {
        let q: QueryString = [("a+b", "1 2"), ("é", "%")].into_iter().collect();
        assert_eq!(QueryString::parse(&q.to_string()), q);
    }

    // ── href / storage_key ──

    #[test]
    fn href_omits_question_mark_when_empty() {
        assert_eq!(href("/search", &QueryString::new()), "/search");
        assert_eq!(
            href("/search", &QueryString::parse("q=hello")),
            "/search?q=hello"
        );
    }

    #[test]
    fn storage_key_is_encoded_once() {
        assert_eq!(storage_key("q"), "q");
        assert_eq!(storage_key("sort by"), "sort%20by");
        assert_eq!(storage_key("a%b"), "a%25b");
    }
}
