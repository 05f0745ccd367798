#![forbid(unsafe_code)]

//! Percent encoding for query-string components.
//!
//! [`encode_component`] escapes everything outside the component-safe set
//! (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`), the same set browsers leave untouched
//! when encoding a URI component. Decoding comes in two flavors:
//!
//! - [`decode_component`] is strict and reports malformed input.
//! - [`decode_lossy`] follows form decoding rules (`+` is a space) and keeps
//!   malformed escapes verbatim. The query parser uses it so that reading
//!   the address bar never fails.

use core::fmt;

/// Errors from strict percent decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PercentError {
    /// A `%` without two following characters.
    Truncated { offset: usize },
    /// A `%` followed by something that is not two hex digits.
    InvalidHex { offset: usize },
    /// The decoded bytes are not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for PercentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { offset } => write!(f, "truncated escape at byte {offset}"),
            Self::InvalidHex { offset } => write!(f, "invalid hex escape at byte {offset}"),
            Self::InvalidUtf8 => f.write_str("escaped bytes are not valid UTF-8"),
        }
    }
}

impl std::error::Error for PercentError {}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Escape a string for use as a query name or value.
#[must_use]
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[usize::from(b >> 4)] as char);
            out.push(HEX[usize::from(b & 0x0F)] as char);
        }
    }
    out
}

/// Strictly decode `%XX` escapes. `+` is left as-is.
pub fn decode_component(s: &str) -> Result<String, PercentError> {
    if !s.contains('%') {
        return Ok(s.to_owned());
    }
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        if i + 2 >= bytes.len() {
            return Err(PercentError::Truncated { offset: i });
        }
        match (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
            (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
            _ => return Err(PercentError::InvalidHex { offset: i }),
        }
        i += 3;
    }
    String::from_utf8(out).map_err(|_| PercentError::InvalidUtf8)
}

/// Form-style decoding: `+` becomes a space, valid escapes are decoded, and
/// anything malformed is kept as written. Invalid UTF-8 is replaced with
/// U+FFFD.
#[must_use]
pub fn decode_lossy(s: &str) -> String {
    if !s.contains(['%', '+']) {
        return s.to_owned();
    }
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let escaped = bytes
                    .get(i + 1)
                    .zip(bytes.get(i + 2))
                    .and_then(|(&h, &l)| Some((hex_val(h)? << 4) | hex_val(l)?));
                if let Some(b) = escaped {
                    out.push(b);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
