#![forbid(unsafe_code)]

//! Core types for urlstate: the value model and everything needed to turn a
//! value into query-string text and back.
//!
//! This crate provides:
//! - [`Value`] as the tagged union every binding stores
//! - [`codec`] for `encode`/`decode` between values and parameter text
//! - [`percent`] for component escaping
//! - [`QueryString`] for reading and rewriting `?a=1&b=2`

pub mod codec;
pub mod percent;
pub mod query;
pub mod value;

pub use codec::{CodecError, decode, decode_strict, encode};
pub use percent::PercentError;
pub use query::{QueryString, href, storage_key};
pub use value::{Category, Shape, Value};
