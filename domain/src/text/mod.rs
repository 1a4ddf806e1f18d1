//! Text normalization for model output
//!
//! Models sometimes emit literal `\uXXXX` escapes instead of the characters
//! themselves. [`decode_escapes`] turns them back into text and reports
//! malformed input as a [`DecodeError`]; [`normalize`] is the lenient variant
//! that keeps the original text on failure.

mod unicode;

pub use unicode::{DecodeError, DecodeErrorKind, decode_escapes, has_unicode_escape, normalize};
