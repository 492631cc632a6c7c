//! Text encoding normalization
//!
//! Values and part contents must be valid UTF-8 before they are embedded in
//! WordprocessingML. Byte strings that are not UTF-8 are assumed to be
//! ISO-8859-1 (which also covers the printable Windows-1252 letters used by
//! most Western European editors) and are re-encoded.

use std::borrow::Cow;

/// Convert raw bytes to UTF-8 text.
///
/// Valid UTF-8 input is borrowed as-is. Anything else is decoded byte by byte
/// as ISO-8859-1, so the conversion never fails and never loses bytes.
pub fn to_utf8(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// Owned variant of [`to_utf8`] that avoids a copy when the bytes are already UTF-8.
pub fn into_utf8(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| char::from(b)).collect(),
    }
}
