//! Text normalization for search matching
//!
//! Search is case- and accent-insensitive: "José", "JOSE" and "jose" all
//! normalize to the same string. Punctuation and whitespace are kept as-is.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a string for comparison
///
/// Lower-cases, applies canonical decomposition (NFD) and drops every
/// combining mark, so accented letters collapse onto their base letter.
/// Absent values are represented as `""` by the record accessors, which
/// normalizes to `""`.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
