//! Delimited-string to vector parsing.
//!
//! Vector-valued options are stored as one string whose elements are joined
//! by a delimiter (`"50 25 10"`). Splitting drops every empty token, so runs
//! of the delimiter collapse.

use std::fmt::Display;
use std::str::FromStr;

use crate::value::decode;

/// Delimiter used when a program does not pick its own.
pub const DEFAULT_DELIMITER: char = ' ';

/// A token that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedToken {
    /// Token text (trimmed).
    pub token: String,
    /// Decoder message.
    pub reason: String,
}

/// Splits `raw` on `delimiter` and decodes each non-empty token.
///
/// Tokens are trimmed before decoding. Parsing stops at the first malformed
/// token.
///
/// # Examples
///
/// ```
/// use optgroup_core::parse_delimited;
///
/// assert_eq!(parse_delimited::<f64>("1  2", ' '), Ok(vec![1.0, 2.0]));
/// assert_eq!(parse_delimited::<u32>("", ' '), Ok(vec![]));
/// assert_eq!(parse_delimited::<u32>("4, 5,,6", ','), Ok(vec![4, 5, 6]));
///
/// let err = parse_delimited::<f64>("1 x 3", ' ').unwrap_err();
/// assert_eq!(err.token, "x");
/// ```
pub fn parse_delimited<T>(raw: &str, delimiter: char) -> Result<Vec<T>, MalformedToken>
where
    T: FromStr,
    T::Err: Display,
{
    raw.split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            decode(token).map_err(|reason| MalformedToken {
                token: token.to_string(),
                reason,
            })
        })
        .collect()
}

/// Pads `values` to `len` elements by repeating its last element.
///
/// Used for per-stage parameters where a shorter list means "keep the last
/// value for the remaining stages". Empty or already long enough vectors are
/// left alone.
///
/// # Examples
///
/// ```
/// use optgroup_core::broadcast;
///
/// let mut components = vec![100, 50];
/// broadcast(&mut components, 4);
/// assert_eq!(components, vec![100, 50, 50, 50]);
/// ```
pub fn broadcast<T: Clone>(values: &mut Vec<T>, len: usize) {
    if let Some(last) = values.last().cloned() {
        if values.len() < len {
            values.resize(len, last);
        }
    }
}
