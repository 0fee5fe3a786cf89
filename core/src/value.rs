//! Deferred decoding of raw string values.
//!
//! Values travel through the engine as strings and are decoded only when a
//! consumer asks for a concrete type. Any [`FromStr`] type can be read.

use std::fmt::Display;
use std::str::FromStr;

/// Decodes a raw value, returning the decoder's message on failure.
pub fn decode<T>(raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>().map_err(|e| e.to_string())
}

/// Short name of `T` for diagnostics (`f64`, `String`, `PathBuf`).
pub fn target_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
