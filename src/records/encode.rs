//! Scalar encodings for tabular columns

use serde::Serialize;
use std::fmt::Display;

/// Encodes a structured value as compact JSON
///
/// Serializing plain records into a string cannot fail in practice; should
/// it ever, the column is left empty rather than aborting the export.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Encodes a boolean as the lowercase tokens `true` / `false`
pub fn encode_bool(value: bool) -> String {
    let token = if value { "true" } else { "false" };
    token.to_string()
}

/// Encodes an optional scalar, with `None` as the empty string
pub fn encode_optional<T: Display>(value: Option<&T>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

/// Encodes a float so that it always carries a decimal point (`3.0`, `0.5`)
pub fn encode_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
