//! Lenient deserializers for fields a language model fills in.
//!
//! Models write `"value": 42` as often as `"value": "42"`. These helpers accept
//! any scalar where a text, integer or flag field is expected so one oddly
//! typed value does not throw away an otherwise usable response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Render a scalar JSON value as text. Arrays and objects use compact JSON.
#[must_use]
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Deserialize any scalar into a `String`; `null` becomes empty.
///
/// # Errors
///
/// Propagates errors from the underlying deserializer.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value).unwrap_or_default())
}

/// Deserialize any scalar into an `Option<String>`; `null` becomes `None`.
///
/// # Errors
///
/// Propagates errors from the underlying deserializer.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

/// Deserialize `3`, `3.0`, `"3"` or `"3.0"` into an integer. Fractions,
/// out-of-range values and non-numeric input become `None`.
///
/// # Errors
///
/// Propagates errors from the underlying deserializer.
pub fn opt_integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let whole = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse().ok().or_else(|| s.parse().ok().and_then(integral))
        }
        _ => None,
    };
    Ok(whole.and_then(|n| T::try_from(n).ok()))
}

#[allow(clippy::cast_possible_truncation)]
fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then(|| f as i64)
}

/// Deserialize a yes/no answer. `true`, `"true"` and `"yes"` (any case) are
/// true; everything else is false.
///
/// # Errors
///
/// Propagates errors from the underlying deserializer.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes")
        }
        _ => false,
    })
}
