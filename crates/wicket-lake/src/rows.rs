//! Conversion of `DuckDB` values into JSON.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use duckdb::types::{TimeUnit, Value};
use serde_json::{Number, Value as Json};

/// Map one `DuckDB` cell to JSON.
///
/// Integers and floats become numbers (non-finite floats become `null`),
/// decimals become numbers, dates become `YYYY-MM-DD`, timestamps become
/// RFC 3339, lists become arrays. Anything else is rendered with `Debug`.
#[must_use]
pub fn value_to_json(value: Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Boolean(b) => Json::Bool(b),
        Value::TinyInt(n) => Json::from(n),
        Value::SmallInt(n) => Json::from(n),
        Value::Int(n) => Json::from(n),
        Value::BigInt(n) => Json::from(n),
        Value::UTinyInt(n) => Json::from(n),
        Value::USmallInt(n) => Json::from(n),
        Value::UInt(n) => Json::from(n),
        Value::UBigInt(n) => Json::from(n),
        Value::HugeInt(n) => i64::try_from(n).map_or_else(|_| Json::String(n.to_string()), Json::from),
        Value::Float(f) => float(f64::from(f)),
        Value::Double(f) => float(f),
        Value::Decimal(d) => d.to_string().parse::<f64>().map_or(Json::Null, float),
        Value::Text(s) | Value::Enum(s) => Json::String(s),
        Value::Date32(days) => date(days).map_or(Json::Null, |d| Json::String(d.to_string())),
        Value::Timestamp(unit, raw) => timestamp(unit, raw)
            .map_or(Json::Null, |t| Json::String(t.to_rfc3339())),
        Value::List(items) | Value::Array(items) => {
            Json::Array(items.into_iter().map(value_to_json).collect())
        }
        other => Json::String(format!("{other:?}")),
    }
}

fn float(f: f64) -> Json {
    Number::from_f64(f).map_or(Json::Null, Json::Number)
}

fn date(days_since_epoch: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?
        .checked_add_signed(TimeDelta::days(i64::from(days_since_epoch)))
}

fn timestamp(unit: TimeUnit, raw: i64) -> Option<DateTime<Utc>> {
    match unit {
        TimeUnit::Second => DateTime::from_timestamp(raw, 0),
        TimeUnit::Millisecond => DateTime::from_timestamp_millis(raw),
        TimeUnit::Microsecond => DateTime::from_timestamp_micros(raw),
        TimeUnit::Nanosecond => Some(DateTime::from_timestamp_nanos(raw)),
    }
}
