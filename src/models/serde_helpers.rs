//! Custom serde deserializers for ArcGIS attribute values.
//!
//! The MapServer is loose about attribute types: identifiers come back as
//! numbers or strings depending on the layer, dates are epoch milliseconds
//! and flags are integers. These helpers normalise them into the types used
//! by the record models.

use chrono::{DateTime, NaiveDate};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Placeholder shown for a missing display value.
pub const MISSING_VALUE: &str = "-";

/// Hour display the server uses when no hour applies.
const NO_HOUR: &str = "N.h";

/// Deserializes a string or a number into a string.
///
/// # Examples
/// ```text
/// Input:  3072      Output: "3072"
/// Input:  "3072"    Output: "3072"
/// ```
pub fn string_or_number<'a, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'a>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or a number, found {}",
            other
        ))),
    }
}

/// Like [`string_or_number`] but maps `null` to [`MISSING_VALUE`].
pub fn display_value<'a, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'a>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::from(MISSING_VALUE)),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a display value, found {}",
            other
        ))),
    }
}

/// Deserializes an epoch timestamp in milliseconds into its UTC date.
///
/// A `YYYY-MM-DD` string is accepted as well.
///
/// # Examples
/// ```text
/// Input:  1587081600000   Output: 2020-04-17
/// Input:  "2020-04-17"    Output: 2020-04-17
/// ```
pub fn epoch_millis_date<'a, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'a>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp {}", n)))?;
            DateTime::from_timestamp_millis(millis)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| D::Error::custom(format!("timestamp {} out of range", millis)))
        }
        Value::String(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(D::Error::custom),
        other => Err(D::Error::custom(format!(
            "expected a timestamp, found {}",
            other
        ))),
    }
}

/// Deserializes an hour display, `None` when no hour applies.
pub fn hour_display<'a, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'a>,
{
    let hour = Option::<String>::deserialize(deserializer)?;
    Ok(hour.filter(|h| !h.trim().is_empty() && h != NO_HOUR))
}

/// Deserializes an integer or boolean flag.
pub fn flag<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_i64() == Some(1)),
        other => Err(D::Error::custom(format!("expected a flag, found {}", other))),
    }
}
