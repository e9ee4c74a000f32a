// src/models/de.rs
//! Lenient decoders for backend payloads.
//!
//! The backend serialises DECIMAL columns as strings (`"3.50"`) and integer columns as
//! numbers, and older rows carry timestamps that do not parse. These helpers accept
//! either representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_f64(self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) => Some(n),
            NumberOrText::Text(s) => s.trim().parse().ok(),
        }
        .filter(|n: &f64| n.is_finite())
    }
}

pub fn flexible_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(raw.and_then(NumberOrText::into_f64).unwrap_or(0.0))
}

pub fn flexible_opt_f64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(raw.and_then(NumberOrText::into_f64))
}

/// Negative or fractional stock collapses to the nearest non-negative integer.
pub fn flexible_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = flexible_f64(deserializer)?;
    Ok(value.max(0.0).min(u32::MAX as f64) as u32)
}

/// RFC 3339 strings or integer epoch milliseconds; anything else reads as absent.
pub fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}
