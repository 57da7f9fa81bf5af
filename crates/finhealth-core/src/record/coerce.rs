//! Defensive numeric and date coercion applied at the record boundary.
//!
//! Nothing in here fails: values that cannot be read as a number become zero,
//! values that cannot be read as a date become absent.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::Money;

/// Characters removed from amount strings before parsing.
const STRIPPED_CHARS: &[char] = &['₹', '$', '€', '£', '¥', ',', '_'];

/// Parse a human-entered amount such as `"₹1,20,000"` or `" $4,500.75 "`.
///
/// Currency symbols, thousands separators and surrounding whitespace are
/// stripped. Returns zero when the remainder is not a number.
pub fn parse_amount(raw: &str) -> Money {
    let cleaned: String = raw
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c) && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

/// Coerce an arbitrary JSON value into a monetary amount.
///
/// Numbers and numeric strings convert; everything else is zero.
pub fn coerce_value(value: &Value) -> Money {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else if let Some(u) = n.as_u64() {
                Decimal::from(u)
            } else {
                let text = n.to_string();
                Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .ok()
                    .or_else(|| n.as_f64().and_then(Decimal::from_f64))
                    .unwrap_or(Decimal::ZERO)
            }
        }
        Value::String(s) => parse_amount(s),
        _ => Decimal::ZERO,
    }
}

fn coerce_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            // Naive timestamps such as "2024-03-31T00:00:00"
            text.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

/// Serde adapter: absent or `null` stays `None`, anything else is coerced.
pub(crate) fn lenient_money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(coerce_value(&v)),
    })
}

/// Serde adapter for required-with-default amounts: `null` and garbage become zero.
pub(crate) fn lenient_money_or_zero<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_money(deserializer)?.unwrap_or_default())
}

pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_date))
}
