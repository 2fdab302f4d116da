use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Any scalar the backend may put in a numeric slot.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Lenient {
    fn into_count(self) -> u64 {
        match self {
            Lenient::Int(value) => u64::try_from(value).unwrap_or(0),
            Lenient::Float(value) => float_count(value),
            Lenient::Text(text) => {
                let text = text.trim();
                match text.parse::<i64>() {
                    Ok(value) => u64::try_from(value).unwrap_or(0),
                    Err(_) => text.parse::<f64>().map(float_count).unwrap_or(0),
                }
            }
            Lenient::Other(_) => 0,
        }
    }

    fn into_amount(self) -> Option<Decimal> {
        match self {
            Lenient::Int(value) => Some(Decimal::from(value)),
            Lenient::Float(value) => Decimal::try_from(value).ok(),
            Lenient::Text(text) => Decimal::from_str(text.trim()).ok(),
            Lenient::Other(_) => None,
        }
    }

    fn into_identifier(self) -> Option<String> {
        match self {
            Lenient::Int(value) => Some(value.to_string()),
            Lenient::Float(value) => Some(value.to_string()),
            Lenient::Text(text) if !text.trim().is_empty() => Some(text.trim().to_owned()),
            _ => None,
        }
    }
}

#[inline]
fn float_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.trunc() as u64
    } else {
        0
    }
}

/// Chip count: negatives, garbage and `null` all become 0.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Lenient::deserialize(deserializer)?.into_count())
}

pub fn amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Lenient::deserialize(deserializer)?.into_amount())
}

pub fn identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Lenient::deserialize(deserializer)?.into_identifier())
}
