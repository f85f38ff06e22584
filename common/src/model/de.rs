//! Lenient deserializers for values the clinic backend sends either as
//! JSON numbers or as strings (ages, ids, phone numbers).

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Integer(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

impl NumberOrText {
    fn into_text(self) -> String {
        match self {
            NumberOrText::Integer(n) => n.to_string(),
            NumberOrText::Float(f) => f.to_string(),
            NumberOrText::Text(s) => s,
            NumberOrText::Flag(b) => b.to_string(),
        }
    }
}

/// Accepts `34`, `"34"`, or `null` and `""` (as zero).
pub(crate) fn age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(0),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(0),
        Some(NumberOrText::Integer(n)) => u32::try_from(n).map_err(D::Error::custom),
        Some(other) => {
            let text = other.into_text();
            text.trim()
                .parse::<u32>()
                .map_err(|e| D::Error::custom(format!("invalid age `{}`: {}", text, e)))
        }
    }
}

/// Accepts an integer id given as a number or a numeric string.
pub(crate) fn optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Integer(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(other) => {
            let text = other.into_text();
            text.trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid id `{}`: {}", text, e)))
        }
    }
}

/// Any scalar becomes its textual form; `null` and `""` become `None`.
pub(crate) fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<NumberOrText>::deserialize(deserializer)?
        .map(NumberOrText::into_text)
        .filter(|s| !s.is_empty()))
}
