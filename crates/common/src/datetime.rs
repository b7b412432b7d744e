//! Shift timestamp wire format.
//!
//! Timestamps are written as `dd-MM-yyyy HH:mm`. Reading also accepts the
//! slash variant `dd/MM/yyyy HH:mm` and ISO-8601 (`yyyy-MM-ddTHH:mm[:ss]`).
//! Values are kept to the minute: any seconds in the input are dropped.

use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

/// Canonical output format.
pub const WIRE_FORMAT: &str = "%d-%m-%Y %H:%M";

const ACCEPTED_FORMATS: &[&str] = &[
    WIRE_FORMAT,
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date-time '{0}', expected dd-MM-yyyy HH:mm")]
pub struct DateTimeParseError(pub String);

pub fn parse(input: &str) -> Result<NaiveDateTime, DateTimeParseError> {
    let s = input.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .and_then(|dt| dt.with_second(0)?.with_nanosecond(0))
        .ok_or_else(|| DateTimeParseError(input.to_string()))
}

pub fn format(dt: &NaiveDateTime) -> String {
    dt.format(WIRE_FORMAT).to_string()
}

/// `#[serde(with = "common::datetime::wire")]`
pub mod wire {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse(&raw).map_err(D::Error::custom)
    }
}

/// Optional variant; empty strings read as `None`.
pub mod wire_opt {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => s.serialize_str(&super::format(dt)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.trim().is_empty() => super::parse(&raw).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}
