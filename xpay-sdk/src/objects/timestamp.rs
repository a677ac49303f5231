//! Serde helpers for timestamps reported by the API.
//!
//! Server-generated timestamps are not always RFC 3339. Values without an
//! offset are read as UTC, and anything unreadable becomes `None` instead of
//! failing the whole object.

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

pub(crate) fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    time::serde::rfc3339::option::serialize(value, serializer)
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(from_value))
}

fn from_value(value: &Value) -> Option<OffsetDateTime> {
    let parsed = match value {
        Value::String(s) => parse(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok()),
        _ => None,
    };
    if parsed.is_none() && !value.is_null() {
        tracing::debug!(%value, "Ignoring unparseable timestamp");
    }
    parsed
}

pub(crate) fn parse(s: &str) -> Option<OffsetDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(dt);
    }
    let naive = PrimitiveDateTime::parse(
        s,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            s,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"),
        )
    })
    .or_else(|_| {
        Date::parse(s, format_description!("[year]-[month]-[day]")).map(|date| date.midnight())
    });
    naive.ok().map(PrimitiveDateTime::assume_utc)
}
