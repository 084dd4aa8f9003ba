//! Tolerant timestamp decoding.
//!
//! The services render timestamps two ways depending on the code path:
//! RFC 3339 (`2024-01-15T10:30:00+00:00`) and Postgres' space-separated
//! form (`2024-01-15 10:30:00.123456+00:00`, sometimes without an offset).
//! The serde helpers here accept all of them and normalise to UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parse a timestamp in any rendering the services produce.
pub fn parse_flexible(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    // Offset-free Postgres rendering; the services run in UTC.
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    None
}

pub mod flexible {
    use super::*;

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(de)?;
        parse_flexible(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised timestamp: {s}")))
    }
}

pub mod flexible_opt {
    use super::*;

    pub fn serialize<S: Serializer>(
        dt: &Option<DateTime<Utc>>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => ser.serialize_some(&dt.to_rfc3339()),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        // An unparseable timestamp degrades to None rather than failing the
        // whole payload; presence falls back to offline.
        let s: Option<String> = Option::deserialize(de)?;
        Ok(s.as_deref().and_then(parse_flexible))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_rfc3339() {
        let dt = parse_flexible("2024-01-15T10:30:00+00:00").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn parses_postgres_with_offset() {
        let dt = parse_flexible("2024-01-15 10:30:00.123456+00:00").unwrap();
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn parses_postgres_naive() {
        let dt = parse_flexible("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.second(), 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_flexible("yesterday").is_none());
    }
}
