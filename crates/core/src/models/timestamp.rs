//! Lenient timestamp handling for dates coming from the persistence layer.
//!
//! A record with a missing or unreadable date must not make the whole collection
//! fail to load: the calendar leaves such records out of the day buckets. This
//! module turns anything it cannot read into `None`.
//!
//! Values that carry an offset (RFC 3339, epoch milliseconds) are fixed instants.
//! Values without one (`2024-03-12`, `2024-03-12T09:00`) are wall-clock readings
//! and keep their calendar day in whatever timezone the calendar is displayed in.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serializer};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// A point in time with a known offset.
    Instant(DateTime<Utc>),
    /// A wall-clock date and time with no offset attached.
    Floating(NaiveDateTime),
}

impl Timestamp {
    /// Local date and time as seen in `tz`. Floating values are returned as is.
    pub fn local_in(self, tz: Tz) -> NaiveDateTime {
        match self {
            Timestamp::Instant(at) => at.with_timezone(&tz).naive_local(),
            Timestamp::Floating(local) => local,
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Timestamp::Instant(at)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(local: NaiveDateTime) -> Self {
        Timestamp::Floating(local)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Instant(at) => f.write_str(&at.to_rfc3339()),
            Timestamp::Floating(local) => write!(f, "{}", local.format(NAIVE_FORMATS[0])),
        }
    }
}

/// Parses RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` or plain `YYYY-MM-DD`.
pub fn parse_timestamp(input: &str) -> Option<Timestamp> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(Timestamp::Instant(parsed.with_timezone(&Utc)));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(Timestamp::Floating(naive));
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(Timestamp::Floating)
}

fn from_millis(millis: i64) -> Option<Timestamp> {
    DateTime::from_timestamp_millis(millis).map(Timestamp::Instant)
}

pub mod lenient {
    use super::*;

    pub fn serialize<S>(value: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => serializer.collect_str(timestamp),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(LenientVisitor)
    }

    /// One nested value read with the same rules, used inside `{"$date": ...}`.
    struct Nested(Option<Timestamp>);

    impl<'de> Deserialize<'de> for Nested {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientVisitor).map(Nested)
        }
    }

    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = Option<Timestamp>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a timestamp string, epoch milliseconds or null")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientVisitor)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(parse_timestamp(value))
        }

        fn visit_i64<E: de::Error>(self, millis: i64) -> Result<Self::Value, E> {
            Ok(from_millis(millis))
        }

        fn visit_u64<E: de::Error>(self, millis: u64) -> Result<Self::Value, E> {
            Ok(i64::try_from(millis).ok().and_then(from_millis))
        }

        fn visit_f64<E: de::Error>(self, millis: f64) -> Result<Self::Value, E> {
            Ok(from_millis(millis as i64))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        /// Extended JSON wrappers: `{"$date": ...}` and `{"$numberLong": "..."}`.
        /// Any other object is drained and read as no date.
        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut found = None;
            while let Some(key) = map.next_key::<String>()? {
                match key.as_str() {
                    "$date" => found = map.next_value::<Nested>()?.0,
                    "$numberLong" => {
                        let raw = map.next_value::<String>()?;
                        found = raw.trim().parse().ok().and_then(from_millis);
                    }
                    _ => {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
            }
            Ok(found)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_supported_forms() {
        let rfc = parse_timestamp("2024-03-12T09:00:00+02:00").unwrap();
        assert_eq!(rfc.local_in(Tz::UTC).hour(), 7);
        assert!(matches!(rfc, Timestamp::Instant(_)));

        let naive = parse_timestamp("2024-03-12T09:00:00").unwrap();
        assert_eq!(naive.to_string(), "2024-03-12T09:00:00");
        assert!(matches!(naive, Timestamp::Floating(_)));

        let date_only = parse_timestamp("2024-03-12").unwrap();
        assert_eq!(date_only.to_string(), "2024-03-12T00:00:00");

        let millis = parse_timestamp("2024-03-12T09:00:00.000Z").unwrap();
        assert_eq!(millis.to_string(), "2024-03-12T09:00:00+00:00");
    }

    #[test]
    fn floating_values_keep_their_day_in_any_timezone() {
        let date_only = parse_timestamp("2024-03-12").unwrap();
        let local = date_only.local_in(chrono_tz::America::New_York);
        assert_eq!(local.to_string(), "2024-03-12 00:00:00");

        let instant = parse_timestamp("2024-03-12T00:00:00Z").unwrap();
        let local = instant.local_in(chrono_tz::America::New_York);
        assert_eq!(local.to_string(), "2024-03-11 20:00:00");
    }

    #[test]
    fn unreadable_input_is_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("next tuesday"), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
    }
}
