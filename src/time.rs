//! Date arguments and their ISO-8601 wire form.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// A date argument accepted by read, delete and bulk operations.
///
/// Strings are sent exactly as given and are assumed to already be
/// ISO-8601. Dates are converted to UTC with millisecond precision,
/// e.g. `2012-01-01T00:00:00.000Z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Pre-formatted date string
    Text(String),
    /// Concrete instant
    DateTime(DateTime<Utc>),
}

impl DateInput {
    /// Wire representation of this date
    pub fn to_iso8601(&self) -> String {
        match self {
            DateInput::Text(s) => s.clone(),
            DateInput::DateTime(dt) => to_iso8601(dt),
        }
    }
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Text(s)
    }
}

impl From<&String> for DateInput {
    fn from(s: &String) -> Self {
        DateInput::Text(s.clone())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(dt: DateTime<Tz>) -> Self {
        DateInput::DateTime(dt.with_timezone(&Utc))
    }
}

impl From<NaiveDateTime> for DateInput {
    /// Naive datetimes are taken to be UTC.
    fn from(dt: NaiveDateTime) -> Self {
        DateInput::DateTime(Utc.from_utc_datetime(&dt))
    }
}

impl Serialize for DateInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

/// Format an instant as ISO-8601 UTC with milliseconds and a `Z` suffix
pub fn to_iso8601(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde helper writing `DateTime<Utc>` fields in the same format as query dates
pub(crate) mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_iso8601(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}
