//! Common types and enums used throughout the TempoDB SDK.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rollup functions the API applies when reading with an interval
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Mean/average aggregation
    #[default]
    Mean,
    /// Sum aggregation
    Sum,
    /// Minimum value aggregation
    Min,
    /// Maximum value aggregation
    Max,
    /// Count aggregation
    Count,
    /// Standard deviation aggregation
    Stddev,
    /// Sum of squares aggregation
    Ss,
    /// Max minus min
    Range,
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::Mean => write!(f, "mean"),
            Aggregation::Sum => write!(f, "sum"),
            Aggregation::Min => write!(f, "min"),
            Aggregation::Max => write!(f, "max"),
            Aggregation::Count => write!(f, "count"),
            Aggregation::Stddev => write!(f, "stddev"),
            Aggregation::Ss => write!(f, "ss"),
            Aggregation::Range => write!(f, "range"),
        }
    }
}

/// Identifies a series either by its server-assigned id or by its key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesRef {
    /// Series id
    Id(String),
    /// Series key
    Key(String),
}

impl SeriesRef {
    /// Reference a series by id
    pub fn id<S: Into<String>>(id: S) -> Self {
        SeriesRef::Id(id.into())
    }

    /// Reference a series by key
    pub fn key<S: Into<String>>(key: S) -> Self {
        SeriesRef::Key(key.into())
    }

    /// Path segments addressing this series, e.g. `["series", "key", "temp"]`.
    ///
    /// `.` and `..` are rejected: URL normalization would drop them and the
    /// request would land on a different endpoint.
    pub(crate) fn path_segments(&self) -> Result<[&str; 3]> {
        let (field, value) = match self {
            SeriesRef::Id(id) => ("id", id.as_str()),
            SeriesRef::Key(key) => ("key", key.as_str()),
        };

        if value == "." || value == ".." {
            return Err(Error::validation(
                format!("series {} cannot be '{}'", field, value),
                Some(field.to_string()),
                Some(value.to_string()),
            ));
        }

        Ok(["series", field, value])
    }
}

impl fmt::Display for SeriesRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesRef::Id(id) => write!(f, "id:{}", id),
            SeriesRef::Key(key) => write!(f, "key:{}", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_display() {
        assert_eq!(Aggregation::Mean.to_string(), "mean");
        assert_eq!(Aggregation::Stddev.to_string(), "stddev");
        assert_eq!(Aggregation::Ss.to_string(), "ss");
    }

    #[test]
    fn test_aggregation_serde_matches_display() {
        for agg in [Aggregation::Sum, Aggregation::Range, Aggregation::Count] {
            let json = serde_json::to_string(&agg).unwrap();
            assert_eq!(json, format!("\"{}\"", agg));
        }
    }

    #[test]
    fn test_series_ref_serde() {
        let json = serde_json::to_value(SeriesRef::key("temp.1")).unwrap();
        assert_eq!(json, serde_json::json!({ "key": "temp.1" }));

        let parsed: SeriesRef = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(parsed, SeriesRef::id("abc"));
    }

    #[test]
    fn test_series_ref_path_segments() {
        assert_eq!(SeriesRef::id("42").path_segments().unwrap(), ["series", "id", "42"]);
        assert_eq!(SeriesRef::key("a").path_segments().unwrap(), ["series", "key", "a"]);
        assert_eq!(
            SeriesRef::key("...").path_segments().unwrap(),
            ["series", "key", "..."]
        );
    }

    #[test]
    fn test_series_ref_rejects_dot_segments() {
        for series in [SeriesRef::key("."), SeriesRef::key(".."), SeriesRef::id("..")] {
            let err = series.path_segments().unwrap_err();
            assert!(err.is_validation());
        }
    }

    #[test]
    fn test_aggregation_default() {
        assert_eq!(Aggregation::default(), Aggregation::Mean);
    }
}
