//! Series and data point structures exchanged with the API.

use crate::time::{iso8601, DateInput};
use crate::types::SeriesRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Series metadata as stored by TempoDB
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Server-assigned identifier
    #[serde(default)]
    pub id: String,
    /// User-chosen unique key
    #[serde(default)]
    pub key: String,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Free-form string attributes
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Series {
    /// Create series metadata with only a key set
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Set the id
    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = id.into();
        self
    }

    /// Set the name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Add an attribute
    pub fn with_attribute<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add a tag
    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Check whether the series carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Series(id={}, key={})", self.id, self.key)
    }
}

/// A single timestamped value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Timestamp of the data point
    #[serde(with = "iso8601")]
    pub t: DateTime<Utc>,
    /// Numerical value
    pub v: f64,
}

impl DataPoint {
    /// Create a new data point
    pub fn new(t: DateTime<Utc>, v: f64) -> Self {
        Self { t, v }
    }
}

impl fmt::Display for DataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataPoint({}, {})", self.t, self.v)
    }
}

/// Data read back for one series over a time range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    /// The series the data belongs to
    pub series: Series,
    /// Start of the requested range
    pub start: DateTime<Utc>,
    /// End of the requested range
    pub end: DateTime<Utc>,
    /// Data points in the range, possibly rolled up
    #[serde(default)]
    pub data: Vec<DataPoint>,
    /// Summary statistics computed by the server
    #[serde(default)]
    pub summary: HashMap<String, f64>,
}

impl DataSet {
    /// Number of data points
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the data set has no points
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the raw values
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().map(|dp| dp.v)
    }
}

/// One series' value in a bulk write or increment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkPoint {
    /// Target series, serialized inline as `id` or `key`
    #[serde(flatten)]
    pub series: SeriesRef,
    /// Value to write or add
    pub v: f64,
}

impl BulkPoint {
    /// Value for the series with the given id
    pub fn by_id<S: Into<String>>(id: S, v: f64) -> Self {
        Self {
            series: SeriesRef::id(id),
            v,
        }
    }

    /// Value for the series with the given key
    pub fn by_key<S: Into<String>>(key: S, v: f64) -> Self {
        Self {
            series: SeriesRef::key(key),
            v,
        }
    }
}

/// Request body shared by bulk write and bulk increment
#[derive(Debug, Clone, Serialize)]
pub(crate) struct BulkRequest<'a> {
    pub t: DateInput,
    pub data: &'a [BulkPoint],
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_series_builder() {
        let series = Series::new("temp.1")
            .with_name("Temperature")
            .with_attribute("building", "4")
            .with_tag("outdoor");

        assert_eq!(series.key, "temp.1");
        assert_eq!(series.name, "Temperature");
        assert_eq!(series.attributes.get("building").map(String::as_str), Some("4"));
        assert!(series.has_tag("outdoor"));
        assert!(!series.has_tag("indoor"));
    }

    #[test]
    fn test_series_missing_fields_default() {
        let series: Series = serde_json::from_value(json!({ "id": "abc", "key": "k" })).unwrap();
        assert_eq!(series.id, "abc");
        assert!(series.name.is_empty());
        assert!(series.attributes.is_empty());
        assert!(series.tags.is_empty());
    }

    #[test]
    fn test_data_point_wire_format() {
        let t = Utc.with_ymd_and_hms(2012, 1, 1, 1, 0, 0).unwrap();
        let json = serde_json::to_value(DataPoint::new(t, 12.34)).unwrap();
        assert_eq!(json, json!({ "t": "2012-01-01T01:00:00.000Z", "v": 12.34 }));

        let parsed: DataPoint =
            serde_json::from_value(json!({ "t": "2012-01-01T01:00:00.000Z", "v": 1.5 })).unwrap();
        assert_eq!(parsed, DataPoint::new(t, 1.5));
    }

    #[test]
    fn test_data_set_parsing() {
        let body = json!({
            "series": { "id": "01868c1a", "key": "key1", "name": "", "attributes": {}, "tags": [] },
            "start": "2012-01-01T00:00:00.000Z",
            "end": "2012-01-02T00:00:00.000Z",
            "data": [
                { "t": "2012-01-01T00:00:00.000Z", "v": 1.0 },
                { "t": "2012-01-01T01:00:00.000Z", "v": 3.0 }
            ],
            "summary": { "mean": 2.0, "count": 2 }
        });

        let data_set: DataSet = serde_json::from_value(body).unwrap();
        assert_eq!(data_set.series.key, "key1");
        assert_eq!(data_set.len(), 2);
        assert_eq!(data_set.values().collect::<Vec<_>>(), vec![1.0, 3.0]);
        assert_eq!(data_set.summary.get("count"), Some(&2.0));
    }

    #[test]
    fn test_bulk_request_body() {
        let data = vec![BulkPoint::by_id("01868c1a", 4.164), BulkPoint::by_key("key2", 73.13)];
        let body = BulkRequest {
            t: DateInput::from("2012-01-01T01:00:00.000Z"),
            data: &data,
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "t": "2012-01-01T01:00:00.000Z",
                "data": [
                    { "id": "01868c1a", "v": 4.164 },
                    { "key": "key2", "v": 73.13 }
                ]
            })
        );
    }
}
