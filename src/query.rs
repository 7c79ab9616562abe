//! Filter options serialized into URL query strings.

use crate::time::DateInput;
use crate::types::Aggregation;
use std::collections::BTreeMap;
use url::form_urlencoded::Serializer;
use url::UrlQuery;

/// Optional filters for series lookup and data reads.
///
/// List filters repeat their parameter (`id=a&id=b`), attributes are sent
/// as `attr[name]=value`. Unset options are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Series ids to match
    pub ids: Vec<String>,
    /// Series keys to match
    pub keys: Vec<String>,
    /// Tags every matched series must carry
    pub tags: Vec<String>,
    /// Attribute values every matched series must carry
    pub attributes: BTreeMap<String, String>,
    /// Rollup interval, e.g. `1hour` or `PT1H`
    pub interval: Option<String>,
    /// Rollup function applied per interval
    pub function: Option<Aggregation>,
    /// Time zone for interval boundaries, e.g. `America/Chicago`
    pub tz: Option<String>,
}

impl QueryOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Match a series id
    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.ids.push(id.into());
        self
    }

    /// Match a series key
    pub fn with_key<S: Into<String>>(mut self, key: S) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Require a tag
    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Require an attribute value
    pub fn with_attribute<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the rollup interval
    pub fn with_interval<S: Into<String>>(mut self, interval: S) -> Self {
        self.interval = Some(interval.into());
        self
    }

    /// Set the rollup function
    pub fn with_function(mut self, function: Aggregation) -> Self {
        self.function = Some(function);
        self
    }

    /// Set the time zone
    pub fn with_tz<S: Into<String>>(mut self, tz: S) -> Self {
        self.tz = Some(tz.into());
        self
    }

    /// Check whether any option is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Append these options to a query serializer
    pub(crate) fn append_to(&self, pairs: &mut Serializer<'_, UrlQuery<'_>>) {
        for id in &self.ids {
            pairs.append_pair("id", id);
        }
        for key in &self.keys {
            pairs.append_pair("key", key);
        }
        for tag in &self.tags {
            pairs.append_pair("tag", tag);
        }
        for (name, value) in &self.attributes {
            pairs.append_pair(&format!("attr[{}]", name), value);
        }
        if let Some(interval) = &self.interval {
            pairs.append_pair("interval", interval);
        }
        if let Some(function) = &self.function {
            pairs.append_pair("function", &function.to_string());
        }
        if let Some(tz) = &self.tz {
            pairs.append_pair("tz", tz);
        }
    }
}

/// Query parameters of one request: filters followed by an optional time range
#[derive(Debug, Clone, Default)]
pub(crate) struct Query<'a> {
    pub options: Option<&'a QueryOptions>,
    pub range: Option<(DateInput, DateInput)>,
}

impl<'a> Query<'a> {
    pub fn options(options: &'a QueryOptions) -> Self {
        Self {
            options: Some(options),
            range: None,
        }
    }

    pub fn range(start: DateInput, end: DateInput) -> Self {
        Self {
            options: None,
            range: Some((start, end)),
        }
    }

    pub fn with_range(mut self, start: DateInput, end: DateInput) -> Self {
        self.range = Some((start, end));
        self
    }

    fn is_empty(&self) -> bool {
        self.options.map_or(true, QueryOptions::is_empty) && self.range.is_none()
    }

    /// Write the query string onto `url`, leaving it untouched when there is nothing to send
    pub fn apply(&self, url: &mut url::Url) {
        if self.is_empty() {
            return;
        }

        let mut pairs = url.query_pairs_mut();
        if let Some(options) = self.options {
            options.append_to(&mut pairs);
        }
        if let Some((start, end)) = &self.range {
            pairs.append_pair("start", &start.to_iso8601());
            pairs.append_pair("end", &end.to_iso8601());
        }
    }
}
