//! TempoDB Rust SDK Client
//!
//! This module provides the client for the TempoDB HTTP API. Every operation
//! builds a path, an optional query string and an optional JSON body, and
//! hands them to a single dispatcher that attaches credentials and sends
//! the request.

use crate::error::{Error, Result};
use crate::query::{Query, QueryOptions};
use crate::time::DateInput;
use crate::timeseries::{BulkPoint, BulkRequest, DataPoint, DataSet, Series};
use crate::types::SeriesRef;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Default API host
pub const DEFAULT_HOST: &str = "api.tempo-db.com";

/// Default API version path segment
pub const DEFAULT_VERSION: &str = "v1";

/// Default number of idle keep-alive connections kept per host
pub const DEFAULT_MAX_SOCKETS: usize = 25;

/// Configuration for the TempoDB client
#[derive(Clone)]
pub struct ClientConfig {
    /// API key, used as the basic-auth user
    pub key: String,
    /// API secret, used as the basic-auth password
    pub secret: String,
    /// API hostname
    pub hostname: String,
    /// Explicit port; the scheme default is used when unset
    pub port: Option<u16>,
    /// Use HTTPS when true, plain HTTP otherwise
    pub secure: bool,
    /// API version path segment
    pub version: String,
    /// Size of the keep-alive connection pool
    pub max_sockets: usize,
    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// Custom user agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            secret: String::new(),
            hostname: DEFAULT_HOST.to_string(),
            port: None,
            secure: true,
            version: DEFAULT_VERSION.to_string(),
            max_sockets: DEFAULT_MAX_SOCKETS,
            headers: BTreeMap::new(),
            user_agent: format!("tempodb-rust/{}", crate::VERSION),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("version", &self.version)
            .field("max_sockets", &self.max_sockets)
            .field("headers", &self.headers)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration for the given credentials with default connection settings
    pub fn new<K, S>(key: K, secret: S) -> Self
    where
        K: Into<String>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - TEMPODB_API_KEY (required)
    /// - TEMPODB_API_SECRET (required)
    /// - TEMPODB_API_HOST (optional, default: api.tempo-db.com)
    /// - TEMPODB_API_PORT (optional)
    /// - TEMPODB_API_SECURE (optional, `false`, `0` or `no` selects plain HTTP)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup("TEMPODB_API_KEY")
            .ok_or_else(|| Error::configuration("TEMPODB_API_KEY environment variable not set"))?;

        let secret = lookup("TEMPODB_API_SECRET")
            .ok_or_else(|| Error::configuration("TEMPODB_API_SECRET environment variable not set"))?;

        let mut config = Self::new(key, secret);

        if let Some(hostname) = lookup("TEMPODB_API_HOST") {
            config.hostname = hostname;
        }

        if let Some(port) = lookup("TEMPODB_API_PORT") {
            let port = port.parse::<u16>().map_err(|e| {
                Error::configuration(format!("Invalid TEMPODB_API_PORT '{}'", port)).with_source(e)
            })?;
            config.port = Some(port);
        }

        if let Some(secure) = lookup("TEMPODB_API_SECURE") {
            config.secure = !matches!(secure.to_ascii_lowercase().as_str(), "false" | "0" | "no");
        }

        Ok(config)
    }

    /// Set the API hostname
    pub fn with_hostname<S: Into<String>>(mut self, hostname: S) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Set an explicit port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Choose between HTTPS and plain HTTP
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the API version
    pub fn with_version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = version.into();
        self
    }

    /// Set the keep-alive pool size
    pub fn with_max_sockets(mut self, max_sockets: usize) -> Self {
        self.max_sockets = max_sockets;
        self
    }

    /// Add a header sent with every request
    pub fn with_header<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set custom user agent
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// URL scheme selected by `secure`
    pub fn protocol(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    /// Host as sent in the `Host` header: the hostname, plus `:port` when one is set
    pub fn host(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.hostname, port),
            None => self.hostname.clone(),
        }
    }

    /// `{protocol}://{host}/{version}`
    pub fn base_url(&self) -> String {
        format!("{}://{}/{}", self.protocol(), self.host(), self.version)
    }

    /// Basic auth header value for the configured credentials
    pub fn authorization(&self) -> String {
        let credentials = format!("{}:{}", self.key, self.secret);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }

    /// Headers attached to every request
    fn request_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let mut authorization = header_value(&self.authorization())?;
        authorization.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, authorization);
        headers.insert(reqwest::header::HOST, header_value(&self.host())?);
        headers.insert(reqwest::header::USER_AGENT, header_value(&self.user_agent)?);
        headers.insert(reqwest::header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(reqwest::header::ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                Error::configuration(format!("Invalid header name '{}'", name)).with_source(e)
            })?;
            headers.insert(name, header_value(value)?);
        }

        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        Error::configuration(format!("Invalid header value '{}'", value)).with_source(e)
    })
}

/// Main TempoDB client
#[derive(Debug, Clone)]
pub struct TempoDBClient {
    config: ClientConfig,
    base_url: Url,
    headers: HeaderMap,
    http_client: HttpClient,
}

impl TempoDBClient {
    /// Create a new TempoDB client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.hostname.is_empty() {
            return Err(Error::configuration("hostname must not be empty"));
        }

        let base_url = Url::parse(&config.base_url())?;
        let headers = config.request_headers()?;

        let http_client = HttpClient::builder()
            .pool_max_idle_per_host(config.max_sockets)
            .build()?;

        let client = Self {
            config,
            base_url,
            headers,
            http_client,
        };

        log::info!("Initialized TempoDB client for {}", client.base_url);
        Ok(client)
    }

    /// Create a client for the default API host
    pub fn from_credentials<K, S>(key: K, secret: S) -> Result<Self>
    where
        K: Into<String>,
        S: Into<String>,
    {
        Self::new(ClientConfig::new(key, secret))
    }

    /// Create a client from `TEMPODB_API_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL every endpoint is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL for an endpoint: base URL, encoded path segments, trailing slash, query
    fn endpoint(&self, segments: &[&str], query: &Query<'_>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::configuration(format!("Cannot extend base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        query.apply(&mut url);
        Ok(url)
    }

    /// Send a request with the configured credentials and headers.
    ///
    /// Transport failures and non-success statuses are returned as network
    /// errors; the response body of a failed request is kept on the error.
    async fn call_api<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        log::debug!("{} {}", method, url);

        let mut request_builder = self
            .http_client
            .request(method.clone(), url.clone())
            .headers(self.headers.clone());

        if let Some(body) = body {
            request_builder = request_builder.json(body);
        }

        let response = request_builder.send().await?;
        let status = response.status();
        log::debug!("{} {} -> {}", method, url, status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.ok().filter(|b| !b.is_empty());
        Err(Error::network(Some(status.as_u16()), body)
            .with_context(format!("{} {}", method, url.path())))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(Error::from)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str], query: Query<'_>) -> Result<T> {
        let url = self.endpoint(segments, &query)?;
        let response = self.call_api::<()>(Method::GET, url, None).await?;
        Self::read_json(response).await
    }

    async fn send_json<B, T>(&self, method: Method, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments, &Query::default())?;
        let response = self.call_api(method, url, Some(body)).await?;
        Self::read_json(response).await
    }

    async fn post_empty<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<()> {
        let url = self.endpoint(segments, &Query::default())?;
        self.call_api(Method::POST, url, Some(body)).await?;
        Ok(())
    }

    /// Create a series, optionally with a key; the server assigns the id
    pub async fn create_series(&self, key: Option<&str>) -> Result<Series> {
        let mut body = serde_json::Map::new();
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            body.insert("key".to_string(), key.into());
        }

        self.send_json(Method::POST, &["series"], &body).await
    }

    /// List series matching the id, key, tag and attribute filters
    pub async fn get_series(&self, options: &QueryOptions) -> Result<Vec<Series>> {
        self.get(&["series"], Query::options(options)).await
    }

    /// Replace the metadata of the series with the given id.
    ///
    /// `tags` must serialize to a JSON array and `attributes` to a JSON
    /// object; anything else fails with a validation error before a request
    /// is sent.
    pub async fn update_series<A, T>(
        &self,
        series_id: &str,
        series_key: &str,
        name: &str,
        attributes: A,
        tags: T,
    ) -> Result<Series>
    where
        A: Serialize,
        T: Serialize,
    {
        let tags = serde_json::to_value(tags)?;
        if !tags.is_array() {
            return Err(Error::validation(
                "tags must be an array",
                Some("tags".to_string()),
                Some(tags.to_string()),
            ));
        }

        let attributes = serde_json::to_value(attributes)?;
        if !attributes.is_object() {
            return Err(Error::validation(
                "attributes must be an object",
                Some("attributes".to_string()),
                Some(attributes.to_string()),
            ));
        }

        let series = SeriesRef::id(series_id);
        let [a, b, c] = series.path_segments()?;

        let body = serde_json::json!({
            "id": series_id,
            "key": series_key,
            "name": name,
            "attributes": attributes,
            "tags": tags,
        });

        self.send_json(Method::PUT, &[a, b, c], &body).await
    }

    /// Send a full series back to the server, addressed by its id
    pub async fn update(&self, series: &Series) -> Result<Series> {
        let target = SeriesRef::id(series.id.as_str());
        let [a, b, c] = target.path_segments()?;
        self.send_json(Method::PUT, &[a, b, c], series).await
    }

    /// Read data for every series matching the filters in `options`
    pub async fn read(
        &self,
        start: impl Into<DateInput>,
        end: impl Into<DateInput>,
        options: &QueryOptions,
    ) -> Result<Vec<DataSet>> {
        let query = Query::options(options).with_range(start.into(), end.into());
        self.get(&["data"], query).await
    }

    /// Read data for the series with the given id
    pub async fn read_id(
        &self,
        series_id: &str,
        start: impl Into<DateInput>,
        end: impl Into<DateInput>,
        options: &QueryOptions,
    ) -> Result<DataSet> {
        self.read_series(&SeriesRef::id(series_id), start.into(), end.into(), options)
            .await
    }

    /// Read data for the series with the given key
    pub async fn read_key(
        &self,
        series_key: &str,
        start: impl Into<DateInput>,
        end: impl Into<DateInput>,
        options: &QueryOptions,
    ) -> Result<DataSet> {
        self.read_series(&SeriesRef::key(series_key), start.into(), end.into(), options)
            .await
    }

    async fn read_series(
        &self,
        series: &SeriesRef,
        start: DateInput,
        end: DateInput,
        options: &QueryOptions,
    ) -> Result<DataSet> {
        let [a, b, c] = series.path_segments()?;
        let query = Query::options(options).with_range(start, end);
        self.get(&[a, b, c, "data"], query).await
    }

    /// Write data points to the series with the given id
    pub async fn write_id(&self, series_id: &str, data: &[DataPoint]) -> Result<()> {
        self.write_series(&SeriesRef::id(series_id), "data", data).await
    }

    /// Write data points to the series with the given key
    pub async fn write_key(&self, series_key: &str, data: &[DataPoint]) -> Result<()> {
        self.write_series(&SeriesRef::key(series_key), "data", data).await
    }

    /// Write one value per series, all at timestamp `ts`
    pub async fn write_bulk(&self, ts: impl Into<DateInput>, data: &[BulkPoint]) -> Result<()> {
        let body = BulkRequest { t: ts.into(), data };
        self.post_empty(&["data"], &body).await
    }

    /// Add data point values onto the series with the given id
    pub async fn increment_id(&self, series_id: &str, data: &[DataPoint]) -> Result<()> {
        self.write_series(&SeriesRef::id(series_id), "increment", data).await
    }

    /// Add data point values onto the series with the given key
    pub async fn increment_key(&self, series_key: &str, data: &[DataPoint]) -> Result<()> {
        self.write_series(&SeriesRef::key(series_key), "increment", data).await
    }

    /// Add one value per series, all at timestamp `ts`
    pub async fn increment_bulk(&self, ts: impl Into<DateInput>, data: &[BulkPoint]) -> Result<()> {
        let body = BulkRequest { t: ts.into(), data };
        self.post_empty(&["increment"], &body).await
    }

    async fn write_series(&self, series: &SeriesRef, action: &str, data: &[DataPoint]) -> Result<()> {
        let [a, b, c] = series.path_segments()?;
        self.post_empty(&[a, b, c, action], data).await
    }

    /// Delete the data of the series with the given id between `start` and `end`
    pub async fn delete_id(
        &self,
        series_id: &str,
        start: impl Into<DateInput>,
        end: impl Into<DateInput>,
    ) -> Result<()> {
        self.delete_series(&SeriesRef::id(series_id), start.into(), end.into())
            .await
    }

    /// Delete the data of the series with the given key between `start` and `end`
    pub async fn delete_key(
        &self,
        series_key: &str,
        start: impl Into<DateInput>,
        end: impl Into<DateInput>,
    ) -> Result<()> {
        self.delete_series(&SeriesRef::key(series_key), start.into(), end.into())
            .await
    }

    async fn delete_series(&self, series: &SeriesRef, start: DateInput, end: DateInput) -> Result<()> {
        let [a, b, c] = series.path_segments()?;
        let url = self.endpoint(&[a, b, c, "data"], &Query::range(start, end))?;
        self.call_api::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }
}
