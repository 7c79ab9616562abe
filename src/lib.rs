//! # TempoDB Rust SDK
//!
//! A Rust client library for the TempoDB time series database API.
//!
//! ## Features
//!
//! - **Series management**: create, list with filters, and update series metadata
//! - **Data reads** by id, by key, or across many series with rollups
//! - **Writes and increments** per series or in bulk at a single timestamp
//! - **Range deletes** by id or key
//! - **Async/await** on tokio, with a shared keep-alive connection pool
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::{TimeZone, Utc};
//! use tempodb_sdk::{ClientConfig, DataPoint, QueryOptions, Result, TempoDBClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = TempoDBClient::new(ClientConfig::new("your-api-key", "your-api-secret"))?;
//!
//!     let t = Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap();
//!     client.write_key("temp.1", &[DataPoint::new(t, 21.5)]).await?;
//!
//!     let data = client
//!         .read_key("temp.1", "2012-01-01", "2012-01-02", &QueryOptions::new())
//!         .await?;
//!     println!("Read {} data points", data.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Input-shape problems are reported before any request is sent. Anything
//! the server rejects comes back as a network error carrying the status
//! code and response body:
//!
//! ```rust,no_run
//! # async fn run(client: tempodb_sdk::TempoDBClient) {
//! match client.get_series(&Default::default()).await {
//!     Ok(series) => println!("{} series", series.len()),
//!     Err(err) if err.status_code() == Some(403) => println!("bad credentials"),
//!     Err(err) => println!("Unexpected error: {}", err),
//! }
//! # }
//! ```

pub mod client;
pub mod error;
pub mod query;
pub mod time;
pub mod timeseries;
pub mod types;

// Re-export commonly used types
pub use client::{ClientConfig, TempoDBClient};
pub use error::{Error, ErrorKind, Result};
pub use query::QueryOptions;
pub use time::DateInput;
pub use timeseries::{BulkPoint, DataPoint, DataSet, Series};
pub use types::{Aggregation, SeriesRef};

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// SDK name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    pub use crate::client::{
        DEFAULT_HOST as HOST, DEFAULT_MAX_SOCKETS as MAX_SOCKETS, DEFAULT_VERSION as API_VERSION,
    };

    /// HTTPS is used unless turned off
    pub const SECURE: bool = true;
}

/// Initialize the SDK with logging
///
/// This function sets up environment-based logging for the SDK.
/// Call this once at the start of your application.
///
/// # Example
///
/// ```rust
/// tempodb_sdk::init_logging();
/// ```
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Get the SDK version
pub fn version() -> &'static str {
    VERSION
}

/// Get the SDK name
pub fn name() -> &'static str {
    NAME
}
