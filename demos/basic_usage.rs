//! Writes a few points to a series and reads them back.
//!
//! Run with `TEMPODB_API_KEY` and `TEMPODB_API_SECRET` set:
//!
//! ```sh
//! RUST_LOG=tempodb_sdk=debug cargo run --example basic_usage
//! ```

use chrono::{Duration, Utc};
use tempodb_sdk::{Aggregation, BulkPoint, DataPoint, QueryOptions, Result, TempoDBClient};

#[tokio::main]
async fn main() -> Result<()> {
    tempodb_sdk::init_logging();

    let client = TempoDBClient::from_env()?;
    let series = client.create_series(Some("demo.temperature")).await?;
    println!("Using {}", series);

    let now = Utc::now();
    let points: Vec<DataPoint> = (0..12)
        .map(|i| DataPoint::new(now - Duration::minutes(5 * i), 20.0 + i as f64 / 4.0))
        .collect();
    client.write_key(&series.key, &points).await?;

    client
        .write_bulk(now, &[BulkPoint::by_key(&series.key, 23.5)])
        .await?;

    let options = QueryOptions::new()
        .with_interval("PT15M")
        .with_function(Aggregation::Mean);
    let data = client
        .read_key(&series.key, now - Duration::hours(1), now, &options)
        .await?;

    for point in &data.data {
        println!("{}", point);
    }
    println!("summary: {:?}", data.summary);

    Ok(())
}
