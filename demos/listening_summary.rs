//! Fetch a listening summary concurrently and print it as JSON.
//!
//! ```sh
//! cargo run --example listening_summary -- long_term 5
//! ```

use spotirs::{Credentials, SpotifyClient, TimeRange};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let time_range: TimeRange = match args.next() {
        Some(time_range) => time_range.parse()?,
        None => TimeRange::default(),
    };
    let limit: i64 = match args.next() {
        Some(limit) => limit.parse()?,
        None => 5,
    };

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()?;

    let client = SpotifyClient::new(Credentials::from_env()?).with_client(http);

    let summary = client.listening_summary(time_range, limit).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
