//! Example: Fetching both endpoints once
//!
//! This example resolves `/status` and `/messages` against an origin (or the
//! local fallback) and prints each response the way the dashboard shows it.
//! An endpoint that fails to answer is printed as `null`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example poll_once
//! cargo run --example poll_once -- http://dashboard.internal:8000
//! ```

use std::env;

use statusboard::app::{AGENTS_LABEL, MESSAGES_LABEL};
use statusboard::{fetch_once, render_json, ApiBase, Endpoint, HttpFetcher, DEFAULT_TIMEOUT};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let origin = env::args().nth(1);
    let base = ApiBase::from_origin(origin.as_deref())?;
    println!("Polling {}\n", base);

    let fetcher = HttpFetcher::new(DEFAULT_TIMEOUT);

    for (label, path) in [(AGENTS_LABEL, "/status"), (MESSAGES_LABEL, "/messages")] {
        let endpoint = Endpoint::resolve(&base, path)?;
        let value = fetch_once(&fetcher, &endpoint).await;

        println!("{} ({})", label, endpoint);
        println!("{}\n", render_json(value.as_ref()));
    }

    Ok(())
}
