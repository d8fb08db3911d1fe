//! # statusboard
//!
//! A terminal dashboard and library that polls an HTTP API for agent status
//! and bus messages and shows the latest JSON of each.
//!
//! Two endpoints are polled on a fixed period (2000ms by default): `/status`
//! is shown under **Agents** and `/messages` under **Messages**. Each panel
//! shows the last successfully parsed response, pretty-printed with two-space
//! indentation. A failed request or an unparsable body is dropped and the
//! panel keeps what it had.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal │  │
//! │  │ (state) │    │ (values) │    │(render) │    │          │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └──────────┘  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐                                                 │
//! │  │ source  │◀── PollSubscription ◀── Fetcher (HttpFetcher)   │
//! │  │ (input) │                                                 │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Panels, focus, scrolling and export
//! - **[`source`]**: Endpoint resolution, the [`Fetcher`] trait and
//!   [`PollSubscription`], the periodic poller holding the last good value
//! - **[`data`]**: The [`PolledValue`] model and its pretty-printed rendering
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`settings`]**: Layered configuration (defaults, file, environment, CLI)
//! - **[`logging`]**: File-backed tracing setup
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the local fallback server at http://127.0.0.1:8000
//! statusboard
//!
//! # Poll another origin every 5 seconds
//! statusboard --origin http://dashboard.internal:8000 --interval 5s
//!
//! # Fetch both endpoints once and write them to a file
//! statusboard --export snapshot.json
//! ```
//!
//! ### Resolving endpoints
//!
//! ```
//! use statusboard::{ApiBase, Endpoint};
//!
//! let base = ApiBase::from_origin(None).unwrap();
//! let status = Endpoint::resolve(&base, "/status").unwrap();
//! assert_eq!(status.target(), "http://127.0.0.1:8000/status");
//! ```
//!
//! ### Polling an endpoint
//!
//! ```no_run
//! use std::sync::Arc;
//! use statusboard::{ApiBase, Endpoint, HttpFetcher, PollSubscription, DEFAULT_PERIOD};
//!
//! # tokio_test::block_on(async {
//! let endpoint = Endpoint::resolve(&ApiBase::Fallback, "/status").unwrap();
//! let mut subscription =
//!     PollSubscription::start(endpoint, Arc::new(HttpFetcher::default()), DEFAULT_PERIOD);
//!
//! tokio::time::sleep(std::time::Duration::from_secs(3)).await;
//! if let Some(value) = subscription.current() {
//!     println!("{}", value.pretty());
//! }
//! subscription.stop();
//! # });
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod logging;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Panel};
pub use data::{render_json, PolledValue};
pub use settings::{ConfigError, ResolvedSettings, Settings};
pub use source::{
    fetch_once, settle, ApiBase, Endpoint, EndpointError, FetchError, Fetcher, HttpFetcher,
    PollSubscription, DEFAULT_PERIOD, DEFAULT_TIMEOUT, FALLBACK_ORIGIN,
};
