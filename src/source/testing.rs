//! In-memory fetcher for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::Instant;

use super::{Endpoint, FetchError, Fetcher};

/// Fetcher that replays scripted outcomes per path and records every call.
///
/// Once a path's script runs out, every further fetch fails as if the
/// connection were refused.
#[derive(Debug, Default)]
pub(crate) struct ScriptedFetcher {
    script: Mutex<HashMap<String, VecDeque<Result<Value, FetchError>>>>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedFetcher {
    /// Queue the outcome of the next unanswered fetch of `path`.
    pub(crate) fn push(&self, path: &str, outcome: Result<Value, FetchError>) {
        self.script
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(outcome);
    }

    /// When each fetch of the given request target was issued.
    pub(crate) fn call_times(&self, target: &str) -> Vec<Instant> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == target)
            .map(|(_, at)| *at)
            .collect()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.target().to_string(), Instant::now()));
        self.script
            .lock()
            .unwrap()
            .get_mut(endpoint.path())
            .and_then(|q| q.pop_front())
            .unwrap_or_else(|| Err(FetchError::Request("connection refused".to_string())))
    }
}
