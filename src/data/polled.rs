//! The last successfully polled value of an endpoint.

use std::time::{Duration, Instant};

use serde_json::Value;

/// Text shown for an endpoint that has not produced a value yet.
pub const ABSENT_TEXT: &str = "null";

/// The most recently fetched and decoded JSON body for one endpoint.
///
/// Only the latest value is kept; each successful poll replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct PolledValue {
    /// The decoded response body, treated as opaque JSON.
    pub value: Value,
    /// When the response was decoded.
    pub received_at: Instant,
}

impl PolledValue {
    /// Wrap a freshly decoded body.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            received_at: Instant::now(),
        }
    }

    /// Time since this value was received.
    pub fn age(&self) -> Duration {
        self.received_at.elapsed()
    }

    /// Pretty-print the value with 2-space indentation.
    pub fn pretty(&self) -> String {
        pretty_json(&self.value)
    }
}

/// Pretty-print JSON with 2-space indentation.
pub fn pretty_json(value: &Value) -> String {
    // Serializing a Value cannot fail: map keys are always strings
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Render an optional polled value for display.
///
/// An absent value renders as `null`.
pub fn render_json(value: Option<&PolledValue>) -> String {
    match value {
        Some(polled) => polled.pretty(),
        None => ABSENT_TEXT.to_string(),
    }
}
