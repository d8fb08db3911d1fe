//! Data models for polled endpoint values.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "2s", "500ms")
//! - [`polled`]: The last-value model ([`PolledValue`]) and its pretty-printed rendering
//!
//! ## Data Flow
//!
//! ```text
//! HTTP body (JSON)
//!        │
//!        ▼
//! settle() ──▶ failure: dropped, previous value kept
//!        │
//!        ▼
//! PolledValue ──▶ render_json() ──▶ panel text
//! ```

pub mod duration;
pub mod polled;

pub use polled::{pretty_json, render_json, PolledValue, ABSENT_TEXT};
