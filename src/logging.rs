//! Diagnostic logging.
//!
//! The terminal belongs to the TUI, so log output only goes to a file, and
//! only when one is requested.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVE: &str = "statusboard=info";

/// Build the filter from `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVE`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Send tracing output to `path`, appending to any existing content.
pub fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(env_filter())
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_filter_parses() {
        let filter = EnvFilter::new(DEFAULT_DIRECTIVE);
        assert_eq!(filter.to_string(), DEFAULT_DIRECTIVE);
    }

    #[test]
    fn test_init_logging_appends_to_existing_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "previous run").unwrap();

        // Only one test can install the global subscriber; the file is opened before that step
        let _ = init_logging(file.path());
        tracing::warn!("log file reopened");

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert!(contents.starts_with("previous run\n"));
    }

    #[test]
    fn test_init_logging_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statusboard.log");

        let _ = init_logging(&path);

        assert!(path.exists());
    }

    #[test]
    fn test_init_logging_reports_unopenable_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = init_logging(&dir.path().join("missing").join("statusboard.log")).unwrap_err();
        assert!(err.to_string().contains("failed to open log file"));
    }
}
