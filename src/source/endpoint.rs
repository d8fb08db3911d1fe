//! Endpoint base resolution.
//!
//! Decides where a polled path is actually requested. When the dashboard has
//! no network origin (nothing configured, or a `file:` origin), paths are
//! sent to the local dashboard API at [`FALLBACK_ORIGIN`]. Otherwise they are
//! treated as same-origin relative paths.

use std::fmt;

use reqwest::Url;
use thiserror::Error;

/// Origin used when the dashboard has no network origin of its own.
pub const FALLBACK_ORIGIN: &str = "http://127.0.0.1:8000";

/// Errors raised while resolving endpoints.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EndpointError {
    /// The configured origin is not a valid URL.
    #[error("invalid origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    /// The configured origin uses a scheme we cannot poll over.
    #[error("unsupported origin scheme {0:?} (expected http, https or file)")]
    UnsupportedScheme(String),

    /// The endpoint path could not be joined onto the base.
    #[error("invalid endpoint path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },
}

/// The base that endpoint paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiBase {
    /// No network origin; requests go to [`FALLBACK_ORIGIN`].
    Fallback,
    /// Paths are relative to this origin.
    SameOrigin(Url),
}

impl ApiBase {
    /// Build the base from an optional hosting origin.
    ///
    /// `None`, an empty string and `file:` URLs all mean "no network origin".
    pub fn from_origin(origin: Option<&str>) -> Result<Self, EndpointError> {
        let Some(origin) = origin.map(str::trim).filter(|o| !o.is_empty()) else {
            return Ok(ApiBase::Fallback);
        };

        let url = Url::parse(origin).map_err(|e| EndpointError::InvalidOrigin {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "file" => Ok(ApiBase::Fallback),
            "http" | "https" => Ok(ApiBase::SameOrigin(url)),
            other => Err(EndpointError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Returns true when requests go to the fallback origin.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ApiBase::Fallback)
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiBase::Fallback => write!(f, "{} (fallback)", FALLBACK_ORIGIN),
            ApiBase::SameOrigin(url) => write!(f, "{}", url.origin().ascii_serialization()),
        }
    }
}

/// A polled path resolved against an [`ApiBase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    target: String,
    url: Url,
}

impl Endpoint {
    /// Resolve `path` against `base`.
    ///
    /// Under the fallback the request target is the absolute URL built by
    /// prefixing the path with [`FALLBACK_ORIGIN`]. Under a network origin the
    /// request target is the path itself and the absolute URL is the path
    /// joined onto the origin.
    pub fn resolve(base: &ApiBase, path: &str) -> Result<Self, EndpointError> {
        let invalid_path = |reason: String| EndpointError::InvalidPath {
            path: path.to_string(),
            reason,
        };

        if !path.starts_with('/') {
            return Err(invalid_path("must start with '/'".to_string()));
        }

        let (target, url) = match base {
            ApiBase::Fallback => {
                let target = format!("{}{}", FALLBACK_ORIGIN, path);
                let url = Url::parse(&target).map_err(|e| invalid_path(e.to_string()))?;
                (target, url)
            }
            ApiBase::SameOrigin(origin) => {
                let url = origin.join(path).map_err(|e| invalid_path(e.to_string()))?;
                (path.to_string(), url)
            }
        };

        Ok(Self {
            path: path.to_string(),
            target,
            url,
        })
    }

    /// The configured path, e.g. `/status`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// What the request is addressed to: relative under a network origin,
    /// absolute under the fallback.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The absolute URL handed to the HTTP client.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target)
    }
}
