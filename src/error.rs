// src/error.rs

use reqwest::StatusCode;
use std::path::PathBuf;

/// Why a load did not produce a value.
///
/// Every loader delivers exactly one `Result<_, LoadError>`; there is no
/// partially filled value to inspect on failure.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid URL {input:?}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported scheme {scheme:?} in {input:?}")]
    UnsupportedScheme { input: String, scheme: String },

    #[error("{input:?} does not name a file on this machine")]
    NotLocalFile { input: String },

    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned non-success status {status}")]
    Status { url: String, status: StatusCode },

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing JSON from {resource}: {source}")]
    Json {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("building record batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("writing parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("{0} is not implemented")]
    Unsupported(&'static str),
}

impl LoadError {
    /// True for failures a retry might fix: transport errors and 5xx/429.
    pub fn is_transient(&self) -> bool {
        match self {
            LoadError::Transport { .. } => true,
            LoadError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
