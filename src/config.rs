// src/config.rs

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Settings shared by every load issued through a [`crate::Loader`].
///
/// The defaults reproduce the plain behavior: one request, no timeout,
/// relative paths resolved against the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory that relative local paths are resolved against.
    pub base_dir: PathBuf,
    /// Per-request timeout for remote resources. `None` waits indefinitely.
    pub timeout_ms: Option<u64>,
    /// Extra attempts after a transient remote failure.
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each further attempt.
    pub initial_backoff_ms: u64,
    pub user_agent: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            timeout_ms: None,
            max_retries: 0,
            initial_backoff_ms: 500,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Backoff before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_millis(self.initial_backoff_ms.saturating_mul(factor))
    }
}
