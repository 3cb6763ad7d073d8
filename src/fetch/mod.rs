// src/fetch/mod.rs

use reqwest::{header::USER_AGENT, Client};
use std::{
    fmt,
    future::Future,
    path::{Path, PathBuf},
};
use tokio::{fs, time::sleep};
use tracing::{debug, error, warn};
use url::Url;

use crate::{
    config::LoaderConfig,
    error::{LoadError, Result},
};

/// Where a resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(Url),
    Local(PathBuf),
}

impl Source {
    /// Classify `path`. `http(s)://` becomes a remote URL, `file:` URLs and
    /// plain paths become local files, relative ones under `base_dir`.
    /// Any other `scheme://` is rejected.
    pub fn resolve(path: &str, base_dir: &Path) -> Result<Self> {
        let lower = path.to_ascii_lowercase();
        let is_http = lower.starts_with("http://") || lower.starts_with("https://");
        let is_file = lower.starts_with("file:");
        if is_http || is_file || has_scheme_prefix(&lower) {
            let url = Url::parse(path).map_err(|source| LoadError::InvalidUrl {
                input: path.to_string(),
                source,
            })?;
            if is_http {
                return Ok(Source::Remote(url));
            }
            if is_file {
                let local = url.to_file_path().map_err(|_| LoadError::NotLocalFile {
                    input: path.to_string(),
                })?;
                return Ok(Source::Local(local));
            }
            return Err(LoadError::UnsupportedScheme {
                input: path.to_string(),
                scheme: url.scheme().to_string(),
            });
        }

        let local = Path::new(path);
        if local.is_absolute() {
            Ok(Source::Local(local.to_path_buf()))
        } else {
            Ok(Source::Local(base_dir.join(local)))
        }
    }
}

/// `scheme://` at the start of `path`, per the RFC 3986 scheme grammar.
fn has_scheme_prefix(path: &str) -> bool {
    let Some((scheme, _)) = path.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{}", url),
            Source::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads resource bodies from disk or over HTTP.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: LoaderConfig,
}

impl Fetcher {
    pub fn new(config: LoaderConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(LoadError::Client)?;
        Ok(Self::with_client(client, config))
    }

    /// Share an existing client (and its connection pool). The config's
    /// timeout and user agent are still applied to every request.
    pub fn with_client(client: Client, config: LoaderConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn resolve(&self, path: &str) -> Result<Source> {
        Source::resolve(path, &self.config.base_dir)
    }

    /// Body as text. Invalid UTF-8 is replaced, never rejected.
    pub async fn get_text(&self, source: &Source) -> Result<String> {
        match source {
            Source::Remote(url) => self.with_retry(url, || self.text_once(url)).await,
            Source::Local(path) => {
                let bytes = read_local(path).await?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }

    pub async fn get_bytes(&self, source: &Source) -> Result<Vec<u8>> {
        match source {
            Source::Remote(url) => self.with_retry(url, || self.bytes_once(url)).await,
            Source::Local(path) => read_local(path).await,
        }
    }

    async fn send(&self, url: &Url) -> Result<reqwest::Response> {
        debug!(%url, "GET");
        let mut req = self
            .client
            .get(url.clone())
            .header(USER_AGENT, self.config.user_agent.as_str());
        if let Some(timeout) = self.config.timeout() {
            req = req.timeout(timeout);
        }
        let resp = req
            .send()
            .await
            .map_err(|source| LoadError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(resp)
    }

    /// Always UTF-8, whatever charset the response declares.
    async fn text_once(&self, url: &Url) -> Result<String> {
        let bytes = self.bytes_once(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn bytes_once(&self, url: &Url) -> Result<Vec<u8>> {
        let body = self
            .send(url)
            .await?
            .bytes()
            .await
            .map_err(|source| LoadError::Transport {
                url: url.to_string(),
                source,
            })?;
        Ok(body.to_vec())
    }

    async fn with_retry<T, F, Fut>(&self, url: &Url, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempts = 0;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) if e.is_transient() && attempts < self.config.max_retries => {
                    attempts += 1;
                    let backoff = self.config.backoff(attempts);
                    warn!(%url, attempt = attempts, delay_ms = backoff.as_millis() as u64, error = %e, "retrying");
                    sleep(backoff).await;
                }
                Err(e) => {
                    if attempts > 0 {
                        error!(%url, error = %e, "exhausted retries");
                    }
                    return Err(e);
                }
            }
        }
    }
}

async fn read_local(path: &Path) -> Result<Vec<u8>> {
    debug!(path = %path.display(), "reading local file");
    fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
