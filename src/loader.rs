// src/loader.rs

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::{future::Future, sync::Arc};
use tokio::task::JoinHandle;
use tracing::{info, instrument};

use crate::{
    config::LoaderConfig,
    error::{LoadError, Result},
    fetch::Fetcher,
    table::{split_lines, Table, TableOptions},
};

/// Entry point for loading sketch resources.
///
/// Each `load_*` future resolves exactly once with the parsed value or the
/// reason it could not be produced. The `spawn_*` forms run the same load
/// on the current tokio runtime and hand that result to a callback.
/// Cloning is cheap and clones share the HTTP connection pool.
#[derive(Debug, Clone)]
pub struct Loader {
    fetcher: Arc<Fetcher>,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Arc::new(Fetcher::new(config)?),
        })
    }

    pub fn with_client(client: Client, config: LoaderConfig) -> Self {
        Self {
            fetcher: Arc::new(Fetcher::with_client(client, config)),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        self.fetcher.config()
    }

    /// Non-empty lines of a text resource.
    #[instrument(level = "info", skip(self))]
    pub async fn load_strings(&self, path: &str) -> Result<Vec<String>> {
        let source = self.fetcher.resolve(path)?;
        let text = self.fetcher.get_text(&source).await?;
        let lines: Vec<String> = split_lines(&text).map(str::to_string).collect();
        info!(lines = lines.len(), "loaded strings");
        Ok(lines)
    }

    /// Parse a JSON resource into any deserializable type
    /// (`serde_json::Value` for untyped data).
    #[instrument(level = "info", skip(self))]
    pub async fn load_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let source = self.fetcher.resolve(path)?;
        let bytes = self.fetcher.get_bytes(&source).await?;
        serde_json::from_slice(&bytes).map_err(|source_err| LoadError::Json {
            resource: source.to_string(),
            source: source_err,
        })
    }

    #[instrument(level = "info", skip(self))]
    pub async fn load_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let source = self.fetcher.resolve(path)?;
        let bytes = self.fetcher.get_bytes(&source).await?;
        info!(bytes = bytes.len(), "loaded bytes");
        Ok(bytes)
    }

    /// Fetch a delimited resource and parse it into a [`Table`].
    ///
    /// Fields are split on the bare delimiter; quoted fields that contain
    /// it are not kept together.
    #[instrument(level = "info", skip(self))]
    pub async fn load_table(&self, path: &str, opts: TableOptions) -> Result<Table> {
        let source = self.fetcher.resolve(path)?;
        let text = self.fetcher.get_text(&source).await?;
        let table = Table::parse(&text, &opts);
        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );
        Ok(table)
    }

    pub fn spawn_strings<F>(&self, path: impl Into<String>, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Vec<String>>) + Send + 'static,
    {
        self.spawn_with(path, on_complete, |loader, path| async move {
            loader.load_strings(&path).await
        })
    }

    pub fn spawn_json<T, F>(&self, path: impl Into<String>, on_complete: F) -> JoinHandle<()>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<T>) + Send + 'static,
    {
        self.spawn_with(path, on_complete, |loader, path| async move {
            loader.load_json::<T>(&path).await
        })
    }

    pub fn spawn_bytes<F>(&self, path: impl Into<String>, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Vec<u8>>) + Send + 'static,
    {
        self.spawn_with(path, on_complete, |loader, path| async move {
            loader.load_bytes(&path).await
        })
    }

    /// Load a table in the background and pass the outcome to
    /// `on_complete`, which runs exactly once, on success or failure.
    /// Must be called from within a tokio runtime.
    pub fn spawn_table<F>(
        &self,
        path: impl Into<String>,
        opts: TableOptions,
        on_complete: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(Result<Table>) + Send + 'static,
    {
        self.spawn_with(path, on_complete, move |loader, path| async move {
            loader.load_table(&path, opts).await
        })
    }

    fn spawn_with<T, F, L, Fut>(
        &self,
        path: impl Into<String>,
        on_complete: F,
        load: L,
    ) -> JoinHandle<()>
    where
        T: Send + 'static,
        F: FnOnce(Result<T>) + Send + 'static,
        L: FnOnce(Loader, String) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let loader = self.clone();
        let path = path.into();
        tokio::spawn(async move {
            let result = load(loader, path).await;
            on_complete(result);
        })
    }
}
