//! External record sources
//!
//! The directory is published as a JSON file next to the page. A source
//! fetches that file once and hands back the raw JSON; deciding whether the
//! payload is usable is the store's job.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use serde_json::Value;
use tracing::debug;

use crate::config::{Config, SourceLocation};
use crate::error::FetchError;

/// A place the external directory can be loaded from
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Where the data comes from, for logging
    fn location(&self) -> String;

    /// Fetch and decode the payload
    async fn fetch(&self) -> Result<Value, FetchError>;
}

/// Directory file served over HTTP
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source for the file at `url`
    ///
    /// Without a timeout a request that never completes simply never
    /// resolves.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            "directorio/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            url: url.into(),
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!("Fetched {} bytes from {}", body.len(), self.url);
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Directory file on the local filesystem
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Read {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Build the source described by the configuration
///
/// Returns `Ok(None)` when no source is configured.
pub fn source_for(config: &Config) -> Result<Option<Box<dyn RecordSource>>, FetchError> {
    let source: Box<dyn RecordSource> = match config.source_location() {
        None => return Ok(None),
        Some(SourceLocation::Url(url)) => Box::new(HttpSource::new(url, config.fetch_timeout())?),
        Some(SourceLocation::Path(path)) => Box::new(FileSource::new(path)),
    };
    Ok(Some(source))
}
