//! Page sources feeding the coordinator
//!
//! Fetching the page over the network belongs to the host. The coordinator
//! only needs something that yields the raw document or a [`FetchError`].

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::FetchError;

/// Yields the raw download page
pub trait PageSource {
    /// Retrieve the current document
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>> + Send;

    /// Human readable origin, used in logs
    fn location(&self) -> String;
}

/// Reads the page from a local file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for FileSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        debug!("Reading page from {}", self.path.display());
        let html = tokio::fs::read_to_string(&self.path).await?;
        Ok(html)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a document already held in memory
#[derive(Debug, Clone)]
pub struct StaticSource {
    body: String,
}

impl StaticSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl PageSource for StaticSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        Ok(self.body.clone())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
