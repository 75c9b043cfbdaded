//! Fetchers for the catalog documents
//!
//! A `Fetcher` turns a relative resource path into a response body. The
//! loader only ever asks for text and parses it itself, so the transport is
//! the only thing that differs between serving the data over HTTP and
//! reading it from a checkout.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::links::join;
use crate::error::CatalogLoadError;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the body of the resource at `path`.
    async fn fetch(&self, path: &str) -> Result<String, CatalogLoadError>;

    /// Where resources are fetched from, for logging.
    fn describe(&self) -> String;
}

/// Fetches over HTTP relative to a base URL.
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn resource_url(&self, path: &str) -> String {
        join(&self.base_url, path.trim_start_matches("./"))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<String, CatalogLoadError> {
        let url = self.resource_url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogLoadError::Network {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogLoadError::HttpStatus {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| CatalogLoadError::Network {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Reads resources from a directory.
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn resource_path(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches("./"))
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    async fn fetch(&self, path: &str) -> Result<String, CatalogLoadError> {
        let full_path = self.resource_path(path);
        debug!("read {}", full_path.display());
        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|source| CatalogLoadError::Io {
                path: path.to_string(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Pick a fetcher for a location: HTTP for `http://` and `https://`, the
/// filesystem otherwise.
pub fn fetcher_for(location: &str) -> Box<dyn Fetcher> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpFetcher::new(location))
    } else {
        Box::new(FileFetcher::new(location))
    }
}
