//! One-shot loading of the ratings dataset.
//!
//! [`DatasetLoader`] owns the only copy of the parsed dataset. The first
//! successful [`DatasetLoader::load`] caches it; every later call returns the
//! same `Arc` without touching the source again. Failed loads cache nothing.

use crate::model::Dataset;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::OnceCell;
use url::Url;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read, or answered with a non-success status.
    #[error("network error: {message}")]
    Network { status: Option<u16>, message: String },
    /// The payload is not a JSON array of professors with valid ratings.
    #[error("parse error: {0}")]
    Parse(String),
}

impl LoadError {
    pub fn network(message: impl Into<String>) -> Self {
        LoadError::Network { status: None, message: message.into() }
    }
}

/// Retrieves the raw serialized dataset.
pub trait Fetch: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>, LoadError>> + Send;
}

/// Where the dataset lives: a local JSON file or an http(s) URL.
#[derive(Debug, Clone)]
pub enum DatasetLocation {
    File(PathBuf),
    Http { url: Url, client: reqwest::Client },
}

impl DatasetLocation {
    /// `http://` and `https://` locations are fetched over the network; anything
    /// else is treated as a file path.
    pub fn parse(location: &str, timeout: Duration) -> Result<Self, LoadError> {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                let client = reqwest::Client::builder()
                    .timeout(timeout)
                    .build()
                    .map_err(|e| LoadError::network(e.to_string()))?;
                Ok(DatasetLocation::Http { url, client })
            }
            _ => Ok(DatasetLocation::File(PathBuf::from(location))),
        }
    }
}

impl Fetch for DatasetLocation {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            DatasetLocation::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| LoadError::network(format!("{}: {e}", path.display()))),
            DatasetLocation::Http { url, client } => {
                let resp = client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|e| LoadError::network(e.to_string()))?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(LoadError::Network {
                        status: Some(status.as_u16()),
                        message: format!("{url} responded {status}"),
                    });
                }
                let bytes = resp.bytes().await.map_err(|e| LoadError::network(e.to_string()))?;
                Ok(bytes.to_vec())
            }
        }
    }
}

pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, LoadError> {
    serde_json::from_slice(bytes).map_err(|e| LoadError::Parse(e.to_string()))
}

pub struct DatasetLoader<F> {
    fetcher: F,
    cell: OnceCell<Arc<Dataset>>,
}

impl<F: Fetch> DatasetLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher, cell: OnceCell::new() }
    }

    /// Concurrent first calls share a single fetch; callers queued behind a
    /// failed attempt get their own retry.
    pub async fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        let dataset = self
            .cell
            .get_or_try_init(|| async {
                let start = Instant::now();
                let bytes = self.fetcher.fetch().await?;
                let dataset = parse_dataset(&bytes)?;
                tracing::info!(
                    professors = dataset.professors.len(),
                    ratings = dataset.num_ratings(),
                    took_s = start.elapsed().as_secs_f64(),
                    "loaded professor data"
                );
                Ok::<_, LoadError>(Arc::new(dataset))
            })
            .await
            .inspect_err(|e: &LoadError| tracing::warn!(error = %e, "loading professor data failed"))?;
        Ok(Arc::clone(dataset))
    }

    pub fn is_loaded(&self) -> bool { self.cell.initialized() }
}
