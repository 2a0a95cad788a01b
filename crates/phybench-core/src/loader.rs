//! Leaderboard data loading.
//!
//! The data file is a JSON array of entries fetched once per mount from a
//! file path or an HTTP(S) URL. Fetch and parse failures are
//! [`DataLoadError`]s; contract violations in otherwise valid JSON are
//! [`IntegrityError`](crate::domain::IntegrityError)s and are never patched
//! with defaults.
//!
//! There is no automatic retry.

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error};

use crate::domain::{DataLoadError, Leaderboard, LeaderboardError, RawModelEntry, Result};
use crate::{metrics::METRICS, obs};

const USER_AGENT: &str = concat!("phybench-core/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Somewhere the raw leaderboard bytes can be fetched from.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the raw document.
    async fn fetch(&self) -> std::result::Result<Vec<u8>, DataLoadError>;

    /// Human-readable location, used in diagnostics.
    fn describe(&self) -> String;
}

/// Data file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn fetch(&self) -> std::result::Result<Vec<u8>, DataLoadError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| DataLoadError::Io {
                path: self.path.display().to_string(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Data file served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> std::result::Result<Self, DataLoadError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| DataLoadError::Http {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self) -> std::result::Result<Vec<u8>, DataLoadError> {
        let http_err = |e: reqwest::Error| DataLoadError::Http {
            url: self.url.clone(),
            reason: e.to_string(),
        };

        let response = self.client.get(&self.url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataLoadError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(http_err)?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// In-memory document, for embedding and tests.
#[derive(Debug, Clone)]
pub struct BytesSource {
    label: String,
    bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(label: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl DataSource for BytesSource {
    async fn fetch(&self) -> std::result::Result<Vec<u8>, DataLoadError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Pick a source for a location string: `http(s)://` URLs go over the
/// network, anything else is a file path.
pub fn source_for(location: &str) -> std::result::Result<Box<dyn DataSource>, DataLoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

/// Parse and validate a raw leaderboard document.
///
/// Anything that is not a JSON array is [`DataLoadError::Malformed`]. Once
/// the array parses, every schema problem inside an element is an
/// [`IntegrityError`](crate::domain::IntegrityError) naming that entry.
pub fn parse_leaderboard(bytes: &[u8]) -> Result<Leaderboard> {
    let values: Vec<Value> =
        serde_json::from_slice(bytes).map_err(|e| LeaderboardError::DataLoad(e.into()))?;
    let raw = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| RawModelEntry::from_value(index, value))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Leaderboard::from_raw(raw)?)
}

/// Fetch, parse and validate the leaderboard from `source`.
pub async fn load(source: &dyn DataSource) -> Result<Leaderboard> {
    load_with_bytes(source).await.map(|(board, _)| board)
}

/// Like [`load`], also returning the raw bytes (for digests).
pub async fn load_with_bytes(source: &dyn DataSource) -> Result<(Leaderboard, Vec<u8>)> {
    let location = source.describe();
    debug!(source = %location, "fetching leaderboard data");

    let outcome = match source.fetch().await {
        Ok(bytes) => parse_leaderboard(&bytes).map(|board| (board, bytes)),
        Err(e) => Err(e.into()),
    };

    match &outcome {
        Ok((board, _)) => {
            METRICS.inc_loads_succeeded();
            obs::emit_data_loaded(&location, board.len());
        }
        Err(e) => {
            METRICS.inc_loads_failed();
            obs::emit_data_load_failed(&location, e);
        }
    }
    outcome
}

/// Load, falling back to an empty leaderboard on recoverable failures.
///
/// Fetch and parse failures are logged and yield an empty list so the page
/// still renders. Integrity errors are returned.
pub async fn load_or_empty(source: &dyn DataSource) -> Result<Leaderboard> {
    match load(source).await {
        Ok(board) => Ok(board),
        Err(e) if e.is_recoverable() => {
            error!(source = %source.describe(), error = %e, "rendering empty leaderboard");
            Ok(Leaderboard::empty())
        }
        Err(e) => Err(e),
    }
}
