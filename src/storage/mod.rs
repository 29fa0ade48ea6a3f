//! Artifact storage abstraction.
//!
//! One capability trait, two conforming backends (local filesystem and a
//! remote object store) selected once at process start. Callers receive an
//! `Arc<dyn ArtifactStore>` and never learn which backend they hold.

pub mod local;
pub mod remote;

pub use local::LocalStore;
pub use remote::RemoteStore;

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::StorageConfig;
use crate::error::{Error, Result};

/// Prefix for stored video recordings.
pub const VIDEO_PREFIX: &str = "videos/";
/// Prefix for rendered reports.
pub const REPORT_PREFIX: &str = "reports/";

/// Servable reference to a stored artifact.
///
/// The local backend hands back a static-file-servable path; the remote
/// backend has no public URL to offer and hands back a byte stream.
pub enum ArtifactPayload {
    /// Path suitable for a static-file mount.
    File(PathBuf),
    /// Owned reader over the artifact bytes.
    Stream(Box<dyn Read + Send>),
}

impl ArtifactPayload {
    /// Drain the payload into memory. Mainly useful to callers that need
    /// the whole body anyway, and to tests.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            ArtifactPayload::File(path) => {
                std::fs::read(&path).map_err(|err| Error::unavailable(err.to_string()))
            }
            ArtifactPayload::Stream(mut reader) => {
                let mut buf = Vec::new();
                reader
                    .read_to_end(&mut buf)
                    .map_err(|err| Error::unavailable(err.to_string()))?;
                Ok(buf)
            }
        }
    }
}

impl std::fmt::Debug for ArtifactPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactPayload::File(path) => f.debug_tuple("File").field(path).finish(),
            ArtifactPayload::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Uniform put/get/exists/stream operations over named blobs.
///
/// Methods are synchronous and may block on disk or network I/O; callers
/// must not hold locks across them. `put` is atomic from a concurrent
/// reader's perspective: a `get` observes either the old blob or the new
/// one, never a partial write. Two concurrent `put`s to one key race with
/// last-write-wins.
pub trait ArtifactStore: Send + Sync {
    /// Backend name for logs ("local", "remote").
    fn backend(&self) -> &'static str;

    /// Write or overwrite the blob at `key`.
    fn put(&self, key: &str, content: &[u8], content_type: &str) -> Result<()>;

    /// Read the blob at `key`. Fails with `NotFound` if absent.
    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Whether a blob exists at `key`. Fails only with
    /// `StorageUnavailable`.
    fn exists(&self, key: &str) -> Result<bool>;

    /// A servable path or byte stream for the blob at `key`.
    fn url_or_stream(&self, key: &str) -> Result<ArtifactPayload>;
}

/// Validate an artifact key and split it into (prefix, stem).
///
/// Keys live in exactly two flat namespaces, `videos/` and `reports/`,
/// with a single non-empty filename stem. Anything else, and anything
/// that could escape the store root, is an `InvalidKey`.
pub fn validate_key(key: &str) -> Result<(&str, &str)> {
    let (prefix, stem) = if let Some(stem) = key.strip_prefix(VIDEO_PREFIX) {
        (VIDEO_PREFIX, stem)
    } else if let Some(stem) = key.strip_prefix(REPORT_PREFIX) {
        (REPORT_PREFIX, stem)
    } else {
        return Err(Error::invalid_key(key));
    };

    if stem.is_empty()
        || stem.contains('/')
        || stem.contains('\\')
        || stem.contains('\0')
        || stem == "."
        || stem == ".."
        || stem.contains("..")
    {
        return Err(Error::invalid_key(key));
    }

    Ok((prefix, stem))
}

/// Build the store selected by configuration.
///
/// Called once at startup; the returned handle is shared process-wide.
pub fn from_config(config: &StorageConfig) -> Result<Arc<dyn ArtifactStore>> {
    let store: Arc<dyn ArtifactStore> = match config {
        StorageConfig::Local { data_dir } => Arc::new(LocalStore::new(data_dir.clone())?),
        StorageConfig::Remote { base_url, api_key } => {
            Arc::new(RemoteStore::new(base_url.clone(), api_key.clone())?)
        }
    };
    log::info!("artifact store initialized: backend={}", store.backend());
    Ok(store)
}
