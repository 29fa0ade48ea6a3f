//! Local filesystem artifact store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::storage::{validate_key, ArtifactPayload, ArtifactStore};

/// Stores artifacts under a data directory with `videos/` and `reports/`
/// subdirectories, mirroring the key namespaces one-to-one so the
/// directories can be mounted directly by a static file server.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        for sub in [crate::storage::VIDEO_PREFIX, crate::storage::REPORT_PREFIX] {
            let dir = root.join(sub.trim_end_matches('/'));
            fs::create_dir_all(&dir).map_err(|err| {
                Error::unavailable(format!("failed to create {}: {err}", dir.display()))
            })?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Result<PathBuf> {
        let (prefix, stem) = validate_key(key)?;
        Ok(self.root.join(prefix.trim_end_matches('/')).join(stem))
    }
}

impl ArtifactStore for LocalStore {
    fn backend(&self) -> &'static str {
        "local"
    }

    fn put(&self, key: &str, content: &[u8], content_type: &str) -> Result<()> {
        let path = self.resolve(key)?;
        // Write to a temp file in the destination directory, then rename.
        // Rename within one directory is atomic, so a concurrent get sees
        // either the previous blob or the full new one.
        let dir = path.parent().ok_or_else(|| Error::invalid_key(key))?;
        let tmp = dir.join(format!(".{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content)
            .map_err(|err| Error::unavailable(format!("write {}: {err}", tmp.display())))?;
        if let Err(err) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(Error::unavailable(format!(
                "rename into {}: {err}",
                path.display()
            )));
        }
        log::debug!(
            "stored artifact key={key} bytes={} content_type={content_type}",
            content.len()
        );
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.resolve(key)?;
        fs::read(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::not_found(key),
            _ => Error::unavailable(format!("read {}: {err}", path.display())),
        })
    }

    fn exists(&self, key: &str) -> Result<bool> {
        let path = self.resolve(key)?;
        Ok(path.is_file())
    }

    fn url_or_stream(&self, key: &str) -> Result<ArtifactPayload> {
        let path = self.resolve(key)?;
        if !path.is_file() {
            return Err(Error::not_found(key));
        }
        Ok(ArtifactPayload::File(path))
    }
}
