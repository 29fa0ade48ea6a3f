//! Storage backend configuration.
//!
//! The process configuration loader is an external collaborator; this
//! module only defines the value it produces plus an env-var shortcut used
//! by the companion binary. Backend selection happens exactly once, at
//! startup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Filesystem store rooted at `data_dir` (gets `videos/` and
    /// `reports/` subdirectories).
    Local { data_dir: PathBuf },
    /// Drive-style HTTP object store.
    Remote {
        base_url: String,
        api_key: Option<String>,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Local {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl StorageConfig {
    /// Read the backend selection from the environment.
    ///
    /// `EXAMWATCH_STORAGE_BACKEND=local|remote` (default local),
    /// `EXAMWATCH_DATA_DIR` for the local root, `EXAMWATCH_REMOTE_URL`
    /// and `EXAMWATCH_REMOTE_TOKEN` for the remote store.
    pub fn from_env() -> Result<Self> {
        let backend = std::env::var("EXAMWATCH_STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase();
        match backend.as_str() {
            "local" => {
                let data_dir = std::env::var("EXAMWATCH_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
                Ok(StorageConfig::Local { data_dir })
            }
            "remote" => {
                let base_url = std::env::var("EXAMWATCH_REMOTE_URL").map_err(|_| {
                    Error::config("EXAMWATCH_REMOTE_URL is required for the remote backend")
                })?;
                let api_key = std::env::var("EXAMWATCH_REMOTE_TOKEN").ok();
                Ok(StorageConfig::Remote { base_url, api_key })
            }
            other => Err(Error::config(format!("unknown storage backend '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_local_data_dir() {
        match StorageConfig::default() {
            StorageConfig::Local { data_dir } => assert_eq!(data_dir, PathBuf::from("data")),
            other => panic!("unexpected default {other:?}"),
        }
    }

    #[test]
    fn deserializes_tagged_variants() {
        let local: StorageConfig =
            serde_json::from_str(r#"{"backend":"local","data_dir":"/srv/examwatch"}"#).unwrap();
        assert!(matches!(local, StorageConfig::Local { .. }));

        let remote: StorageConfig = serde_json::from_str(
            r#"{"backend":"remote","base_url":"https://drive.example.com","api_key":null}"#,
        )
        .unwrap();
        assert!(matches!(remote, StorageConfig::Remote { .. }));
    }
}
