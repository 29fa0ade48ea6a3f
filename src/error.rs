use thiserror::Error;

/// Primary error type for report generation and artifact storage.
///
/// Scoring and rendering fail synchronously and are returned directly to
/// the caller; storage errors propagate unchanged with no retry at this
/// layer.
#[derive(Error, Debug)]
pub enum Error {
    /// An event carried an empty or blank type string.
    ///
    /// Rejected before scoring; no partial breakdown is ever produced.
    #[error("invalid event: {detail}")]
    InvalidEvent { detail: String },

    /// The storage backend could not be reached. Retryable by the caller.
    #[error("storage backend unavailable: {detail}")]
    StorageUnavailable { detail: String },

    /// No artifact exists at the requested key.
    ///
    /// Distinct from `StorageUnavailable`: the backend answered, the blob
    /// is simply absent.
    #[error("artifact not found: '{key}'")]
    NotFound { key: String },

    /// The artifact key violates the naming rules (path escapes, illegal
    /// characters, or a prefix outside the known namespaces).
    ///
    /// Never expected in normal operation.
    #[error("invalid artifact key: '{key}'")]
    InvalidKey { key: String },

    /// A rendering could not be serialized.
    #[error("failed to render report: {detail}")]
    Render { detail: String },

    /// Storage configuration is missing or contradictory.
    #[error("invalid storage configuration: {detail}")]
    Config { detail: String },
}

impl Error {
    pub fn invalid_event(detail: impl Into<String>) -> Self {
        Error::InvalidEvent {
            detail: detail.into(),
        }
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Error::StorageUnavailable {
            detail: detail.into(),
        }
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Error::NotFound { key: key.into() }
    }

    pub fn invalid_key(key: impl Into<String>) -> Self {
        Error::InvalidKey { key: key.into() }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Error::Config {
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
