//! examwatch: proctoring report and integrity-score engine.
//!
//! Transforms a session's event log into an integrity score and three
//! report renderings (structured record, HTML document, CSV table), and
//! persists artifacts through a pluggable store that is either a local
//! filesystem directory or a remote object store. HTTP routing, request
//! validation, and the session/event database are external collaborators.

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scoring;
pub mod service;
pub mod storage;

pub use config::StorageConfig;
pub use error::{Error, Result};
pub use models::{Event, EventLog, EventType, Session, SessionStatus};
pub use report::{ReportKeys, ReportRecord, RenderedReport};
pub use scoring::{score_events, ScoreBreakdown, WeightTable};
pub use service::ReportService;
pub use storage::{ArtifactPayload, ArtifactStore, LocalStore, RemoteStore};
