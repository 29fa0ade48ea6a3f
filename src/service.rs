//! Facade exposed to the web-layer collaborator.
//!
//! Holds the process-wide store handle and weight table; everything else
//! is computed per call from the caller-supplied session and event data.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Event, EventLog, Session};
use crate::report::{self, ReportKeys, ReportRecord};
use crate::scoring::WeightTable;
use crate::storage::{ArtifactPayload, ArtifactStore};

pub struct ReportService {
    store: Arc<dyn ArtifactStore>,
    weights: WeightTable,
}

impl ReportService {
    pub fn new(store: Arc<dyn ArtifactStore>, weights: WeightTable) -> Self {
        Self { store, weights }
    }

    pub fn store(&self) -> &dyn ArtifactStore {
        self.store.as_ref()
    }

    /// Score the session's events, persist the HTML and CSV renderings,
    /// and return the structured record plus the keys written.
    ///
    /// Events may arrive unsorted; they are re-sorted by timestamp before
    /// scoring and rendering. The record is returned even though persisted
    /// artifacts are addressable later by derived key alone.
    pub fn generate_report(
        &self,
        session: &Session,
        events: Vec<Event>,
    ) -> Result<(ReportRecord, ReportKeys)> {
        let log = EventLog::from_events(events);
        let rendered = report::build(session, &log, &self.weights)?;
        let keys = report::persist(&session.id, &rendered, self.store.as_ref())?;
        log::info!(
            "report generated for session {} (score {})",
            session.id,
            rendered.record.breakdown.score
        );
        Ok((rendered.record, keys))
    }

    /// Raw bytes of the previously persisted CSV rendering, for download.
    pub fn table_bytes(&self, session_id: &str) -> Result<Vec<u8>> {
        self.store.get(&report::table_key(session_id))
    }

    /// Persist a session recording under `videos/{id}.<ext>` and return
    /// the key.
    pub fn store_video(&self, session_id: &str, ext: &str, content: &[u8]) -> Result<String> {
        let key = report::video_key(session_id, ext);
        let content_type = match ext.trim_start_matches('.') {
            "webm" => "video/webm",
            "mp4" => "video/mp4",
            _ => "application/octet-stream",
        };
        self.store.put(&key, content, content_type)?;
        Ok(key)
    }

    /// Streaming access to any persisted artifact, for backends that do
    /// not expose a directly servable path.
    pub fn open_artifact(&self, key: &str) -> Result<ArtifactPayload> {
        self.store.url_or_stream(key)
    }
}
