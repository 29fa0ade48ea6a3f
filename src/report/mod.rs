//! Report building and persistence.
//!
//! One canonical record is computed per request and rendered three ways:
//! the structured record itself (returned to the caller), a self-contained
//! HTML document, and a CSV export. Rendering is pure; with an unchanged
//! event log every rendering is byte-identical across calls.

pub mod csv;
pub mod html;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Event, EventLog, Session, SessionStatus};
use crate::scoring::{score_events, ScoreBreakdown, WeightTable};
use crate::storage::{ArtifactStore, REPORT_PREFIX, VIDEO_PREFIX};

/// Canonical structured report, the form the other renderings derive from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub session_id: String,
    pub candidate_name: String,
    pub status: SessionStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_seconds: i64,
    pub video_path: Option<String>,
    pub breakdown: ScoreBreakdown,
    pub suspicious_events_count: u64,
    /// Full event list in chronological order.
    pub events: Vec<Event>,
}

impl ReportRecord {
    /// Serialize the record for the web layer.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| crate::error::Error::Render {
            detail: err.to_string(),
        })
    }
}

/// The three renderings produced for one session.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub record: ReportRecord,
    /// Self-contained HTML document.
    pub document: String,
    /// CSV export: header, one row per event, trailing score row.
    pub table: String,
}

/// Store keys written by `persist`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportKeys {
    pub document: String,
    pub table: String,
}

pub fn document_key(session_id: &str) -> String {
    format!("{REPORT_PREFIX}{session_id}.html")
}

pub fn table_key(session_id: &str) -> String {
    format!("{REPORT_PREFIX}{session_id}.csv")
}

pub fn video_key(session_id: &str, ext: &str) -> String {
    let ext = ext.trim_start_matches('.');
    format!("{VIDEO_PREFIX}{session_id}.{ext}")
}

/// Score the event log and render all three report formats.
///
/// Stateless and deterministic; fails only on a malformed event, in which
/// case nothing is rendered.
pub fn build(session: &Session, log: &EventLog, weights: &WeightTable) -> Result<RenderedReport> {
    let breakdown = score_events(log.events(), weights)?;
    let record = ReportRecord {
        session_id: session.id.clone(),
        candidate_name: session.candidate_name.clone(),
        status: session.status,
        start_time: session.start_time,
        end_time: session.end_time,
        duration_seconds: session.duration_seconds(),
        video_path: session.video_path.clone(),
        suspicious_events_count: breakdown.suspicious_total(),
        breakdown,
        events: log.events().to_vec(),
    };
    let document = html::render(&record);
    let table = csv::render(&record);
    Ok(RenderedReport {
        record,
        document,
        table,
    })
}

/// Write the document and table renderings under the session's report
/// keys.
///
/// Store errors propagate unchanged and abort the remaining writes; there
/// is no retry and no rollback. Regeneration simply overwrites, so a
/// request cancelled mid-persist is repaired by asking again.
pub fn persist(
    session_id: &str,
    rendered: &RenderedReport,
    store: &dyn ArtifactStore,
) -> Result<ReportKeys> {
    let keys = ReportKeys {
        document: document_key(session_id),
        table: table_key(session_id),
    };
    store.put(&keys.document, rendered.document.as_bytes(), "text/html")?;
    store.put(&keys.table, rendered.table.as_bytes(), "text/csv")?;
    log::info!(
        "persisted report for session {session_id}: {} + {}",
        keys.document,
        keys.table
    );
    Ok(keys)
}
