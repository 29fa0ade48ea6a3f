//! Session metadata as supplied by the external session store.
//!
//! Sessions are owned elsewhere; this crate receives a read-only copy and
//! never writes one back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Ended,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Ended => "ended",
        }
    }
}

/// One proctored exam attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub candidate_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    /// Key of the stored recording, if one was uploaded.
    pub video_path: Option<String>,
}

impl Session {
    /// Elapsed seconds between start and end; 0 while the session is
    /// still running.
    pub fn duration_seconds(&self) -> i64 {
        match self.end_time {
            Some(end) => (end - self.start_time).num_seconds().max(0),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn duration_is_zero_without_end_time() {
        let session = Session {
            id: "s1".into(),
            candidate_name: "Ada".into(),
            start_time: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            end_time: None,
            status: SessionStatus::Active,
            video_path: None,
        };
        assert_eq!(session.duration_seconds(), 0);
    }

    #[test]
    fn duration_counts_whole_seconds() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let session = Session {
            id: "s1".into(),
            candidate_name: "Ada".into(),
            start_time: start,
            end_time: Some(start + chrono::Duration::seconds(754)),
            status: SessionStatus::Ended,
            video_path: None,
        };
        assert_eq!(session.duration_seconds(), 754);
    }
}
