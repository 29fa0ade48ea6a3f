//! Proctoring event model.
//!
//! Events are immutable once logged; the external session store owns them
//! and returns them in non-decreasing timestamp order. `EventLog` re-sorts
//! defensively so scoring and rendering never depend on that guarantee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The closed set of recognized anomaly types.
///
/// Unrecognized (but non-blank) type strings fold into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    FocusLost,
    LookingAway,
    NoFace,
    MultipleFaces,
    PhoneDetected,
    NotesDetected,
    DeviceDetected,
    Other,
}

impl EventType {
    /// All known types, in the order reports list them.
    pub const ALL: [EventType; 8] = [
        EventType::FocusLost,
        EventType::LookingAway,
        EventType::NoFace,
        EventType::MultipleFaces,
        EventType::PhoneDetected,
        EventType::NotesDetected,
        EventType::DeviceDetected,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::FocusLost => "focus_lost",
            EventType::LookingAway => "looking_away",
            EventType::NoFace => "no_face",
            EventType::MultipleFaces => "multiple_faces",
            EventType::PhoneDetected => "phone_detected",
            EventType::NotesDetected => "notes_detected",
            EventType::DeviceDetected => "device_detected",
            EventType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventType::FocusLost => "Focus lost",
            EventType::LookingAway => "Looking away",
            EventType::NoFace => "No face",
            EventType::MultipleFaces => "Multiple faces",
            EventType::PhoneDetected => "Phone detected",
            EventType::NotesDetected => "Notes detected",
            EventType::DeviceDetected => "Extra device detected",
            EventType::Other => "Other",
        }
    }

    /// True for types counted toward the suspicious-event total.
    pub fn is_suspicious(&self) -> bool {
        matches!(
            self,
            EventType::MultipleFaces
                | EventType::PhoneDetected
                | EventType::NotesDetected
                | EventType::DeviceDetected
        )
    }

    /// Classify a raw type string from the session store.
    ///
    /// A blank string is malformed input, not `Other`.
    pub fn parse(raw: &str) -> Result<EventType> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_event("event type is empty"));
        }
        Ok(match trimmed {
            "focus_lost" => EventType::FocusLost,
            "looking_away" => EventType::LookingAway,
            "no_face" => EventType::NoFace,
            "multiple_faces" => EventType::MultipleFaces,
            "phone_detected" => EventType::PhoneDetected,
            "notes_detected" => EventType::NotesDetected,
            "device_detected" => EventType::DeviceDetected,
            _ => EventType::Other,
        })
    }
}

/// A single observed anomaly during a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Raw type string as logged. Classified via `EventType::parse` at
    /// scoring time so malformed rows surface as `InvalidEvent` instead
    /// of being silently dropped.
    pub event_type: String,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    pub fn kind(&self) -> Result<EventType> {
        EventType::parse(&self.event_type)
    }
}

/// Ordered, read-only view of one session's events.
///
/// Construction sorts by timestamp; the sort is stable, so events sharing
/// a timestamp keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn from_events(mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| e.timestamp);
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn parse_known_and_unknown_types() {
        assert_eq!(EventType::parse("focus_lost").unwrap(), EventType::FocusLost);
        assert_eq!(EventType::parse("tab_switch").unwrap(), EventType::Other);
    }

    #[test]
    fn parse_rejects_blank_type() {
        assert!(matches!(
            EventType::parse("   "),
            Err(crate::error::Error::InvalidEvent { .. })
        ));
        assert!(matches!(
            EventType::parse(""),
            Err(crate::error::Error::InvalidEvent { .. })
        ));
    }

    #[test]
    fn event_log_sorts_by_timestamp_preserving_tie_order() {
        let mk = |t: i64, msg: &str| Event {
            event_type: "focus_lost".into(),
            message: Some(msg.into()),
            timestamp: at(t),
        };
        let log = EventLog::from_events(vec![mk(10, "b"), mk(5, "a"), mk(10, "c")]);
        let messages: Vec<_> = log
            .events()
            .iter()
            .map(|e| e.message.clone().unwrap())
            .collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }
}
