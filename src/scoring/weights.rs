//! Event-type weight configuration.

use std::collections::BTreeMap;

use crate::models::EventType;

/// Immutable mapping from event type to score penalty per occurrence.
///
/// Built once at startup and passed by reference into scoring; there is no
/// global lookup table.
#[derive(Debug, Clone)]
pub struct WeightTable {
    weights: BTreeMap<EventType, f64>,
}

impl WeightTable {
    /// Build a table from explicit entries. Types left out weigh the
    /// default for `Other`, which is zero.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (EventType, f64)>,
    {
        Self {
            weights: entries.into_iter().collect(),
        }
    }

    pub fn weight(&self, kind: EventType) -> f64 {
        self.weights.get(&kind).copied().unwrap_or(0.0)
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::new([
            (EventType::FocusLost, 2.0),
            (EventType::LookingAway, 2.0),
            (EventType::NoFace, 5.0),
            (EventType::MultipleFaces, 10.0),
            (EventType::PhoneDetected, 10.0),
            (EventType::NotesDetected, 5.0),
            (EventType::DeviceDetected, 8.0),
            (EventType::Other, 0.0),
        ])
    }
}
