pub mod weights;

pub use weights::WeightTable;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Event, EventType};

/// Per-type event counts plus the derived integrity score.
///
/// `score = clamp(100 - sum(count[t] * weight[t]), 0, 100)`, rounded to
/// the nearest integer with ties rounding half up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub counts: BTreeMap<EventType, u64>,
    pub score: u32,
}

impl ScoreBreakdown {
    pub fn count(&self, kind: EventType) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Total of events in the heavyweight categories (multiple faces,
    /// phone, notes, extra device).
    pub fn suspicious_total(&self) -> u64 {
        EventType::ALL
            .iter()
            .filter(|k| k.is_suspicious())
            .map(|k| self.count(*k))
            .sum()
    }
}

/// Score an event sequence against a weight table.
///
/// Pure and order-independent: the result depends only on the multiset of
/// event types. All-or-nothing: a single malformed event fails the whole
/// call and no partial breakdown is returned.
pub fn score_events(events: &[Event], weights: &WeightTable) -> Result<ScoreBreakdown> {
    let mut counts: BTreeMap<EventType, u64> = BTreeMap::new();
    for kind in EventType::ALL {
        counts.insert(kind, 0);
    }

    // Classify everything before counting so an invalid event cannot
    // leave a half-built breakdown behind.
    let mut kinds = Vec::with_capacity(events.len());
    for event in events {
        kinds.push(event.kind()?);
    }

    for kind in kinds {
        *counts.entry(kind).or_insert(0) += 1;
    }

    let penalty: f64 = counts
        .iter()
        .map(|(kind, count)| *count as f64 * weights.weight(*kind))
        .sum();
    let raw = (100.0 - penalty).clamp(0.0, 100.0);
    // After clamping the value is nonnegative, so f64::round is exactly
    // round-half-up.
    let score = raw.round() as u32;

    Ok(ScoreBreakdown { counts, score })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(kind: &str) -> Event {
        Event {
            event_type: kind.into(),
            message: None,
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn empty_log_scores_100() {
        let breakdown = score_events(&[], &WeightTable::default()).unwrap();
        assert_eq!(breakdown.score, 100);
        assert!(breakdown.counts.values().all(|&c| c == 0));
    }

    #[test]
    fn score_is_order_independent() {
        let weights = WeightTable::default();
        let forward = vec![
            event("focus_lost"),
            event("no_face"),
            event("phone_detected"),
            event("focus_lost"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(
            score_events(&forward, &weights).unwrap(),
            score_events(&reversed, &weights).unwrap()
        );
    }

    #[test]
    fn scenario_two_focus_lost_one_no_face() {
        let weights = WeightTable::new([
            (EventType::FocusLost, 5.0),
            (EventType::NoFace, 20.0),
        ]);
        let events = vec![event("focus_lost"), event("focus_lost"), event("no_face")];
        let breakdown = score_events(&events, &weights).unwrap();
        assert_eq!(breakdown.score, 70);
        assert_eq!(breakdown.count(EventType::FocusLost), 2);
        assert_eq!(breakdown.count(EventType::NoFace), 1);
    }

    #[test]
    fn score_clamps_at_zero() {
        let weights = WeightTable::default();
        let events: Vec<Event> = (0..50).map(|_| event("phone_detected")).collect();
        let breakdown = score_events(&events, &weights).unwrap();
        assert_eq!(breakdown.score, 0);
    }

    #[test]
    fn fractional_weights_round_half_up() {
        let weights = WeightTable::new([(EventType::FocusLost, 2.5)]);
        let breakdown = score_events(&[event("focus_lost")], &weights).unwrap();
        // 100 - 2.5 = 97.5 rounds up to 98.
        assert_eq!(breakdown.score, 98);
    }

    #[test]
    fn unknown_types_count_as_other() {
        let weights = WeightTable::default();
        let breakdown = score_events(&[event("tab_switch")], &weights).unwrap();
        assert_eq!(breakdown.count(EventType::Other), 1);
        // Default weight for `other` is zero.
        assert_eq!(breakdown.score, 100);
    }

    #[test]
    fn blank_type_is_rejected_with_no_partial_result() {
        let weights = WeightTable::default();
        let events = vec![event("focus_lost"), event(""), event("no_face")];
        let err = score_events(&events, &weights).unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidEvent { .. }));
    }

    #[test]
    fn suspicious_total_sums_heavy_categories() {
        let weights = WeightTable::default();
        let events = vec![
            event("multiple_faces"),
            event("phone_detected"),
            event("notes_detected"),
            event("device_detected"),
            event("focus_lost"),
        ];
        let breakdown = score_events(&events, &weights).unwrap();
        assert_eq!(breakdown.suspicious_total(), 4);
    }
}
