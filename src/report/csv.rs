//! CSV table rendering.
//!
//! Fixed column order (timestamp, event_type, message), a header row, one
//! row per event, and a trailing summary row carrying the integrity score.
//! Fields containing the delimiter, a quote, or a line break are quoted
//! with internal quotes doubled.

use chrono::SecondsFormat;

use crate::report::ReportRecord;

const HEADER: &str = "timestamp,event_type,message";

fn escape_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') || raw.contains('\r') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

pub fn render(record: &ReportRecord) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    for event in &record.events {
        let timestamp = event.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        let message = event.message.as_deref().unwrap_or("");
        out.push_str(&format!(
            "{},{},{}\n",
            escape_field(&timestamp),
            escape_field(&event.event_type),
            escape_field(message)
        ));
    }
    out.push_str(&format!("integrity_score,{},\n", record.breakdown.score));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, EventLog, Session, SessionStatus};
    use crate::report::build;
    use crate::scoring::WeightTable;
    use chrono::{TimeZone, Utc};

    /// Inverse of the escaping rule, for round-trip checks: splits rows on
    /// unquoted newlines and fields on unquoted commas, undoubling quotes.
    fn parse(csv: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut chars = csv.chars().peekable();
        while let Some(c) = chars.next() {
            if quoted {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => quoted = false,
                    other => field.push(other),
                }
            } else {
                match c {
                    '"' => quoted = true,
                    ',' => row.push(std::mem::take(&mut field)),
                    '\n' => {
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    other => field.push(other),
                }
            }
        }
        if !field.is_empty() || !row.is_empty() {
            row.push(field);
            rows.push(row);
        }
        rows
    }

    fn session() -> Session {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        Session {
            id: "s1".into(),
            candidate_name: "Ada".into(),
            start_time: start,
            end_time: Some(start + chrono::Duration::minutes(10)),
            status: SessionStatus::Ended,
            video_path: None,
        }
    }

    fn build_table(events: Vec<Event>) -> String {
        build(
            &session(),
            &EventLog::from_events(events),
            &WeightTable::default(),
        )
        .unwrap()
        .table
    }

    #[test]
    fn empty_log_is_header_plus_summary_only() {
        let table = build_table(vec![]);
        let rows = parse(&table);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["timestamp", "event_type", "message"]);
        assert_eq!(rows[1], vec!["integrity_score", "100", ""]);
    }

    #[test]
    fn round_trip_reconstructs_rows_with_hostile_messages() {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 9, 1, 0).unwrap();
        let messages = [
            Some("plain".to_string()),
            Some("with, comma".to_string()),
            Some("say \"cheese\"".to_string()),
            Some("line\nbreak".to_string()),
            None,
        ];
        let events: Vec<Event> = messages
            .iter()
            .enumerate()
            .map(|(i, message)| Event {
                event_type: "focus_lost".into(),
                message: message.clone(),
                timestamp: base + chrono::Duration::seconds(i as i64),
            })
            .collect();

        let table = build_table(events.clone());
        let rows = parse(&table);
        // header + 5 events + summary
        assert_eq!(rows.len(), 7);
        for (event, row) in events.iter().zip(&rows[1..6]) {
            assert_eq!(
                row[0],
                event.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
            );
            assert_eq!(row[1], event.event_type);
            assert_eq!(row[2], event.message.clone().unwrap_or_default());
        }
    }

    #[test]
    fn summary_row_carries_the_score() {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 9, 1, 0).unwrap();
        let table = build_table(vec![Event {
            event_type: "no_face".into(),
            message: None,
            timestamp: base,
        }]);
        let rows = parse(&table);
        assert_eq!(rows.last().unwrap(), &vec!["integrity_score", "95", ""]);
    }

    #[test]
    fn rows_are_chronological() {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let table = build_table(vec![
            Event {
                event_type: "no_face".into(),
                message: None,
                timestamp: base + chrono::Duration::seconds(30),
            },
            Event {
                event_type: "focus_lost".into(),
                message: None,
                timestamp: base,
            },
        ]);
        let rows = parse(&table);
        assert_eq!(rows[1][1], "focus_lost");
        assert_eq!(rows[2][1], "no_face");
    }
}
