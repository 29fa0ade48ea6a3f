//! HTML document rendering.
//!
//! Fixed template: a header grid with the session metadata and score, an
//! event-summary card, and a chronological event table. All interpolated
//! free text goes through `escape` so logged messages cannot inject
//! markup.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::EventType;
use crate::report::ReportRecord;

/// Escape text for interpolation into HTML body or attribute positions.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn format_time(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn render(record: &ReportRecord) -> String {
    let end_time = record
        .end_time
        .as_ref()
        .map(format_time)
        .unwrap_or_default();

    let mut summary_items = String::new();
    for kind in EventType::ALL {
        let count = record.breakdown.count(kind);
        summary_items.push_str(&format!("<li>{}: {count}</li>\n", kind.label()));
    }

    let mut event_rows = String::new();
    for event in &record.events {
        let message = event.message.as_deref().unwrap_or("");
        event_rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            format_time(&event.timestamp),
            escape(&event.event_type),
            escape(message)
        ));
    }

    format!(
        "<!doctype html>\n\
<html>\n\
<head>\n\
    <meta charset='utf-8' />\n\
    <title>Proctoring Report</title>\n\
    <style>\n\
        body {{ font-family: Arial, sans-serif; padding: 24px; }}\n\
        h1 {{ margin-top: 0; }}\n\
        .grid {{ display: grid; grid-template-columns: 240px 1fr; gap: 8px 16px; }}\n\
        .card {{ border: 1px solid #e5e7eb; border-radius: 8px; padding: 16px; margin-top: 16px; }}\n\
        table {{ border-collapse: collapse; width: 100%; }}\n\
        th, td {{ border-bottom: 1px solid #e5e7eb; padding: 4px 8px; text-align: left; }}\n\
    </style>\n\
</head>\n\
<body>\n\
    <h1>Proctoring Report</h1>\n\
    <div class='grid'>\n\
        <div><strong>Candidate Name</strong></div><div>{candidate}</div>\n\
        <div><strong>Session ID</strong></div><div>{session_id}</div>\n\
        <div><strong>Start Time</strong></div><div>{start}</div>\n\
        <div><strong>End Time</strong></div><div>{end}</div>\n\
        <div><strong>Duration (s)</strong></div><div>{duration}</div>\n\
        <div><strong>Integrity Score</strong></div><div>{score}</div>\n\
    </div>\n\
\n\
    <div class='card'>\n\
        <h3>Event Summary</h3>\n\
        <ul>\n\
{summary_items}\
        </ul>\n\
    </div>\n\
\n\
    <div class='card'>\n\
        <h3>Event Timeline</h3>\n\
        <table>\n\
            <tr><th>Timestamp</th><th>Type</th><th>Message</th></tr>\n\
{event_rows}\
        </table>\n\
    </div>\n\
</body>\n\
</html>\n",
        candidate = escape(&record.candidate_name),
        session_id = escape(&record.session_id),
        start = format_time(&record.start_time),
        end = end_time,
        duration = record.duration_seconds,
        score = record.breakdown.score,
    )
}
