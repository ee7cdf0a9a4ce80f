//! iCalendar (RFC 5545) export of placed study sessions.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::schedule::StudySession;

const PRODID: &str = "-//study-planner//Study Session Export//EN";
const MAX_LINE_OCTETS: usize = 75;

/// Render a UTC instant as an RFC 5545 basic-format UTC stamp,
/// e.g. `20260302T090000Z`.
pub fn compact_utc(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Serialize sessions into a `VCALENDAR` with one `VEVENT` each.
///
/// Every event gets a fresh random `UID` and `DTSTAMP = created_at`. Lines are
/// CRLF-terminated and folded at 75 octets.
pub fn to_ics(sessions: &[StudySession], created_at: DateTime<Utc>) -> String {
    let stamp = compact_utc(created_at);
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODID),
        "CALSCALE:GREGORIAN".to_string(),
    ];

    for session in sessions {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}", Uuid::new_v4()));
        lines.push(format!("DTSTAMP:{}", stamp));
        lines.push(format!("DTSTART:{}", compact_utc(session.interval.start())));
        lines.push(format!("DTEND:{}", compact_utc(session.interval.end())));
        lines.push(format!("SUMMARY:{}", escape_text(&session.label)));
        lines.push("END:VEVENT".to_string());
    }
    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in &lines {
        out.push_str(&fold_line(line));
        out.push_str("\r\n");
    }
    out
}

/// Escape a TEXT value (RFC 5545 section 3.3.11).
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Fold a content line so no physical line exceeds 75 octets, never splitting
/// a UTF-8 sequence.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            // The leading space counts toward the continuation line.
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out
}
