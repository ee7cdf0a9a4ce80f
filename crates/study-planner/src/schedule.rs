//! Allocation results and their human-readable summary.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::interval::{total_duration, Interval};
use crate::request::minutes;

/// One newly placed block of study time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub label: String,
    #[serde(flatten)]
    pub interval: Interval,
}

/// How an allocation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The requested duration was placed in full.
    Full,
    /// Some duration could not be placed: every day ran out of room, or the
    /// sweep ceiling was reached.
    Partial,
}

/// The sessions an allocation produced plus whatever could not be placed.
///
/// `scheduled() + unplaced == requested` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Chronologically ordered.
    pub sessions: Vec<StudySession>,
    #[serde(rename = "requested_minutes", with = "minutes")]
    pub requested: Duration,
    #[serde(rename = "unplaced_minutes", with = "minutes")]
    pub unplaced: Duration,
    pub outcome: Outcome,
    /// Number of day-by-day sweeps the allocator ran.
    pub sweeps: u32,
}

impl ScheduleResult {
    /// Total length of the placed sessions.
    pub fn scheduled(&self) -> Duration {
        total_duration(self.sessions.iter().map(|s| &s.interval))
    }

    pub fn intervals(&self) -> Vec<Interval> {
        self.sessions.iter().map(|s| s.interval).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.outcome == Outcome::Full
    }

    /// One-line summary suitable for showing to the person who asked.
    pub fn status(&self) -> String {
        if self.sessions.is_empty() {
            return "No available slots found before the deadline within your daily window."
                .to_string();
        }
        match self.outcome {
            Outcome::Full => format!(
                "Scheduled {}h across {} session(s).",
                format_hours(self.scheduled()),
                self.sessions.len()
            ),
            Outcome::Partial => format!(
                "Scheduled {}h. Could not fit {}h before the deadline.",
                format_hours(self.scheduled()),
                format_hours(self.unplaced)
            ),
        }
    }
}

/// Hours with at most two decimals and no trailing zeros: `3`, `2.5`, `0.25`.
pub fn format_hours(d: Duration) -> String {
    let hours = d.num_minutes() as f64 / 60.0;
    let text = format!("{:.2}", hours);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
