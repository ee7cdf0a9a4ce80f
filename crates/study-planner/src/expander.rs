//! Weekly recurrence expansion -- turns busy events into concrete intervals.
//!
//! A recurring [`BusyEvent`] stores one representative occurrence. Expansion
//! projects it forward in fixed 7-day steps and materializes every occurrence
//! that starts in `[now, deadline)`. One-off events pass through unchanged.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::interval::Interval;

/// A pre-existing commitment on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyEvent {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Repeat every 7 days from `start`.
    #[serde(default, alias = "repeat_weekly")]
    pub recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl BusyEvent {
    pub fn once(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            recurring: false,
            title: None,
        }
    }

    pub fn weekly(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            recurring: true,
            ..Self::once(start, end)
        }
    }
}

/// Expand busy events into a flat list of intervals.
///
/// - Non-recurring events become a single interval, regardless of `now`.
/// - Recurring events are advanced in 7-day steps until their start is at or
///   after `now`, then emitted every 7 days while the start is strictly before
///   `deadline`. Each occurrence keeps the original length.
///
/// The result is not sorted or merged.
///
/// # Errors
/// Returns [`PlannerError::InvalidInterval`] for any event with
/// `start >= end`. The event is never dropped silently.
pub fn expand(
    events: &[BusyEvent],
    now: DateTime<Utc>,
    deadline: DateTime<Utc>,
) -> Result<Vec<Interval>> {
    let mut intervals = Vec::with_capacity(events.len());

    for event in events {
        let base = Interval::try_from(event)?;
        if event.recurring {
            let before = intervals.len();
            intervals.extend(weekly_occurrences(base, now, deadline));
            debug!(
                start = %base.start(),
                occurrences = intervals.len() - before,
                "expanded weekly busy event"
            );
        } else {
            intervals.push(base);
        }
    }

    Ok(intervals)
}

/// Occurrences of a weekly event starting in `[now, deadline)`.
fn weekly_occurrences(
    base: Interval,
    now: DateTime<Utc>,
    deadline: DateTime<Utc>,
) -> impl Iterator<Item = Interval> {
    let week = Duration::weeks(1);

    // Jump straight to the first occurrence at or after `now` instead of
    // stepping week by week through the past.
    let skipped_weeks = if base.start() < now {
        let behind = now - base.start();
        let weeks = behind.num_seconds().div_euclid(week.num_seconds());
        if base.start() + Duration::weeks(weeks) < now {
            weeks + 1
        } else {
            weeks
        }
    } else {
        0
    };

    let first = base.shifted(Duration::weeks(skipped_weeks));
    let remaining = if first.start() < deadline {
        (deadline - first.start()).num_seconds() / week.num_seconds() + 1
    } else {
        0
    };

    (0..remaining)
        .map(move |k| first.shifted(Duration::weeks(k)))
        .take_while(move |occ| occ.start() < deadline)
}

impl TryFrom<&BusyEvent> for Interval {
    type Error = PlannerError;

    fn try_from(event: &BusyEvent) -> Result<Self> {
        Interval::new(event.start, event.end)
    }
}
