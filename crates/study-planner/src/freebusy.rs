//! Gap finding over a busy set.
//!
//! Clips busy intervals to a window, merges overlapping or touching periods,
//! then walks the merged list to find the free gaps. Everything here is a pure
//! function of its inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::{merge_intervals, Interval};

/// A free time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeSlot {
    fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        FreeSlot {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

/// Merge overlapping or adjacent busy periods, clipped to the given window.
///
/// Intervals entirely outside the window are discarded. Returns a sorted,
/// non-overlapping list.
pub fn merge_busy_periods(
    busy: &[Interval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<Interval> {
    merge_intervals(
        busy.iter()
            .filter_map(|iv| iv.clamp(window_start, window_end)),
    )
}

/// Find every free slot within `[window_start, window_end)`.
///
/// Returns slots sorted by start time. An empty or inverted window has no free
/// slots.
pub fn find_free_slots(
    busy: &[Interval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<FreeSlot> {
    if window_start >= window_end {
        return Vec::new();
    }

    let merged = merge_busy_periods(busy, window_start, window_end);

    let mut free_slots = Vec::new();
    let mut cursor = window_start;

    for period in &merged {
        if cursor < period.start() {
            free_slots.push(FreeSlot::between(cursor, period.start()));
        }
        cursor = cursor.max(period.end());
    }

    // Trailing free slot after the last busy period.
    if cursor < window_end {
        free_slots.push(FreeSlot::between(cursor, window_end));
    }

    free_slots
}

/// Find the first free slot of at least `min_duration_minutes` within the window.
///
/// Gaps are considered left to right: before the first busy period, between
/// periods, then after the last one. Returns `None` if no gap is long enough.
pub fn find_first_free_slot(
    busy: &[Interval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_duration_minutes: i64,
) -> Option<FreeSlot> {
    find_free_slots(busy, window_start, window_end)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}
