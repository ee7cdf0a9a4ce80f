//! Half-open time intervals and the small set of operations the allocator
//! builds on: overlap testing, clamping to a window, and merging.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// A half-open time range `[start, end)` with `start < end`.
///
/// The only ways to obtain an `Interval` are [`Interval::new`] and
/// deserialization, both of which reject empty or inverted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for Interval {
    type Error = PlannerError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.start, raw.end)
    }
}

impl Interval {
    /// Build an interval, failing with [`PlannerError::InvalidInterval`] when
    /// `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(PlannerError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open overlap: `a.start < b.end && b.start < a.end`.
    ///
    /// Adjacent intervals (one ends exactly when the other starts) do not
    /// overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `self` lies entirely inside `[window_start, window_end)`.
    pub fn within(&self, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> bool {
        self.start >= window_start && self.end <= window_end
    }

    /// Clip to `[window_start, window_end)`, or `None` if nothing remains.
    pub fn clamp(&self, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Option<Interval> {
        let start = self.start.max(window_start);
        let end = self.end.min(window_end);
        (start < end).then_some(Interval { start, end })
    }

    /// Shift both bounds by `offset`.
    pub fn shifted(&self, offset: Duration) -> Interval {
        Interval {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

/// Sort intervals and merge those that overlap or touch.
///
/// Returns a sorted, pairwise disjoint, non-adjacent list.
pub fn merge_intervals(intervals: impl IntoIterator<Item = Interval>) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.into_iter().collect();
    sorted.sort_unstable();

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for iv in sorted {
        if let Some(last) = merged.last_mut() {
            if iv.start <= last.end {
                last.end = last.end.max(iv.end);
                continue;
            }
        }
        merged.push(iv);
    }
    merged
}

/// Total length of a set of intervals (overlaps counted twice).
pub fn total_duration<'a>(intervals: impl IntoIterator<Item = &'a Interval>) -> Duration {
    intervals
        .into_iter()
        .fold(Duration::zero(), |acc, iv| acc + iv.duration())
}
