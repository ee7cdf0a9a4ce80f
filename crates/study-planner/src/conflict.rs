//! Overlap detection between candidate sessions and everything already on the
//! calendar.
//!
//! Adjacent intervals (where one ends exactly when another starts) are NOT
//! conflicts.

use chrono::Duration;

use crate::interval::{merge_intervals, Interval};

/// A detected conflict between two intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub a: Interval,
    pub b: Interval,
    pub overlap: Duration,
}

/// Find all pairwise conflicts (overlapping time ranges) between two lists.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(list_a: &[Interval], list_b: &[Interval]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for a in list_a {
        for b in list_b {
            if a.overlaps(b) {
                let overlap = a.end().min(b.end()) - a.start().max(b.start());
                conflicts.push(Conflict {
                    a: *a,
                    b: *b,
                    overlap,
                });
            }
        }
    }

    conflicts
}

/// Sorted, pairwise non-overlapping intervals with logarithmic overlap lookup.
///
/// Because members never overlap, ordering by start also orders by end, which
/// lets both queries and inserts use a binary search on the end bound.
#[derive(Debug, Clone, Default)]
pub struct DisjointIntervals {
    intervals: Vec<Interval>,
}

impl DisjointIntervals {
    /// Build from arbitrary (possibly overlapping) intervals by merging them.
    pub fn merged(intervals: impl IntoIterator<Item = Interval>) -> Self {
        Self {
            intervals: merge_intervals(intervals),
        }
    }

    /// Whether any member overlaps `candidate`.
    pub fn overlaps(&self, candidate: &Interval) -> bool {
        let idx = self
            .intervals
            .partition_point(|iv| iv.end() <= candidate.start());
        self.intervals
            .get(idx)
            .is_some_and(|iv| iv.start() < candidate.end())
    }

    /// Insert an interval that does not overlap any member.
    ///
    /// Returns `false` and leaves the set unchanged if it does overlap.
    pub fn insert(&mut self, interval: Interval) -> bool {
        if self.overlaps(&interval) {
            return false;
        }
        let idx = self
            .intervals
            .partition_point(|iv| iv.end() <= interval.start());
        self.intervals.insert(idx, interval);
        true
    }

    pub fn into_vec(self) -> Vec<Interval> {
        self.intervals
    }
}

/// The occupied calendar as seen by the allocator: pre-existing busy time,
/// sessions committed by earlier runs, and sessions placed during this run.
///
/// The three sources stay separate and are queried in turn, so recording a new
/// session never rebuilds the others.
#[derive(Debug, Clone)]
pub struct BusyUnion {
    busy: DisjointIntervals,
    committed: DisjointIntervals,
    placed: DisjointIntervals,
}

impl BusyUnion {
    pub fn new(busy: &[Interval], committed: &[Interval]) -> Self {
        Self {
            busy: DisjointIntervals::merged(busy.iter().copied()),
            committed: DisjointIntervals::merged(committed.iter().copied()),
            placed: DisjointIntervals::default(),
        }
    }

    pub fn is_free(&self, candidate: &Interval) -> bool {
        !(self.busy.overlaps(candidate)
            || self.committed.overlaps(candidate)
            || self.placed.overlaps(candidate))
    }

    /// Record `session` as placed if it is free. Returns whether it was.
    pub fn place(&mut self, session: Interval) -> bool {
        self.is_free(&session) && self.placed.insert(session)
    }

    /// Sessions placed so far, in chronological order.
    pub fn into_placed(self) -> Vec<Interval> {
        self.placed.into_vec()
    }
}
