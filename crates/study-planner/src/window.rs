//! Per-day availability windows and the candidate start grid inside them.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::request::{PlacementOrder, ScheduleRequest};

/// The part of one calendar day in which sessions may be placed, already
/// clamped to `now` and the deadline.
#[derive(Debug, Clone, PartialEq)]
pub struct DayWindow {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Grid-aligned candidate starts in `[start, end)`, ascending.
    starts: Vec<DateTime<Utc>>,
}

impl DayWindow {
    /// Candidate starts in the order the placement policy visits them.
    pub fn candidates(&self, order: PlacementOrder) -> Box<dyn Iterator<Item = DateTime<Utc>> + '_> {
        match order {
            PlacementOrder::EarliestFirst => Box::new(self.starts.iter().copied()),
            PlacementOrder::LatestFirst => Box::new(self.starts.iter().rev().copied()),
        }
    }
}

/// Build the day windows between `now` and the request deadline, ordered the
/// way the placement policy visits them.
///
/// Days whose window is empty after clamping are left out.
pub fn day_windows(request: &ScheduleRequest, now: DateTime<Utc>) -> Vec<DayWindow> {
    let tz = request.timezone;
    let first = now.with_timezone(&tz).date_naive();
    let last = request.deadline.with_timezone(&tz).date_naive();

    let mut windows: Vec<DayWindow> = first
        .iter_days()
        .take_while(|date| *date <= last)
        .filter_map(|date| day_window(date, request, now))
        .collect();

    if request.placement_order == PlacementOrder::LatestFirst {
        windows.reverse();
    }
    windows
}

fn day_window(date: NaiveDate, request: &ScheduleRequest, now: DateTime<Utc>) -> Option<DayWindow> {
    let tz = request.timezone;
    let midnight = date.and_time(NaiveTime::MIN);

    let open = resolve_bound(tz, midnight + Duration::hours(i64::from(request.day_window_start)))?;
    let close = resolve_bound(tz, midnight + Duration::hours(i64::from(request.day_window_end)))?;

    let start = open.max(now);
    let end = close.min(request.deadline);
    if start >= end {
        return None;
    }

    let step = request.granularity.num_minutes().max(1);
    let slots_per_day = Duration::days(1).num_minutes() / step;
    let mut starts: Vec<DateTime<Utc>> = (0..=slots_per_day)
        .filter_map(|k| resolve_local(tz, midnight + Duration::minutes(k * step)))
        .filter(|s| *s >= start && *s < end)
        .collect();
    starts.sort_unstable();
    starts.dedup();

    Some(DayWindow {
        date,
        start,
        end,
        starts,
    })
}

/// Resolve a window bound. A bound inside a DST gap moves to the first local
/// minute after the gap, which is the same instant the gap starts at.
fn resolve_bound(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    (0..=Duration::days(1).num_minutes())
        .find_map(|m| resolve_local(tz, local + Duration::minutes(m)))
}

/// Map a local wall-clock time to an instant.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times that
/// do not exist (DST spring-forward gap) yield `None`.
pub fn resolve_local(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
