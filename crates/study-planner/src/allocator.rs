//! Greedy multi-pass session placement.
//!
//! The allocator sweeps the candidate days in policy order, placing at most
//! `per_day_cap` sessions per day per sweep, and repeats the sweep until the
//! requested duration is placed, a sweep places nothing, or [`MAX_SWEEPS`] is
//! reached. Within a day, grid-aligned candidate starts are tried in policy
//! order and the first slot that is free is taken.
//!
//! Output is fully determined by the inputs: day order first, then slot order,
//! both set by [`PlacementOrder`](crate::request::PlacementOrder).

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::conflict::BusyUnion;
use crate::error::Result;
use crate::interval::Interval;
use crate::request::ScheduleRequest;
use crate::schedule::{Outcome, ScheduleResult, StudySession};
use crate::window::{day_windows, DayWindow};

/// Upper bound on full day-by-day sweeps in one allocation call.
pub const MAX_SWEEPS: u32 = 10_000;

/// Place new study sessions around the busy set.
///
/// `busy` is the already-expanded set of commitments; `existing_sessions` are
/// sessions committed by earlier, unrelated runs. Neither needs to be sorted
/// or merged. A candidate slot is rejected if it overlaps anything in `busy`,
/// `existing_sessions`, or the sessions placed earlier in this call.
///
/// Running out of room is not an error: the result reports
/// [`Outcome::Partial`] and the unplaced remainder.
///
/// # Errors
/// Returns the request's validation error (see [`ScheduleRequest::validate`])
/// before doing any placement work.
pub fn allocate(
    busy: &[Interval],
    request: &ScheduleRequest,
    now: DateTime<Utc>,
    existing_sessions: &[Interval],
) -> Result<ScheduleResult> {
    request.validate(now)?;
    Ok(place_sessions(busy, request, now, existing_sessions))
}

/// Placement for a request that has already passed [`ScheduleRequest::validate`].
pub(crate) fn place_sessions(
    busy: &[Interval],
    request: &ScheduleRequest,
    now: DateTime<Utc>,
    existing_sessions: &[Interval],
) -> ScheduleResult {
    let days = day_windows(request, now);
    let mut calendar = BusyUnion::new(busy, existing_sessions);
    let mut remaining = request.total;
    let mut sweeps = 0;

    debug!(
        days = days.len(),
        busy = busy.len(),
        committed = existing_sessions.len(),
        needed = request.sessions_needed(),
        order = ?request.placement_order,
        "starting allocation"
    );

    while remaining > Duration::zero() && sweeps < MAX_SWEEPS {
        sweeps += 1;
        let mut placed_this_sweep = 0;

        for day in &days {
            if remaining <= Duration::zero() {
                break;
            }
            placed_this_sweep += fill_day(day, request, &mut calendar, &mut remaining);
        }

        debug!(
            sweep = sweeps,
            placed = placed_this_sweep,
            remaining_minutes = remaining.num_minutes(),
            "sweep finished"
        );

        if placed_this_sweep == 0 {
            break;
        }
    }

    let label = request.session_label();
    let sessions: Vec<StudySession> = calendar
        .into_placed()
        .into_iter()
        .map(|interval| StudySession {
            label: label.clone(),
            interval,
        })
        .collect();

    let outcome = if remaining > Duration::zero() {
        Outcome::Partial
    } else {
        Outcome::Full
    };
    debug!(
        sessions = sessions.len(),
        sweeps,
        unplaced_minutes = remaining.num_minutes(),
        ?outcome,
        "allocation finished"
    );

    ScheduleResult {
        sessions,
        requested: request.total,
        unplaced: remaining.max(Duration::zero()),
        outcome,
        sweeps,
    }
}

/// Place up to `per_day_cap` sessions in one day window, returning how many
/// were placed.
///
/// Every session is one granularity long except the last, which is shortened
/// to whatever remains.
fn fill_day(
    day: &DayWindow,
    request: &ScheduleRequest,
    calendar: &mut BusyUnion,
    remaining: &mut Duration,
) -> u32 {
    let mut placed_today = 0;

    for start in day.candidates(request.placement_order) {
        if *remaining <= Duration::zero() || placed_today >= request.per_day_cap {
            break;
        }

        let length = request.granularity.min(*remaining);
        let end = start + length;
        if end > day.end {
            continue;
        }
        let Ok(slot) = Interval::new(start, end) else {
            continue;
        };

        if calendar.place(slot) {
            *remaining -= length;
            placed_today += 1;
        }
    }

    placed_today
}
