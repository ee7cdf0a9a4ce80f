//! One-call planning: validate, expand recurrences, allocate.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::allocator::place_sessions;
use crate::error::Result;
use crate::expander::{expand, BusyEvent};
use crate::interval::Interval;
use crate::request::ScheduleRequest;
use crate::schedule::ScheduleResult;

/// Plan study sessions for `request` around raw calendar events.
///
/// Runs the request checks first so no expansion work is done for a request
/// that would be rejected, then expands weekly events between `now` and the
/// deadline and places sessions around the flat busy set the same way
/// [`allocate`](crate::allocator::allocate) does, without checking the request
/// a second time.
///
/// # Errors
/// Returns a validation error for a bad request, or
/// [`PlannerError::InvalidInterval`](crate::PlannerError::InvalidInterval) for
/// a malformed event. Capacity shortfall is reported in the result, not as an
/// error.
pub fn plan(
    events: &[BusyEvent],
    request: &ScheduleRequest,
    now: DateTime<Utc>,
    existing_sessions: &[Interval],
) -> Result<ScheduleResult> {
    request.validate(now)?;
    let busy = expand(events, now, request.deadline)?;
    let result = place_sessions(&busy, request, now, existing_sessions);

    info!(
        sessions = result.sessions.len(),
        scheduled_minutes = result.scheduled().num_minutes(),
        unplaced_minutes = result.unplaced.num_minutes(),
        outcome = ?result.outcome,
        "planned study sessions"
    );
    Ok(result)
}
