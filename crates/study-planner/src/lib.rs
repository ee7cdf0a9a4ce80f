//! # study-planner
//!
//! Deterministic placement of study sessions before a deadline, around an
//! existing calendar.
//!
//! Given a deadline, a total amount of study time, a daily availability window
//! and the calendar's busy events (one-off or weekly), the planner produces
//! non-overlapping sessions that never collide with existing commitments. It
//! is greedy rather than optimal, and reports what it could not place instead
//! of failing.
//!
//! ## Modules
//!
//! - [`expander`]: weekly busy events → concrete intervals up to the deadline
//! - [`allocator`]: multi-pass, per-day-capped session placement
//! - [`planner`]: validate + expand + allocate in one call
//! - [`freebusy`]: free-slot and first-fit gap finding
//! - [`conflict`]: overlap detection and the allocator's busy index
//! - [`window`]: per-day windows and the candidate start grid
//! - [`interval`]: half-open intervals, clamping and merging
//! - [`request`] / [`schedule`]: input parameters and results
//! - [`ical`]: iCalendar export of placed sessions
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use study_planner::{plan, BusyEvent, PlacementOrder, ScheduleRequest};
//!
//! let now = Utc.with_ymd_and_hms(2026, 3, 2, 7, 0, 0).unwrap();
//! let deadline = Utc.with_ymd_and_hms(2026, 3, 4, 18, 0, 0).unwrap();
//! let lecture = BusyEvent::weekly(
//!     Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
//! );
//!
//! let request = ScheduleRequest::new(deadline, Duration::hours(3), PlacementOrder::EarliestFirst);
//! let result = plan(&[lecture], &request, now, &[]).unwrap();
//!
//! assert!(result.is_complete());
//! assert_eq!(result.sessions[0].interval.start(), Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap());
//! assert_eq!(result.status(), "Scheduled 3h across 3 session(s).");
//! ```

pub mod allocator;
pub mod conflict;
pub mod error;
pub mod expander;
pub mod freebusy;
pub mod ical;
pub mod interval;
pub mod planner;
pub mod request;
pub mod schedule;
pub mod window;

pub use allocator::{allocate, MAX_SWEEPS};
pub use conflict::find_conflicts;
pub use error::PlannerError;
pub use expander::{expand, BusyEvent};
pub use freebusy::{find_first_free_slot, find_free_slots, FreeSlot};
pub use interval::Interval;
pub use planner::plan;
pub use request::{PlacementOrder, ScheduleRequest};
pub use schedule::{Outcome, ScheduleResult, StudySession};
