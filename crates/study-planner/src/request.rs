//! Scheduling parameters and their validation.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Which end of the available time the allocator fills first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementOrder {
    /// Visit days from today forward; within a day, scan from the window
    /// start toward its end.
    EarliestFirst,
    /// Visit days from the deadline backward; within a day, scan from the
    /// window end toward its start.
    LatestFirst,
}

impl std::str::FromStr for PlacementOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "earliest_first" | "earliest" => Ok(PlacementOrder::EarliestFirst),
            "latest_first" | "latest" => Ok(PlacementOrder::LatestFirst),
            other => Err(format!(
                "unknown placement order '{}': expected earliest-first or latest-first",
                other
            )),
        }
    }
}

pub const DEFAULT_DAY_WINDOW_START: u32 = 8;
pub const DEFAULT_DAY_WINDOW_END: u32 = 22;
pub const DEFAULT_PER_DAY_CAP: u32 = 2;
pub const DEFAULT_SUBJECT: &str = "Exam";

/// Everything the allocator needs besides the busy set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Sessions end no later than this instant.
    pub deadline: DateTime<Utc>,
    /// Total study time to place.
    #[serde(rename = "total_minutes", with = "minutes")]
    pub total: Duration,
    /// First hour of the daily window (local to `timezone`).
    pub day_window_start: u32,
    /// Hour the daily window closes (exclusive, `24` means midnight).
    pub day_window_end: u32,
    /// Length of one session and the step between candidate starts.
    #[serde(rename = "granularity_minutes", with = "minutes")]
    pub granularity: Duration,
    /// Maximum sessions placed on one day during a single sweep.
    pub per_day_cap: u32,
    pub placement_order: PlacementOrder,
    /// Zone in which day boundaries and the daily window are interpreted.
    pub timezone: Tz,
    /// Used to label sessions, e.g. "Study: Calculus Midterm".
    pub subject: String,
}

impl ScheduleRequest {
    /// A request with the default window (08-22), one-hour sessions, two
    /// sessions per day, UTC day boundaries and the subject "Exam".
    pub fn new(deadline: DateTime<Utc>, total: Duration, placement_order: PlacementOrder) -> Self {
        Self {
            deadline,
            total,
            day_window_start: DEFAULT_DAY_WINDOW_START,
            day_window_end: DEFAULT_DAY_WINDOW_END,
            granularity: Duration::hours(1),
            per_day_cap: DEFAULT_PER_DAY_CAP,
            placement_order,
            timezone: Tz::UTC,
            subject: DEFAULT_SUBJECT.to_string(),
        }
    }

    pub fn with_day_window(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.day_window_start = start_hour;
        self.day_window_end = end_hour;
        self
    }

    pub fn with_granularity(mut self, granularity: Duration) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_per_day_cap(mut self, cap: u32) -> Self {
        self.per_day_cap = cap;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Label attached to every session this request produces.
    pub fn session_label(&self) -> String {
        format!("Study: {}", self.subject)
    }

    /// `ceil(total / granularity)`.
    pub fn sessions_needed(&self) -> i64 {
        let total = self.total.num_minutes();
        let step = self.granularity.num_minutes().max(1);
        (total + step - 1) / step
    }

    /// Check every rule before any allocation work happens.
    ///
    /// # Errors
    /// Returns the first violated rule, in this order: deadline, total
    /// duration, day window, granularity, per-day cap.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<()> {
        if self.deadline <= now {
            return Err(PlannerError::DeadlineNotInFuture {
                deadline: self.deadline,
                now,
            });
        }
        if self.total <= Duration::zero() {
            return Err(PlannerError::NonPositiveDuration);
        }
        if !is_whole_minutes(self.total) {
            return Err(PlannerError::FractionalDuration(self.total));
        }
        if self.day_window_start >= self.day_window_end || self.day_window_end > 24 {
            return Err(PlannerError::InvalidDayWindow {
                start: self.day_window_start,
                end: self.day_window_end,
            });
        }
        if self.granularity <= Duration::zero()
            || self.granularity > Duration::days(1)
            || !is_whole_minutes(self.granularity)
        {
            return Err(PlannerError::InvalidGranularity(self.granularity));
        }
        if self.per_day_cap == 0 {
            return Err(PlannerError::InvalidPerDayCap);
        }
        Ok(())
    }
}

fn is_whole_minutes(d: Duration) -> bool {
    d == Duration::minutes(d.num_minutes())
}

/// Parse an IANA timezone name.
///
/// # Errors
/// Returns [`PlannerError::InvalidTimezone`] if the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| PlannerError::InvalidTimezone(name.to_string()))
}

/// Serde adapter storing a [`Duration`] as a whole number of minutes.
pub mod minutes {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_minutes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        i64::deserialize(d).map(Duration::minutes)
    }
}
