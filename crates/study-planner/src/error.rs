//! Error types for study-planner operations.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("deadline must be in the future (deadline {deadline}, now {now})")]
    DeadlineNotInFuture {
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error("total study time must be greater than 0")]
    NonPositiveDuration,

    #[error("total study time must be a whole number of minutes, got {0}")]
    FractionalDuration(Duration),

    #[error("day end hour must be after start hour (window {start}..{end}, hours 0-24)")]
    InvalidDayWindow { start: u32, end: u32 },

    #[error("session length must be a whole number of minutes between 1 minute and 24 hours, got {0}")]
    InvalidGranularity(Duration),

    #[error("per-day session cap must be at least 1")]
    InvalidPerDayCap,

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
