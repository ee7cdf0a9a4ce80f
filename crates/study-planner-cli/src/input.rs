//! JSON input documents for each subcommand, and their conversion into
//! library types.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use study_planner::request::{
    parse_timezone, DEFAULT_DAY_WINDOW_END, DEFAULT_DAY_WINDOW_START, DEFAULT_PER_DAY_CAP,
    DEFAULT_SUBJECT,
};
use study_planner::{
    BusyEvent, Interval, Outcome, PlacementOrder, ScheduleRequest, ScheduleResult, StudySession,
};

use crate::config::Settings;

/// Input for `study-plan plan`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanInput {
    #[serde(default)]
    pub subject: Option<String>,
    pub deadline: DateTime<Utc>,
    pub total_hours: f64,
    #[serde(default)]
    pub day_start_hour: Option<u32>,
    #[serde(default)]
    pub day_end_hour: Option<u32>,
    #[serde(default)]
    pub session_hours: Option<f64>,
    #[serde(default)]
    pub per_day_cap: Option<u32>,
    #[serde(default)]
    pub placement_order: Option<PlacementOrder>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub events: Vec<BusyEvent>,
    #[serde(default)]
    pub existing_sessions: Vec<Interval>,
}

impl PlanInput {
    /// Build the library request.
    ///
    /// Each field is taken from the first source that has it: the `--order`
    /// flag (placement order only), this input, the settings file, then the
    /// built-in default. The placement order has no built-in default.
    pub fn to_request(
        &self,
        settings: &Settings,
        order_flag: Option<PlacementOrder>,
    ) -> Result<ScheduleRequest> {
        let Some(order) = order_flag
            .or(self.placement_order)
            .or(settings.placement_order)
        else {
            bail!(
                "No placement order given: set placement_order in the input or config file, or pass --order earliest-first|latest-first"
            );
        };

        let total = hours_to_duration(self.total_hours).context("Invalid total_hours")?;
        let mut request = ScheduleRequest::new(self.deadline, total, order)
            .with_day_window(
                self.day_start_hour
                    .or(settings.day_start_hour)
                    .unwrap_or(DEFAULT_DAY_WINDOW_START),
                self.day_end_hour
                    .or(settings.day_end_hour)
                    .unwrap_or(DEFAULT_DAY_WINDOW_END),
            )
            .with_per_day_cap(
                self.per_day_cap
                    .or(settings.per_day_cap)
                    .unwrap_or(DEFAULT_PER_DAY_CAP),
            )
            .with_subject(
                self.subject
                    .clone()
                    .or_else(|| settings.subject.clone())
                    .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            );

        if let Some(hours) = self.session_hours.or(settings.session_hours) {
            request = request
                .with_granularity(hours_to_duration(hours).context("Invalid session_hours")?);
        }
        if let Some(name) = self.timezone.as_deref().or(settings.timezone.as_deref()) {
            request = request.with_timezone(parse_timezone(name)?);
        }

        Ok(request)
    }
}

/// Input for `study-plan expand`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpandInput {
    pub events: Vec<BusyEvent>,
}

/// Input for `study-plan gaps`.
#[derive(Debug, Clone, Deserialize)]
pub struct GapsInput {
    pub busy: Vec<Interval>,
}

/// Largest minute count accepted from input, well inside `Duration`'s range.
const MAX_MINUTES: i64 = i64::MAX / 60_000;

/// Convert fractional hours (e.g. `0.25`) into a whole number of minutes.
pub fn hours_to_duration(hours: f64) -> Result<Duration> {
    let minutes = hours * 60.0;
    if !minutes.is_finite() {
        bail!("hours must be a finite number, got {}", hours);
    }
    let whole = minutes.round();
    if (minutes - whole).abs() > 1e-6 {
        bail!("{}h is not a whole number of minutes", hours);
    }
    if whole.abs() > MAX_MINUTES as f64 {
        bail!("{}h is out of range", hours);
    }
    Duration::try_minutes(whole as i64).with_context(|| format!("{}h is out of range", hours))
}

/// JSON report written by `study-plan plan --format json`.
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub status: String,
    pub outcome: Outcome,
    pub scheduled_minutes: i64,
    pub unplaced_minutes: i64,
    pub sweeps: u32,
    pub sessions: &'a [StudySession],
}

impl<'a> From<&'a ScheduleResult> for PlanReport<'a> {
    fn from(result: &'a ScheduleResult) -> Self {
        PlanReport {
            status: result.status(),
            outcome: result.outcome,
            scheduled_minutes: result.scheduled().num_minutes(),
            unplaced_minutes: result.unplaced.num_minutes(),
            sweeps: result.sweeps,
            sessions: &result.sessions,
        }
    }
}
