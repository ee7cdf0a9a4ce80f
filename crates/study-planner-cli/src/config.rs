//! Optional TOML settings supplying defaults for plan requests.
//!
//! ```toml
//! subject = "Calculus Midterm"
//! day_start_hour = 9
//! day_end_hour = 21
//! session_hours = 0.5
//! per_day_cap = 3
//! placement_order = "latest_first"
//! timezone = "Europe/Berlin"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use study_planner::PlacementOrder;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub subject: Option<String>,
    pub day_start_hour: Option<u32>,
    pub day_end_hour: Option<u32>,
    pub session_hours: Option<f64>,
    pub per_day_cap: Option<u32>,
    pub placement_order: Option<PlacementOrder>,
    pub timezone: Option<String>,
}

impl Settings {
    /// Load settings from `path`, or return empty settings when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let settings: Settings = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_fields() {
        let settings: Settings = toml::from_str(
            r#"
            subject = "Physics"
            day_start_hour = 9
            day_end_hour = 21
            session_hours = 0.5
            per_day_cap = 3
            placement_order = "earliest_first"
            timezone = "Asia/Tokyo"
            "#,
        )
        .unwrap();

        assert_eq!(settings.subject.as_deref(), Some("Physics"));
        assert_eq!(settings.session_hours, Some(0.5));
        assert_eq!(settings.placement_order, Some(PlacementOrder::EarliestFirst));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Settings>("day_start = 9").is_err());
    }

    #[test]
    fn missing_file_path_means_defaults() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }
}
