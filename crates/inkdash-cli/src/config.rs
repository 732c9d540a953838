//! Dashboard configuration loaded from a TOML file.
//!
//! Every key is optional; a missing file path means all defaults. Unknown keys
//! are rejected so a typo does not silently fall back to a default.
//!
//! ```toml
//! display_tz = "Europe/Helsinki"
//! num_days = 7
//! display_days = 3
//! time_format = 24
//! max_events_per_day = 8
//! max_total_events = 20
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use inkdash_engine::{ClockStyle, PlanOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashConfig {
    /// IANA zone used to capture "now" and "today".
    pub display_tz: String,
    /// Days of events to bucket, starting today.
    pub num_days: usize,
    /// Day columns on the dashboard (1 to 3).
    pub display_days: usize,
    /// 12 or 24.
    pub time_format: u32,
    pub max_events_per_day: usize,
    pub max_total_events: usize,
}

impl Default for DashConfig {
    fn default() -> Self {
        let options = PlanOptions::default();
        Self {
            display_tz: "UTC".to_string(),
            num_days: options.num_days,
            display_days: options.display_days,
            time_format: options.clock.hours(),
            max_events_per_day: options.max_events_per_day,
            max_total_events: options.max_total_events,
        }
    }
}

impl DashConfig {
    /// Load from `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                Self::from_toml(&content)
                    .with_context(|| format!("Invalid config: {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.display_tz
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown timezone: '{}'", self.display_tz))
    }

    /// Engine options for one render cycle, checked for consistency.
    pub fn plan_options(&self) -> Result<PlanOptions> {
        let options = PlanOptions {
            num_days: self.num_days,
            display_days: self.display_days,
            clock: ClockStyle::from_hours(self.time_format)?,
            max_events_per_day: self.max_events_per_day,
            max_total_events: self.max_total_events,
        };
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = DashConfig::from_toml("").unwrap();
        assert_eq!(config, DashConfig::default());
        assert_eq!(config.plan_options().unwrap(), PlanOptions::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = DashConfig::from_toml("time_format = 24\ndisplay_days = 2\n").unwrap();
        let options = config.plan_options().unwrap();
        assert_eq!(options.clock, ClockStyle::TwentyFourHour);
        assert_eq!(options.display_days, 2);
        assert_eq!(options.num_days, 7);
    }

    #[test]
    fn misspelled_key_is_rejected() {
        assert!(DashConfig::from_toml("max_events_per_dya = 3\n").is_err());
    }

    #[test]
    fn bad_values_fail_validation() {
        let config = DashConfig::from_toml("time_format = 13\n").unwrap();
        assert!(config.plan_options().is_err());

        let config = DashConfig::from_toml("display_days = 5\n").unwrap();
        assert!(config.plan_options().is_err());
    }

    #[test]
    fn timezone_is_parsed() {
        let config = DashConfig::from_toml("display_tz = \"Asia/Singapore\"\n").unwrap();
        assert_eq!(config.timezone().unwrap(), chrono_tz::Asia::Singapore);

        let config = DashConfig::from_toml("display_tz = \"Mars/Olympus\"\n").unwrap();
        assert!(config.timezone().is_err());
    }
}
