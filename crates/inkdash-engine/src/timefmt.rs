//! Compact start-time labels for event lines.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Clock convention used for every label in one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockStyle {
    /// `9am`, `12.05am`, `11.30pm`
    #[default]
    TwelveHour,
    /// `09:00`, `00:05`, `23:30`
    TwentyFourHour,
}

impl ClockStyle {
    /// Map the configured `12` / `24` value to a style.
    pub fn from_hours(hours: u32) -> Result<Self> {
        match hours {
            12 => Ok(ClockStyle::TwelveHour),
            24 => Ok(ClockStyle::TwentyFourHour),
            other => Err(EngineError::InvalidClock(other)),
        }
    }

    pub fn hours(self) -> u32 {
        match self {
            ClockStyle::TwelveHour => 12,
            ClockStyle::TwentyFourHour => 24,
        }
    }
}

/// Render the time-of-day of `time` in the given convention.
///
/// 12-hour labels drop the minutes when they are zero and separate them with a
/// dot otherwise: `0:00` is `12am`, `0:05` is `12.05am`, `13:00` is `1pm`.
/// 24-hour labels are always `HH:MM`.
pub fn format_time<T: Timelike>(time: &T, style: ClockStyle) -> String {
    let (hour, minute) = (time.hour(), time.minute());

    match style {
        ClockStyle::TwentyFourHour => format!("{:02}:{:02}", hour, minute),
        ClockStyle::TwelveHour => {
            let minutes = if minute > 0 {
                format!(".{:02}", minute)
            } else {
                String::new()
            };
            let (display_hour, suffix) = match hour {
                0 => (12, "am"),
                12 => (12, "pm"),
                h if h > 12 => (h - 12, "pm"),
                h => (h, "am"),
            };
            format!("{}{}{}", display_hour, minutes, suffix)
        }
    }
}
