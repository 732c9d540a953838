//! One render cycle: provider events in, typed renderer input out.
//!
//! [`build_plan`] chains the engine stages in order:
//!
//! 1. normalize provider records, skipping malformed ones
//! 2. drop events that elapsed before `now`
//! 3. stable-sort by start time and keep at most `max_total_events`
//! 4. assign to the day window anchored at the caller's "today"
//! 5. turn the leading `display_days` buckets into columns of labelled lines,
//!    capped at `max_events_per_day` each
//!
//! The result carries everything the template needs as named fields, so a
//! missing or misspelled parameter is a compile error rather than a broken
//! page.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use serde::Serialize;
use tracing::info;

use crate::bucket::assign_to_days;
use crate::error::{EngineError, Result};
use crate::event::{normalize_all, Event, RawEvent};
use crate::filter::filter_past_events;
use crate::layout::{select_layout, Layout};
use crate::timefmt::{format_time, ClockStyle};

/// Knobs for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    /// Days in the bucket window, starting at the anchor date.
    pub num_days: usize,
    /// Leading days turned into columns (1 to 3).
    pub display_days: usize,
    pub clock: ClockStyle,
    pub max_events_per_day: usize,
    pub max_total_events: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            num_days: 7,
            display_days: 3,
            clock: ClockStyle::TwelveHour,
            max_events_per_day: 8,
            max_total_events: 20,
        }
    }
}

impl PlanOptions {
    /// Check the options against each other and return the matching layout.
    pub fn validate(&self) -> Result<Layout> {
        if self.num_days == 0 {
            return Err(EngineError::InvalidWindow(
                "num_days must be at least 1".to_string(),
            ));
        }
        let layout = select_layout(self.display_days)?;
        if self.display_days > self.num_days {
            return Err(EngineError::InvalidWindow(format!(
                "cannot display {} days from a {}-day window",
                self.display_days, self.num_days
            )));
        }
        if self.max_events_per_day == 0 {
            return Err(EngineError::InvalidLimit(
                "max_events_per_day must be at least 1".to_string(),
            ));
        }
        if self.max_total_events == 0 {
            return Err(EngineError::InvalidLimit(
                "max_total_events must be at least 1".to_string(),
            ));
        }
        Ok(layout)
    }
}

/// Date banner for the anchor day, e.g. `10` / `June` / `Monday`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateHeader {
    pub day: u32,
    pub month: String,
    pub weekday: String,
}

impl DateHeader {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.format("%B").to_string(),
            weekday: date.format("%A").to_string(),
        }
    }
}

/// One event as it appears in a day column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventLine {
    pub summary: String,
    /// Start time label; `None` for all-day and multi-day events.
    pub time_label: Option<String>,
}

impl EventLine {
    pub fn new(event: &Event, clock: ClockStyle) -> Self {
        let time_label = event
            .is_timed_single_day()
            .then(|| format_time(&event.start, clock));
        Self {
            summary: event.summary.clone(),
            time_label,
        }
    }
}

/// A displayed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub weekday: String,
    pub lines: Vec<EventLine>,
    /// Events in the bucket that did not fit under the per-day cap.
    pub hidden: usize,
}

/// How many events survived each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlanStats {
    pub received: usize,
    pub malformed: usize,
    pub elapsed: usize,
    pub over_limit: usize,
    pub retained: usize,
}

/// Renderer input for one dashboard image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardPlan {
    pub header: DateHeader,
    pub layout: Layout,
    /// `""` or `"hidden"`, straight into the column's class attribute.
    pub tomorrow_class: &'static str,
    pub day_after_class: &'static str,
    pub clock: ClockStyle,
    pub columns: Vec<DayColumn>,
    /// Event count of every bucket in the window, displayed or not.
    pub window: Vec<usize>,
    pub stats: PlanStats,
}

/// Run the full pipeline for one render cycle.
///
/// `anchor` is the caller's "today" and `now` the instant captured at the
/// start of the cycle; neither is read from the clock here.
///
/// # Errors
/// Only invalid `options` fail the cycle. Malformed events are skipped.
pub fn build_plan(
    raws: &[RawEvent],
    options: &PlanOptions,
    anchor: NaiveDate,
    now: DateTime<FixedOffset>,
) -> Result<DashboardPlan> {
    let layout = options.validate()?;

    let events = normalize_all(raws);
    let normalized = events.len();

    let mut current = filter_past_events(&events, now);
    let elapsed = normalized - current.len();

    current.sort_by_key(|event| event.start);
    let over_limit = current.len().saturating_sub(options.max_total_events);
    current.truncate(options.max_total_events);

    let buckets = assign_to_days(&current, anchor, options.num_days)?;

    let columns: Vec<DayColumn> = buckets
        .iter()
        .take(options.display_days)
        .map(|(date, events)| DayColumn {
            date,
            weekday: date.format("%A").to_string(),
            lines: events
                .iter()
                .take(options.max_events_per_day)
                .map(|event| EventLine::new(event, options.clock))
                .collect(),
            hidden: events.len().saturating_sub(options.max_events_per_day),
        })
        .collect();

    let stats = PlanStats {
        received: raws.len(),
        malformed: raws.len() - normalized,
        elapsed,
        over_limit,
        retained: current.len(),
    };
    info!(
        "Planned {} day(s) from {} event(s): {} malformed, {} elapsed, {} over limit",
        columns.len(),
        stats.received,
        stats.malformed,
        stats.elapsed,
        stats.over_limit
    );

    Ok(DashboardPlan {
        header: DateHeader::for_date(anchor),
        tomorrow_class: layout.tomorrow_class(),
        day_after_class: layout.day_after_class(),
        layout,
        clock: options.clock,
        columns,
        window: buckets.sizes(),
        stats,
    })
}
