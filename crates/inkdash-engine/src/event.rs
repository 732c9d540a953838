//! Event normalization -- provider records into validated [`Event`] values.
//!
//! The calendar provider hands over loosely-typed records where any field may
//! be missing. [`normalize`] validates one record and classifies it as all-day,
//! single-day timed, or multi-day. [`normalize_all`] does the same for a batch,
//! skipping (and logging) records that cannot be used so a single bad event
//! never aborts a render cycle.
//!
//! Timestamps are taken as already localized: dates are read in the offset the
//! provider attached, no zone conversion happens here.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, Result};

/// An event as delivered by the calendar provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub summary: Option<String>,
    pub start_datetime: Option<DateTime<FixedOffset>>,
    pub end_datetime: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub allday: bool,
    /// Precomputed by some providers from the date span. Derived when absent.
    pub is_multiday: Option<bool>,
}

/// A normalized calendar event.
///
/// Invariants (upheld by [`normalize`]):
/// - `summary` is non-empty
/// - `end >= start`, except for all-day events, whose provider end date may
///   precede the start; such an event shows on its start date only
/// - `is_multiday` implies `end.date_naive() > start.date_naive()`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub summary: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub allday: bool,
    pub is_multiday: bool,
}

impl Event {
    /// Local calendar date the event starts on.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Local calendar date the event ends on.
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// True for events with a meaningful time-of-day that fit on one date.
    pub fn is_timed_single_day(&self) -> bool {
        !self.allday && !self.is_multiday
    }
}

/// Validate and classify a single provider record.
///
/// An end instant exactly at midnight (and after the start) is pulled back one
/// nanosecond to the last instant of the previous date. Providers report
/// all-day events with exclusive end dates, so a one-day event on June 10
/// arrives ending at June 11 00:00; after the adjustment it ends on June 10 and
/// stays single-day. A timed event running until midnight keeps counting as in
/// progress right up to it.
///
/// # Errors
/// Returns `EngineError::MalformedEvent` when the summary is missing or blank,
/// either timestamp is missing, a timed event ends before it starts, an all-day
/// event does not start at midnight, or the provider flags an event as
/// multi-day although it covers a single date.
pub fn normalize(raw: &RawEvent) -> Result<Event> {
    let summary = raw
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| EngineError::malformed(None, "missing summary"))?;

    let start = raw
        .start_datetime
        .ok_or_else(|| EngineError::malformed(Some(summary), "missing start time"))?;
    let end = raw
        .end_datetime
        .ok_or_else(|| EngineError::malformed(Some(summary), "missing end time"))?;

    if !raw.allday && end < start {
        return Err(EngineError::malformed(
            Some(summary),
            format!("ends at {} before it starts at {}", end, start),
        ));
    }

    if raw.allday && start.time() != NaiveTime::MIN {
        return Err(EngineError::malformed(
            Some(summary),
            format!("all-day event starts at {} instead of midnight", start.time()),
        ));
    }

    let end = pull_back_midnight_end(start, end);
    let spans_dates = end.date_naive() > start.date_naive();

    let is_multiday = match raw.is_multiday {
        Some(true) if !spans_dates => {
            return Err(EngineError::malformed(
                Some(summary),
                "flagged multi-day but covers a single date",
            ));
        }
        Some(flag) => flag,
        None => spans_dates,
    };

    Ok(Event {
        summary: summary.to_string(),
        start,
        end,
        allday: raw.allday,
        is_multiday,
    })
}

/// Normalize a batch, dropping malformed records.
///
/// Output order follows input order.
pub fn normalize_all(raws: &[RawEvent]) -> Vec<Event> {
    raws.iter()
        .filter_map(|raw| match normalize(raw) {
            Ok(event) => Some(event),
            Err(err) => {
                warn!("Skipping event: {}", err);
                None
            }
        })
        .collect()
}

fn pull_back_midnight_end(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> DateTime<FixedOffset> {
    if end > start && end.time() == NaiveTime::MIN {
        end - Duration::nanoseconds(1)
    } else {
        end
    }
}
