//! Assign events to the day slots of a fixed display window.
//!
//! The window covers `num_days` consecutive dates starting at an anchor date.
//! Bucket `k` holds the events shown on `anchor + k` days. Single-day events
//! land in the bucket of their start date; multi-day events are spread over
//! every date they cover, clipped to the window.

use chrono::{Duration, NaiveDate};

use crate::error::{EngineError, Result};
use crate::event::Event;

/// A fixed-size window of day buckets.
///
/// `day(k)` is the bucket for `anchor() + k` days. The number of buckets is set
/// at construction and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBuckets<'a> {
    anchor: NaiveDate,
    buckets: Box<[Vec<&'a Event>]>,
}

impl<'a> DayBuckets<'a> {
    fn empty(anchor: NaiveDate, num_days: usize) -> Self {
        Self {
            anchor,
            buckets: vec![Vec::new(); num_days].into_boxed_slice(),
        }
    }

    /// The date of bucket 0.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Number of buckets (always the `num_days` the window was built with).
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Events in bucket `k`, in input order.
    pub fn day(&self, k: usize) -> Option<&[&'a Event]> {
        self.buckets.get(k).map(Vec::as_slice)
    }

    /// Iterate `(date, events)` pairs from the anchor onwards.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[&'a Event])> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .map(move |(k, events)| {
                (self.anchor + Duration::days(k as i64), events.as_slice())
            })
    }

    /// Sum of bucket sizes. A multi-day event counts once per bucket.
    pub fn total_placements(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Bucket sizes in window order.
    pub fn sizes(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }
}

/// Signed offset, in days, of `date` from `anchor`.
fn day_index(anchor: NaiveDate, date: NaiveDate) -> i64 {
    (date - anchor).num_days()
}

/// Place each event into the buckets of the window `[anchor, anchor + num_days)`.
///
/// - single-day events go into the bucket of their start date, or nowhere if
///   that date is outside the window
/// - multi-day events go into every bucket from their start date through their
///   end date, with both ends clipped to the window; a span lying entirely
///   outside the window is placed nowhere
///
/// Within a bucket, events keep the order of `events`. Callers wanting
/// chronological buckets must sort the input first.
///
/// # Errors
/// Returns `EngineError::InvalidWindow` if `num_days` is zero.
pub fn assign_to_days(
    events: &[Event],
    anchor: NaiveDate,
    num_days: usize,
) -> Result<DayBuckets<'_>> {
    if num_days == 0 {
        return Err(EngineError::InvalidWindow(
            "window must cover at least one day".to_string(),
        ));
    }

    let mut window = DayBuckets::empty(anchor, num_days);
    let last = num_days as i64 - 1;

    for event in events {
        let start_idx = day_index(anchor, event.start_date());

        if event.is_multiday {
            let end_idx = day_index(anchor, event.end_date());
            let from = start_idx.max(0);
            let to = end_idx.min(last);
            // Empty when the whole span is before or after the window.
            for k in from..=to {
                window.buckets[k as usize].push(event);
            }
        } else if (0..=last).contains(&start_idx) {
            window.buckets[start_idx as usize].push(event);
        }
    }

    Ok(window)
}
