//! Drop events that have already elapsed relative to a reference instant.
//!
//! All-day and multi-day events are judged by calendar date, timed single-day
//! events by instant:
//!
//! - a multi-day event is kept until its end *date* is strictly before the
//!   date of `now`, so an event running "yesterday through today" stays up for
//!   the whole of today even after its end time has passed
//! - a single-day all-day event is always kept (the bucket assigner decides
//!   whether it falls inside the window)
//! - a timed single-day event is kept only while `end > now`; an event ending
//!   exactly at `now` is gone

use chrono::{DateTime, FixedOffset};
use tracing::{debug, info};

use crate::event::Event;

/// Whether `event` should still be shown at `now`.
pub fn is_still_relevant(event: &Event, now: DateTime<FixedOffset>) -> bool {
    if event.allday || event.is_multiday {
        !(event.is_multiday && event.end_date() < now.date_naive())
    } else {
        event.end > now
    }
}

/// Return the events that have not fully elapsed at `now`, in input order.
///
/// `now` must be captured once per render cycle by the caller and use the same
/// zone convention as the event timestamps.
pub fn filter_past_events(events: &[Event], now: DateTime<FixedOffset>) -> Vec<Event> {
    let kept: Vec<Event> = events
        .iter()
        .filter(|event| {
            let keep = is_still_relevant(event, now);
            if !keep {
                if event.is_multiday {
                    debug!("Skipping past multi-day event: {}", event.summary);
                } else {
                    debug!(
                        "Skipping past event: {} (ended at {})",
                        event.summary, event.end
                    );
                }
            }
            keep
        })
        .cloned()
        .collect();

    info!(
        "Filtered {} past events at {}",
        events.len() - kept.len(),
        now
    );

    kept
}
