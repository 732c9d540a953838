//! # inkdash-engine
//!
//! Event normalization and multi-day bucketing for an e-ink calendar dashboard.
//!
//! Given the events a calendar provider returned for the next few days, the
//! engine decides which ones are still worth showing at a given instant, which
//! day panels each one belongs on, and how the panels are laid out. Everything
//! is a pure function of its inputs: the caller captures "now" and "today"
//! once per render cycle and passes them in.
//!
//! ## Modules
//!
//! - [`event`] — provider records → validated [`Event`] values
//! - [`filter`] — drop events that already elapsed
//! - [`bucket`] — spread events over the day window, clipping multi-day spans
//! - [`timefmt`] — `9.30am` / `09:30` start-time labels
//! - [`layout`] — column widths and visibility for 1–3 displayed days
//! - [`plan`] — the whole cycle, producing the renderer's input
//! - [`error`] — Error types

pub mod bucket;
pub mod error;
pub mod event;
pub mod filter;
pub mod layout;
pub mod plan;
pub mod timefmt;

pub use bucket::{assign_to_days, DayBuckets};
pub use error::EngineError;
pub use event::{normalize, normalize_all, Event, RawEvent};
pub use filter::{filter_past_events, is_still_relevant};
pub use layout::{select_layout, Layout};
pub use plan::{build_plan, DashboardPlan, DayColumn, EventLine, PlanOptions};
pub use timefmt::{format_time, ClockStyle};
