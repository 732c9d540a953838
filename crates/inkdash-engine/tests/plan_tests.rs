//! Tests for the full render-cycle pipeline.

use chrono::{DateTime, FixedOffset, NaiveDate};
use inkdash_engine::error::EngineError;
use inkdash_engine::event::RawEvent;
use inkdash_engine::plan::{build_plan, EventLine, PlanOptions};
use inkdash_engine::timefmt::ClockStyle;

fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn raw(summary: &str, start: &str, end: &str, allday: bool) -> RawEvent {
    RawEvent {
        summary: Some(summary.to_string()),
        start_datetime: Some(at(start)),
        end_datetime: Some(at(end)),
        allday,
        is_multiday: None,
    }
}

fn line(summary: &str, time_label: Option<&str>) -> EventLine {
    EventLine {
        summary: summary.to_string(),
        time_label: time_label.map(str::to_string),
    }
}

fn options(num_days: usize, display_days: usize) -> PlanOptions {
    PlanOptions {
        num_days,
        display_days,
        ..PlanOptions::default()
    }
}

#[test]
fn default_options_match_dashboard_defaults() {
    let opts = PlanOptions::default();
    assert_eq!(opts.num_days, 7);
    assert_eq!(opts.display_days, 3);
    assert_eq!(opts.clock, ClockStyle::TwelveHour);
    assert_eq!(opts.max_events_per_day, 8);
    assert_eq!(opts.max_total_events, 20);
    assert!(opts.validate().is_ok());
}

#[test]
fn invalid_options_fail_the_cycle() {
    let now = at("2024-06-10T08:00:00+00:00");
    let today = date(2024, 6, 10);

    let err = build_plan(&[], &options(0, 1), today, now).unwrap_err();
    assert!(matches!(err, EngineError::InvalidWindow(_)));

    let err = build_plan(&[], &options(7, 4), today, now).unwrap_err();
    assert_eq!(err, EngineError::InvalidLayout(4));

    let err = build_plan(&[], &options(2, 3), today, now).unwrap_err();
    assert!(matches!(err, EngineError::InvalidWindow(_)));

    let capped = PlanOptions {
        max_events_per_day: 0,
        ..PlanOptions::default()
    };
    let err = build_plan(&[], &capped, today, now).unwrap_err();
    assert!(matches!(err, EngineError::InvalidLimit(_)));
}

#[test]
fn no_events_give_empty_columns() {
    let plan = build_plan(
        &[],
        &PlanOptions::default(),
        date(2024, 6, 10),
        at("2024-06-10T08:00:00+00:00"),
    )
    .unwrap();

    assert_eq!(plan.columns.len(), 3);
    assert!(plan.columns.iter().all(|c| c.lines.is_empty() && c.hidden == 0));
    assert_eq!(plan.window, vec![0; 7]);
    assert_eq!(plan.stats.received, 0);
}

#[test]
fn header_and_columns_are_dated_from_the_anchor() {
    let plan = build_plan(
        &[],
        &options(3, 3),
        date(2024, 6, 10),
        at("2024-06-10T08:00:00+00:00"),
    )
    .unwrap();

    assert_eq!(plan.header.day, 10);
    assert_eq!(plan.header.month, "June");
    assert_eq!(plan.header.weekday, "Monday");

    let weekdays: Vec<&str> = plan.columns.iter().map(|c| c.weekday.as_str()).collect();
    assert_eq!(weekdays, vec!["Monday", "Tuesday", "Wednesday"]);
    assert_eq!(plan.columns[2].date, date(2024, 6, 12));
}

#[test]
fn end_to_end_cycle() {
    let raws = vec![
        raw(
            "Lunch",
            "2024-06-10T12:30:00+00:00",
            "2024-06-10T13:30:00+00:00",
            false,
        ),
        raw(
            "Trip",
            "2024-06-09T10:00:00+00:00",
            "2024-06-11T10:00:00+00:00",
            false,
        ),
        raw(
            "Breakfast",
            "2024-06-10T07:00:00+00:00",
            "2024-06-10T08:00:00+00:00",
            false,
        ),
        raw(
            "Bank holiday",
            "2024-06-11T00:00:00+00:00",
            "2024-06-12T00:00:00+00:00",
            true,
        ),
        raw(
            "Dentist",
            "2024-06-12T09:00:00+00:00",
            "2024-06-12T09:30:00+00:00",
            false,
        ),
        RawEvent::default(),
    ];

    let plan = build_plan(
        &raws,
        &options(3, 3),
        date(2024, 6, 10),
        at("2024-06-10T08:00:00+00:00"),
    )
    .unwrap();

    assert_eq!(plan.stats.received, 6);
    assert_eq!(plan.stats.malformed, 1);
    assert_eq!(plan.stats.elapsed, 1, "breakfast ended exactly at now");
    assert_eq!(plan.stats.retained, 4);

    assert_eq!(
        plan.columns[0].lines,
        vec![line("Trip", None), line("Lunch", Some("12.30pm"))]
    );
    assert_eq!(
        plan.columns[1].lines,
        vec![line("Trip", None), line("Bank holiday", None)]
    );
    assert_eq!(plan.columns[2].lines, vec![line("Dentist", Some("9am"))]);
    assert_eq!(plan.window, vec![2, 2, 1]);
}

#[test]
fn twenty_four_hour_labels() {
    let raws = vec![raw(
        "Call",
        "2024-06-10T09:05:00+00:00",
        "2024-06-10T09:30:00+00:00",
        false,
    )];
    let opts = PlanOptions {
        clock: ClockStyle::TwentyFourHour,
        ..options(1, 1)
    };

    let plan = build_plan(&raws, &opts, date(2024, 6, 10), at("2024-06-10T08:00:00+00:00"))
        .unwrap();

    assert_eq!(plan.columns[0].lines, vec![line("Call", Some("09:05"))]);
    assert_eq!(plan.clock, ClockStyle::TwentyFourHour);
}

#[test]
fn per_day_cap_reports_hidden_events() {
    let raws: Vec<RawEvent> = (0..5)
        .map(|i| {
            raw(
                &format!("Meeting {}", i),
                &format!("2024-06-10T1{}:00:00+00:00", i),
                &format!("2024-06-10T1{}:30:00+00:00", i),
                false,
            )
        })
        .collect();
    let opts = PlanOptions {
        max_events_per_day: 3,
        ..options(1, 1)
    };

    let plan = build_plan(&raws, &opts, date(2024, 6, 10), at("2024-06-10T08:00:00+00:00"))
        .unwrap();

    let column = &plan.columns[0];
    assert_eq!(column.lines.len(), 3);
    assert_eq!(column.hidden, 2);
    assert_eq!(column.lines[0].summary, "Meeting 0");
    assert_eq!(plan.window, vec![5]);
}

#[test]
fn total_cap_keeps_the_earliest_events() {
    // Given out of order; the pipeline sorts before capping.
    let raws = vec![
        raw(
            "Third",
            "2024-06-12T09:00:00+00:00",
            "2024-06-12T10:00:00+00:00",
            false,
        ),
        raw(
            "First",
            "2024-06-10T09:00:00+00:00",
            "2024-06-10T10:00:00+00:00",
            false,
        ),
        raw(
            "Second",
            "2024-06-11T09:00:00+00:00",
            "2024-06-11T10:00:00+00:00",
            false,
        ),
    ];
    let opts = PlanOptions {
        max_total_events: 2,
        ..options(3, 3)
    };

    let plan = build_plan(&raws, &opts, date(2024, 6, 10), at("2024-06-10T08:00:00+00:00"))
        .unwrap();

    assert_eq!(plan.stats.over_limit, 1);
    assert_eq!(plan.stats.retained, 2);
    assert_eq!(plan.window, vec![1, 1, 0]);
    assert_eq!(plan.columns[0].lines[0].summary, "First");
    assert_eq!(plan.columns[1].lines[0].summary, "Second");
}

#[test]
fn window_counts_include_undisplayed_days() {
    let raws = vec![raw(
        "Later this week",
        "2024-06-14T09:00:00+00:00",
        "2024-06-14T10:00:00+00:00",
        false,
    )];

    let plan = build_plan(
        &raws,
        &options(7, 2),
        date(2024, 6, 10),
        at("2024-06-10T08:00:00+00:00"),
    )
    .unwrap();

    assert_eq!(plan.columns.len(), 2);
    assert!(plan.columns.iter().all(|c| c.lines.is_empty()));
    assert_eq!(plan.window, vec![0, 0, 0, 0, 1, 0, 0]);
    assert!(plan.layout.tomorrow_visible);
    assert!(!plan.layout.day_after_visible);
    assert_eq!(plan.tomorrow_class, "");
    assert_eq!(plan.day_after_class, "hidden");
}

#[test]
fn plan_serializes_for_the_renderer() {
    let raws = vec![raw(
        "Standup",
        "2024-06-10T09:00:00+00:00",
        "2024-06-10T09:15:00+00:00",
        false,
    )];
    let plan = build_plan(
        &raws,
        &options(1, 1),
        date(2024, 6, 10),
        at("2024-06-10T08:00:00+00:00"),
    )
    .unwrap();

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["header"]["month"], "June");
    assert_eq!(json["layout"]["today_width"], 12);
    assert_eq!(json["tomorrow_class"], "hidden");
    assert_eq!(json["day_after_class"], "hidden");
    assert_eq!(json["columns"][0]["date"], "2024-06-10");
    assert_eq!(json["columns"][0]["lines"][0]["time_label"], "9am");
    assert_eq!(json["clock"], "TwelveHour");
}
