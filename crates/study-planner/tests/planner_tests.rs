//! End-to-end tests for `plan`: validation, expansion and allocation together.

use chrono::{DateTime, Duration, TimeZone, Utc};
use study_planner::{plan, BusyEvent, Interval, Outcome, PlacementOrder, PlannerError, ScheduleRequest};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, min, 0).unwrap()
}

fn starts(events: &[BusyEvent], req: &ScheduleRequest, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    plan(events, req, now, &[])
        .unwrap()
        .sessions
        .iter()
        .map(|s| s.interval.start())
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[test]
fn weekly_lecture_from_last_week_blocks_today() {
    // The representative occurrence is a week ago; this week's copy is 08-10.
    let lecture = BusyEvent::weekly(at(2, 8, 0) - Duration::weeks(1), at(2, 10, 0) - Duration::weeks(1));
    let req = ScheduleRequest::new(at(4, 18, 0), Duration::hours(2), PlacementOrder::EarliestFirst);

    assert_eq!(starts(&[lecture], &req, at(2, 7, 0)), vec![at(2, 10, 0), at(2, 11, 0)]);
}

#[test]
fn one_off_and_weekly_events_combine() {
    let events = vec![
        BusyEvent::once(at(4, 15, 0), at(4, 18, 0)),
        BusyEvent::weekly(at(3, 20, 0), at(3, 22, 0)),
    ];
    let req = ScheduleRequest::new(at(4, 18, 0), Duration::hours(3), PlacementOrder::LatestFirst);

    assert_eq!(
        starts(&events, &req, at(2, 7, 0)),
        vec![at(3, 19, 0), at(4, 13, 0), at(4, 14, 0)]
    );
}

#[test]
fn previous_run_sessions_are_not_doubled_up() {
    let req = ScheduleRequest::new(at(4, 18, 0), Duration::hours(2), PlacementOrder::EarliestFirst);
    let now = at(2, 7, 0);

    let first = plan(&[], &req, now, &[]).unwrap();
    let second = plan(&[], &req, now, &first.intervals()).unwrap();

    assert_eq!(
        second.intervals(),
        vec![
            Interval::new(at(2, 10, 0), at(2, 11, 0)).unwrap(),
            Interval::new(at(2, 11, 0), at(2, 12, 0)).unwrap(),
        ]
    );
}

#[test]
fn day_window_uses_request_timezone() {
    let req = ScheduleRequest::new(at(4, 18, 0), Duration::hours(1), PlacementOrder::EarliestFirst)
        .with_timezone(chrono_tz::America::New_York);

    // 08:00 EST on 2026-03-02 is 13:00 UTC.
    assert_eq!(starts(&[], &req, at(2, 7, 0)), vec![at(2, 13, 0)]);
}

#[test]
fn window_opening_in_spring_forward_gap_still_gets_sessions() {
    // 02:00 does not exist in New York on 2026-03-08; the window opens at 03:00 EDT.
    let req = ScheduleRequest::new(at(8, 23, 0), Duration::hours(1), PlacementOrder::EarliestFirst)
        .with_day_window(2, 22)
        .with_timezone(chrono_tz::America::New_York);

    let result = plan(&[], &req, at(8, 5, 0), &[]).unwrap();

    assert_eq!(result.outcome, Outcome::Full);
    assert_eq!(result.intervals(), vec![Interval::new(at(8, 7, 0), at(8, 8, 0)).unwrap()]);
}

#[test]
fn validation_runs_before_expansion() {
    // Both the request and the event are broken; the request error wins.
    let events = vec![BusyEvent::once(at(3, 10, 0), at(3, 9, 0))];
    let mut req = ScheduleRequest::new(at(4, 18, 0), Duration::hours(2), PlacementOrder::EarliestFirst);
    req.total = Duration::zero();

    let err = plan(&events, &req, at(2, 7, 0), &[]).unwrap_err();

    assert_eq!(err, PlannerError::NonPositiveDuration);
}

#[test]
fn plan_rejects_bad_request_without_allocating() {
    let req = ScheduleRequest::new(at(4, 18, 0), Duration::hours(2), PlacementOrder::EarliestFirst)
        .with_per_day_cap(0);

    assert_eq!(plan(&[], &req, at(2, 7, 0), &[]), Err(PlannerError::InvalidPerDayCap));
}

#[test]
fn malformed_event_rejects_whole_plan() {
    let events = vec![
        BusyEvent::once(at(2, 9, 0), at(2, 10, 0)),
        BusyEvent::weekly(at(3, 10, 0), at(3, 10, 0)),
    ];
    let req = ScheduleRequest::new(at(4, 18, 0), Duration::hours(2), PlacementOrder::EarliestFirst);

    assert!(matches!(
        plan(&events, &req, at(2, 7, 0), &[]),
        Err(PlannerError::InvalidInterval { .. })
    ));
}

#[test]
fn result_serializes_minutes_and_sessions() {
    let req = ScheduleRequest::new(at(4, 18, 0), Duration::hours(1), PlacementOrder::EarliestFirst);
    let result = plan(&[], &req, at(2, 7, 0), &[]).unwrap();
    assert_eq!(result.outcome, Outcome::Full);

    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["requested_minutes"], 60);
    assert_eq!(json["unplaced_minutes"], 0);
    assert_eq!(json["outcome"], "full");
    assert_eq!(json["sessions"][0]["label"], "Study: Exam");
    assert_eq!(json["sessions"][0]["start"], "2026-03-02T08:00:00Z");
}

#[test]
fn request_roundtrips_through_json() {
    let req = ScheduleRequest::new(at(4, 18, 0), Duration::minutes(90), PlacementOrder::LatestFirst)
        .with_granularity(Duration::minutes(30))
        .with_timezone(chrono_tz::Europe::London);

    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains(r#""placement_order":"latest_first""#));
    assert!(json.contains(r#""total_minutes":90"#));

    let back: ScheduleRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, req);
}
