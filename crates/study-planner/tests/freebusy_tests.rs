//! Tests for free-slot computation and first-fit gap finding.

use chrono::{TimeZone, Utc};
use study_planner::freebusy::merge_busy_periods;
use study_planner::{find_first_free_slot, find_free_slots, Interval};

/// Helper to create an Interval from hour ranges on a given day.
fn busy(day: u32, start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Interval {
    Interval::new(
        Utc.with_ymd_and_hms(2026, 3, day, start_hour, start_min, 0)
            .unwrap(),
        Utc.with_ymd_and_hms(2026, 3, day, end_hour, end_min, 0)
            .unwrap(),
    )
    .unwrap()
}

fn at(hour: u32, min: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, min, 0).unwrap()
}

#[test]
fn single_event_produces_two_free_slots() {
    // Window: 08:00-17:00, Event: 10:00-11:00
    let events = vec![busy(1, 10, 0, 11, 0)];

    let slots = find_free_slots(&events, at(8, 0), at(17, 0));

    assert_eq!(slots.len(), 2, "single event should produce 2 free slots");
    assert_eq!(slots[0].start, at(8, 0));
    assert_eq!(slots[0].end, at(10, 0));
    assert_eq!(slots[0].duration_minutes, 120);
    assert_eq!(slots[1].start, at(11, 0));
    assert_eq!(slots[1].end, at(17, 0));
    assert_eq!(slots[1].duration_minutes, 360);
}

#[test]
fn overlapping_and_adjacent_events_merged() {
    // 10:00-11:30 + 11:00-12:00 + 12:00-12:30 → one busy block 10:00-12:30
    let events = vec![
        busy(1, 11, 0, 12, 0),
        busy(1, 10, 0, 11, 30),
        busy(1, 12, 0, 12, 30),
    ];

    let merged = merge_busy_periods(&events, at(8, 0), at(17, 0));
    assert_eq!(merged, vec![busy(1, 10, 0, 12, 30)]);

    let slots = find_free_slots(&events, at(8, 0), at(17, 0));
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].start, at(12, 30));
}

#[test]
fn events_outside_window_are_clipped_away() {
    let events = vec![
        busy(1, 6, 0, 8, 30),
        busy(1, 16, 0, 20, 0),
        busy(2, 9, 0, 10, 0),
    ];

    let merged = merge_busy_periods(&events, at(8, 0), at(17, 0));

    assert_eq!(merged, vec![busy(1, 8, 0, 8, 30), busy(1, 16, 0, 17, 0)]);
}

#[test]
fn no_events_entire_window_is_free() {
    let slots = find_free_slots(&[], at(8, 0), at(17, 0));

    assert_eq!(slots.len(), 1, "no events should produce one free slot");
    assert_eq!(slots[0].start, at(8, 0));
    assert_eq!(slots[0].end, at(17, 0));
    assert_eq!(slots[0].duration_minutes, 540);
}

#[test]
fn inverted_window_has_no_free_slots() {
    assert!(find_free_slots(&[], at(17, 0), at(8, 0)).is_empty());
    assert!(find_first_free_slot(&[], at(9, 0), at(9, 0), 0).is_none());
}

#[test]
fn first_free_slot_with_minimum_duration() {
    // Free: 08:30-09:00 (30 min), then 12:00-17:00
    let events = vec![busy(1, 8, 0, 8, 30), busy(1, 9, 0, 12, 0)];

    let slot = find_first_free_slot(&events, at(8, 0), at(17, 0), 60)
        .expect("should find a free slot of at least 60 min");

    assert_eq!(slot.start, at(12, 0));
    assert_eq!(slot.end, at(17, 0));
    assert_eq!(slot.duration_minutes, 300);
}

#[test]
fn first_free_slot_can_be_leading_gap() {
    let events = vec![busy(1, 10, 0, 11, 0)];
    let slot = find_first_free_slot(&events, at(8, 0), at(17, 0), 120).unwrap();
    assert_eq!(slot.start, at(8, 0));
    assert_eq!(slot.end, at(10, 0));
}

#[test]
fn events_filling_entire_window_no_free_slots() {
    let events = vec![busy(1, 9, 0, 12, 0)];
    assert!(find_free_slots(&events, at(9, 0), at(12, 0)).is_empty());
    assert!(find_first_free_slot(&events, at(9, 0), at(12, 0), 1).is_none());
}

#[test]
fn no_gap_large_enough_returns_none() {
    // Only gap is 10:00-10:15 = 15 min
    let events = vec![busy(1, 9, 0, 10, 0), busy(1, 10, 15, 12, 0)];

    let slot = find_first_free_slot(&events, at(9, 0), at(12, 0), 60);

    assert!(slot.is_none(), "no gap large enough should return None");
}

#[test]
fn gap_finder_is_pure() {
    let events = vec![busy(1, 9, 0, 10, 0), busy(1, 13, 0, 15, 0)];

    let first = find_first_free_slot(&events, at(8, 0), at(18, 0), 150);
    let second = find_first_free_slot(&events, at(8, 0), at(18, 0), 150);

    assert_eq!(first, second);
    assert_eq!(first.unwrap().start, at(10, 0));
}

#[test]
fn multiple_gaps_between_events() {
    let events = vec![
        busy(1, 9, 0, 10, 0),
        busy(1, 12, 0, 13, 0),
        busy(1, 15, 0, 16, 0),
    ];

    let slots = find_free_slots(&events, at(8, 0), at(18, 0));

    let minutes: Vec<i64> = slots.iter().map(|s| s.duration_minutes).collect();
    assert_eq!(minutes, vec![60, 120, 120, 120]);
}
