//! Property-based tests for the attendance accounting rules.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use attendance_core::subjects::{
    compute_status, record_attendance, AttendanceMark, AttendanceOutcome, Subject, SubjectState,
};
use chrono::NaiveDate;
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_mark() -> impl Strategy<Value = AttendanceMark> {
    prop_oneof![Just(AttendanceMark::Attended), Just(AttendanceMark::Missed)]
}

/// Generates an active subject: attended + missed < total.
fn arb_active_subject() -> impl Strategy<Value = Subject> {
    (1i32..500, 0.0f64..=100.0)
        .prop_flat_map(|(total, target)| {
            (Just(total), 0..total, Just(target))
                .prop_flat_map(|(total, recorded, target)| {
                    (Just(total), 0..=recorded, Just(recorded), Just(target))
                })
        })
        .prop_map(|(total, attended, recorded, target)| {
            let created = NaiveDate::from_ymd_opt(2024, 1, 8)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap();
            Subject {
                id: "subject".to_string(),
                owner_id: "owner".to_string(),
                name: "Generated".to_string(),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
                total_classes: total,
                attended_classes: attended,
                missed_classes: recorded - attended,
                target_percentage: target,
                created_at: created,
                updated_at: created,
            }
        })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Recording a session moves exactly one counter by one and never
    /// produces a persisted subject whose counters reach the total.
    #[test]
    fn prop_record_moves_exactly_one_counter(subject in arb_active_subject(), mark in arb_mark()) {
        match record_attendance(&subject, mark).unwrap() {
            AttendanceOutcome::Updated(updated) => {
                let attended_delta = updated.attended_classes - subject.attended_classes;
                let missed_delta = updated.missed_classes - subject.missed_classes;
                prop_assert_eq!(attended_delta + missed_delta, 1);
                match mark {
                    AttendanceMark::Attended => prop_assert_eq!(attended_delta, 1),
                    AttendanceMark::Missed => prop_assert_eq!(missed_delta, 1),
                }
                prop_assert!(updated.attended_classes + updated.missed_classes < updated.total_classes);
                prop_assert_eq!(compute_status(&updated).state, SubjectState::Active);
            }
            AttendanceOutcome::Completed { subject_id } => {
                prop_assert_eq!(subject_id, subject.id.clone());
                prop_assert_eq!(subject.attended_classes + subject.missed_classes + 1, subject.total_classes);
            }
        }
    }

    /// The status projection is a pure function of the subject.
    #[test]
    fn prop_status_is_pure(subject in arb_active_subject()) {
        let first = compute_status(&subject);
        let second = compute_status(&subject);
        prop_assert_eq!(first, second);
        prop_assert!(first.percentage >= 0.0 && first.percentage <= 100.0);
        prop_assert!(first.missable_classes >= 0);
        prop_assert_eq!(first.missable_classes, first.classes_to_miss.max(0));
        prop_assert_eq!(first.on_track, first.percentage >= subject.target_percentage);
    }

    /// Marking sessions until the subject completes takes exactly the
    /// remaining number of calls.
    #[test]
    fn prop_completion_after_remaining_sessions(subject in arb_active_subject(), mark in arb_mark()) {
        let remaining = subject.remaining_classes();
        let mut current = subject;
        let mut calls = 0;
        loop {
            calls += 1;
            match record_attendance(&current, mark).unwrap() {
                AttendanceOutcome::Updated(next) => current = next,
                AttendanceOutcome::Completed { .. } => break,
            }
        }
        prop_assert_eq!(calls, remaining);
    }
}
