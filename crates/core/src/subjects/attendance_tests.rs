//! Tests for the attendance accounting rules.

#[cfg(test)]
mod tests {
    use crate::errors::{Error, ValidationError};
    use crate::subjects::attendance::{
        apply_edit, attendance_percentage, classes_to_miss, compute_status, record_attendance,
        round_percentage, validate_new_subject,
    };
    use crate::subjects::{
        AttendanceMark, AttendanceOutcome, NewSubject, Subject, SubjectState, SubjectUpdate,
    };
    use chrono::{NaiveDate, NaiveDateTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timestamp() -> NaiveDateTime {
        date(2024, 1, 1).and_hms_opt(9, 0, 0).unwrap()
    }

    fn create_test_subject(total: i32, attended: i32, missed: i32, target: f64) -> Subject {
        Subject {
            id: "subject-1".to_string(),
            owner_id: "user-1".to_string(),
            name: "Operating Systems".to_string(),
            start_date: date(2024, 1, 8),
            end_date: date(2024, 5, 10),
            total_classes: total,
            attended_classes: attended,
            missed_classes: missed,
            target_percentage: target,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn update_from(subject: &Subject) -> SubjectUpdate {
        SubjectUpdate {
            name: subject.name.clone(),
            start_date: subject.start_date,
            end_date: subject.end_date,
            total_classes: subject.total_classes,
            attended_classes: subject.attended_classes,
            missed_classes: subject.missed_classes,
            target_percentage: subject.target_percentage,
        }
    }

    // ==================== compute_status ====================

    #[test]
    fn test_status_of_fresh_subject() {
        let subject = create_test_subject(20, 0, 0, 75.0);
        let status = compute_status(&subject);

        assert_eq!(status.percentage, 0.0);
        assert!(!status.on_track);
        assert_eq!(status.classes_to_miss, 5);
        assert_eq!(status.missable_classes, 5);
        assert_eq!(status.state, SubjectState::Active);
    }

    #[test]
    fn test_status_below_target_with_no_slack() {
        let subject = create_test_subject(10, 7, 2, 80.0);
        let status = compute_status(&subject);

        assert_eq!(status.percentage_rounded, 70.0);
        assert!(!status.on_track);
        assert_eq!(status.classes_to_miss, 0);
    }

    #[test]
    fn test_status_exposes_negative_classes_to_miss() {
        let subject = create_test_subject(10, 5, 4, 80.0);
        let status = compute_status(&subject);

        assert_eq!(status.classes_to_miss, -2);
        assert_eq!(status.missable_classes, 0);
    }

    #[test]
    fn test_on_track_with_no_slack_left() {
        // 8/10 meets 80% but the two allowed absences are used up
        let subject = create_test_subject(10, 8, 2, 80.0);
        let status = compute_status(&subject);

        assert!(status.on_track);
        assert_eq!(status.classes_to_miss, 0);
    }

    #[test]
    fn test_status_with_zero_total() {
        let subject = create_test_subject(0, 0, 0, 0.0);
        let status = compute_status(&subject);

        assert_eq!(status.percentage, 0.0);
        assert!(status.on_track);
        assert_eq!(status.state, SubjectState::Completed);
    }

    #[test]
    fn test_status_is_idempotent() {
        let subject = create_test_subject(30, 11, 3, 66.5);
        assert_eq!(compute_status(&subject), compute_status(&subject));
    }

    #[test]
    fn test_percentage_keeps_full_precision() {
        let percentage = attendance_percentage(1, 3);
        assert!((percentage - 33.333_333).abs() < 1e-5);
        assert_eq!(round_percentage(percentage), 33.33);
        assert_eq!(round_percentage(attendance_percentage(2, 3)), 66.67);
    }

    #[test]
    fn test_classes_to_miss_floors_fractional_allowance() {
        // 15 - 0.75 * 15 = 3.75
        assert_eq!(classes_to_miss(15, 0, 75.0), 3);
        assert_eq!(classes_to_miss(15, 4, 75.0), -1);
    }

    // ==================== record_attendance ====================

    #[test]
    fn test_record_attended_increments_only_attended() {
        let subject = create_test_subject(10, 3, 1, 75.0);
        let outcome = record_attendance(&subject, AttendanceMark::Attended).unwrap();

        match outcome {
            AttendanceOutcome::Updated(updated) => {
                assert_eq!(updated.attended_classes, 4);
                assert_eq!(updated.missed_classes, 1);
                assert_eq!(updated.total_classes, 10);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn test_record_missed_increments_only_missed() {
        let subject = create_test_subject(10, 3, 1, 75.0);
        let outcome = record_attendance(&subject, AttendanceMark::Missed).unwrap();

        match outcome {
            AttendanceOutcome::Updated(updated) => {
                assert_eq!(updated.attended_classes, 3);
                assert_eq!(updated.missed_classes, 2);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn test_last_session_completes_subject() {
        let subject = create_test_subject(10, 9, 0, 75.0);
        let outcome = record_attendance(&subject, AttendanceMark::Attended).unwrap();

        assert_eq!(
            outcome,
            AttendanceOutcome::Completed {
                subject_id: "subject-1".to_string()
            }
        );
    }

    #[test]
    fn test_last_session_missed_also_completes() {
        let subject = create_test_subject(4, 2, 1, 50.0);
        let outcome = record_attendance(&subject, AttendanceMark::Missed).unwrap();
        assert!(matches!(outcome, AttendanceOutcome::Completed { .. }));
    }

    #[test]
    fn test_record_on_completed_subject_is_rejected() {
        let subject = create_test_subject(20, 15, 5, 75.0);
        let result = record_attendance(&subject, AttendanceMark::Attended);
        assert!(matches!(result, Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_record_on_overfilled_subject_is_rejected() {
        let subject = create_test_subject(5, 4, 3, 75.0);
        let result = record_attendance(&subject, AttendanceMark::Missed);
        assert!(matches!(result, Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_mark_from_bool() {
        assert_eq!(AttendanceMark::from(true), AttendanceMark::Attended);
        assert_eq!(AttendanceMark::from(false), AttendanceMark::Missed);
    }

    // ==================== apply_edit ====================

    #[test]
    fn test_edit_overwrites_fields_and_keeps_identity() {
        let subject = create_test_subject(20, 4, 1, 75.0);
        let mut update = update_from(&subject);
        update.name = "  Compilers ".to_string();
        update.total_classes = 30;
        update.attended_classes = 10;
        update.target_percentage = 85.0;

        let edited = apply_edit(&subject, update).unwrap();

        assert_eq!(edited.id, subject.id);
        assert_eq!(edited.owner_id, subject.owner_id);
        assert_eq!(edited.name, "Compilers");
        assert_eq!(edited.total_classes, 30);
        assert_eq!(edited.attended_classes, 10);
        assert_eq!(edited.target_percentage, 85.0);
    }

    #[test]
    fn test_edit_cannot_reach_or_exceed_total() {
        let subject = create_test_subject(20, 4, 1, 75.0);
        let mut update = update_from(&subject);
        update.attended_classes = 15;
        update.missed_classes = 5;

        let result = apply_edit(&subject, update);
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_edit_rejects_reversed_dates() {
        let subject = create_test_subject(20, 4, 1, 75.0);
        let mut update = update_from(&subject);
        update.end_date = date(2023, 12, 31);

        assert!(apply_edit(&subject, update).is_err());
    }

    // ==================== validate_new_subject ====================

    fn new_subject() -> NewSubject {
        NewSubject {
            name: "Databases".to_string(),
            start_date: date(2024, 1, 8),
            end_date: date(2024, 5, 10),
            total_classes: 20,
            attended_classes: 0,
            missed_classes: 0,
            target_percentage: 75.0,
        }
    }

    #[test]
    fn test_valid_new_subject() {
        assert!(validate_new_subject(&new_subject()).is_ok());
    }

    #[test]
    fn test_new_subject_requires_name() {
        let subject = NewSubject {
            name: "   ".to_string(),
            ..new_subject()
        };
        assert!(matches!(
            validate_new_subject(&subject),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_new_subject_rejects_negative_counters() {
        let subject = NewSubject {
            missed_classes: -1,
            ..new_subject()
        };
        assert!(validate_new_subject(&subject).is_err());
    }

    #[test]
    fn test_new_subject_rejects_target_out_of_range() {
        for target in [-0.5, 100.5, f64::NAN] {
            let subject = NewSubject {
                target_percentage: target,
                ..new_subject()
            };
            assert!(validate_new_subject(&subject).is_err(), "target {target}");
        }
    }

    #[test]
    fn test_new_subject_must_start_active() {
        let subject = NewSubject {
            total_classes: 0,
            ..new_subject()
        };
        assert!(validate_new_subject(&subject).is_err());
    }
}
