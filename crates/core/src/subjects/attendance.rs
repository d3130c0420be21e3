//! Attendance accounting rules.
//!
//! Pure functions over a [`Subject`]'s counters. Nothing here touches storage;
//! the service loads the subject, calls into this module and persists (or
//! deletes) whatever comes back.

use chrono::NaiveDate;

use super::subjects_model::{
    AttendanceMark, AttendanceOutcome, NewSubject, Subject, SubjectState, SubjectStatus,
    SubjectUpdate,
};
use crate::errors::{Error, Result};

const MAX_TARGET_PERCENTAGE: f64 = 100.0;

/// Attended share of the total in percent. Zero when no classes are planned.
pub fn attendance_percentage(attended_classes: i32, total_classes: i32) -> f64 {
    if total_classes <= 0 {
        return 0.0;
    }
    f64::from(attended_classes) / f64::from(total_classes) * 100.0
}

/// Number of additional absences that still allow the final percentage to reach
/// `target_percentage`, assuming every remaining class is attended.
///
/// `floor(total - target * total / 100 - missed)`, left unclamped: zero means the
/// subject sits exactly on the margin, a negative value means the target is
/// already out of reach.
pub fn classes_to_miss(total_classes: i32, missed_classes: i32, target_percentage: f64) -> i64 {
    let total = f64::from(total_classes);
    let allowed_absences = total - (target_percentage * total) / 100.0;
    (allowed_absences - f64::from(missed_classes)).floor() as i64
}

/// Rounds a percentage to two decimals for display.
pub fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the display status of a subject.
///
/// `on_track` judges the current rate while `classes_to_miss` projects forward;
/// a subject can be on track with no absences left to spare.
pub fn compute_status(subject: &Subject) -> SubjectStatus {
    let percentage = attendance_percentage(subject.attended_classes, subject.total_classes);
    let to_miss = classes_to_miss(
        subject.total_classes,
        subject.missed_classes,
        subject.target_percentage,
    );
    let state = if subject.is_completed() {
        SubjectState::Completed
    } else {
        SubjectState::Active
    };

    SubjectStatus {
        percentage,
        percentage_rounded: round_percentage(percentage),
        classes_to_miss: to_miss,
        missable_classes: to_miss.max(0),
        on_track: percentage >= subject.target_percentage,
        state,
    }
}

/// Records one class session on `subject`.
///
/// Exactly one counter moves by one. When the increment accounts for the last
/// planned session the outcome is [`AttendanceOutcome::Completed`] and the
/// updated counters are dropped: a completed subject is deleted, never stored.
///
/// Fails with [`Error::InvalidState`] if every session is already recorded.
pub fn record_attendance(subject: &Subject, mark: AttendanceMark) -> Result<AttendanceOutcome> {
    if subject.is_completed() {
        return Err(Error::InvalidState(format!(
            "all {} classes of subject '{}' are already recorded",
            subject.total_classes, subject.name
        )));
    }

    let mut updated = subject.clone();
    let counter = match mark {
        AttendanceMark::Attended => &mut updated.attended_classes,
        AttendanceMark::Missed => &mut updated.missed_classes,
    };
    *counter = counter
        .checked_add(1)
        .ok_or_else(|| Error::InvalidState("attendance counter overflow".to_string()))?;

    if updated.is_completed() {
        return Ok(AttendanceOutcome::Completed {
            subject_id: updated.id,
        });
    }
    Ok(AttendanceOutcome::Updated(updated))
}

/// Overwrites the editable fields of `subject`.
///
/// The result goes through the same checks as a freshly created subject, so an
/// edit can neither complete a subject nor push its counters past the total.
pub fn apply_edit(subject: &Subject, update: SubjectUpdate) -> Result<Subject> {
    let fields = SubjectFields {
        name: &update.name,
        start_date: update.start_date,
        end_date: update.end_date,
        total_classes: update.total_classes,
        attended_classes: update.attended_classes,
        missed_classes: update.missed_classes,
        target_percentage: update.target_percentage,
    };
    fields.validate()?;

    Ok(Subject {
        name: update.name.trim().to_string(),
        start_date: update.start_date,
        end_date: update.end_date,
        total_classes: update.total_classes,
        attended_classes: update.attended_classes,
        missed_classes: update.missed_classes,
        target_percentage: update.target_percentage,
        ..subject.clone()
    })
}

/// Validates input for a new subject.
pub fn validate_new_subject(new_subject: &NewSubject) -> Result<()> {
    SubjectFields {
        name: &new_subject.name,
        start_date: new_subject.start_date,
        end_date: new_subject.end_date,
        total_classes: new_subject.total_classes,
        attended_classes: new_subject.attended_classes,
        missed_classes: new_subject.missed_classes,
        target_percentage: new_subject.target_percentage,
    }
    .validate()
}

struct SubjectFields<'a> {
    name: &'a str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_classes: i32,
    attended_classes: i32,
    missed_classes: i32,
    target_percentage: f64,
}

impl SubjectFields<'_> {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_input("Subject name cannot be empty"));
        }
        if self.end_date < self.start_date {
            return Err(Error::out_of_range(
                "endDate",
                format!(
                    "end date {} is before start date {}",
                    self.end_date, self.start_date
                ),
            ));
        }
        for (field, value) in [
            ("totalClasses", self.total_classes),
            ("attendedClasses", self.attended_classes),
            ("missedClasses", self.missed_classes),
        ] {
            if value < 0 {
                return Err(Error::out_of_range(field, "must not be negative"));
            }
        }
        if !self.target_percentage.is_finite()
            || !(0.0..=MAX_TARGET_PERCENTAGE).contains(&self.target_percentage)
        {
            return Err(Error::out_of_range(
                "targetPercentage",
                "must be between 0 and 100",
            ));
        }

        let recorded = i64::from(self.attended_classes) + i64::from(self.missed_classes);
        if recorded >= i64::from(self.total_classes) {
            return Err(Error::out_of_range(
                "totalClasses",
                format!(
                    "attended ({}) plus missed ({}) must stay below the total of {}",
                    self.attended_classes, self.missed_classes, self.total_classes
                ),
            ));
        }
        Ok(())
    }
}
