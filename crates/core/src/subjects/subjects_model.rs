//! Subject domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Domain model representing a tracked subject (a course with a fixed number of sessions).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_classes: i32,
    pub attended_classes: i32,
    pub missed_classes: i32,
    pub target_percentage: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Subject {
    /// Sessions already accounted for, attended or missed.
    pub fn recorded_classes(&self) -> i64 {
        i64::from(self.attended_classes) + i64::from(self.missed_classes)
    }

    /// Sessions still to be held. Negative when an edit pushed the counters past the total.
    pub fn remaining_classes(&self) -> i64 {
        i64::from(self.total_classes) - self.recorded_classes()
    }

    pub fn is_completed(&self) -> bool {
        self.recorded_classes() >= i64::from(self.total_classes)
    }
}

/// Input model for creating a new subject. The owner comes from the caller identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewSubject {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_classes: i32,
    #[serde(default)]
    pub attended_classes: i32,
    pub missed_classes: i32,
    pub target_percentage: f64,
}

/// Full overwrite of the editable fields of a subject.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubjectUpdate {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_classes: i32,
    pub attended_classes: i32,
    pub missed_classes: i32,
    pub target_percentage: f64,
}

/// What happened at a single class session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceMark {
    Attended,
    Missed,
}

impl From<bool> for AttendanceMark {
    fn from(attended: bool) -> Self {
        if attended {
            AttendanceMark::Attended
        } else {
            AttendanceMark::Missed
        }
    }
}

/// Lifecycle state of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectState {
    #[default]
    Active,
    Completed,
}

/// Read-only projection of a subject's counters used for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStatus {
    /// Attended share of the total, full precision.
    pub percentage: f64,
    /// `percentage` rounded to two decimals.
    pub percentage_rounded: f64,
    /// Signed count of further absences compatible with the target. Negative
    /// means the target can no longer be reached.
    pub classes_to_miss: i64,
    /// `classes_to_miss` clamped at zero.
    pub missable_classes: i64,
    pub on_track: bool,
    pub state: SubjectState,
}

/// Result of recording one session.
#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceOutcome {
    /// The subject is still active and must be persisted with the new counters.
    Updated(Subject),
    /// Every session is now recorded; the subject must be deleted instead of persisted.
    Completed { subject_id: String },
}
