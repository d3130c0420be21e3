use attendance_core::subjects::{compute_status, AttendanceOutcome, Subject, SubjectStatus};
use serde::{Deserialize, Serialize};

/// A stored subject together with its derived attendance status.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubjectView {
    #[serde(flatten)]
    pub subject: Subject,
    pub status: SubjectStatus,
}

impl From<Subject> for SubjectView {
    fn from(subject: Subject) -> Self {
        let status = compute_status(&subject);
        Self { subject, status }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct AttendanceRequest {
    pub attended: bool,
}

#[derive(Serialize, Debug)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum AttendanceResponse {
    Updated { subject: SubjectView },
    #[serde(rename_all = "camelCase")]
    Completed { subject_id: String },
}

impl From<AttendanceOutcome> for AttendanceResponse {
    fn from(outcome: AttendanceOutcome) -> Self {
        match outcome {
            AttendanceOutcome::Updated(subject) => AttendanceResponse::Updated {
                subject: subject.into(),
            },
            AttendanceOutcome::Completed { subject_id } => {
                AttendanceResponse::Completed { subject_id }
            }
        }
    }
}

#[derive(Serialize, Debug)]
pub struct DeleteResponse {
    pub deleted: bool,
}
