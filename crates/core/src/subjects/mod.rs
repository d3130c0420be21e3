//! Subjects module - attendance accounting, domain models, services, and traits.

pub mod attendance;
mod subjects_model;
mod subjects_service;
mod subjects_traits;

#[cfg(test)]
mod attendance_tests;


pub use attendance::{apply_edit, compute_status, record_attendance};
pub use subjects_model::{
    AttendanceMark, AttendanceOutcome, NewSubject, Subject, SubjectState, SubjectStatus,
    SubjectUpdate,
};
pub use subjects_service::SubjectService;
pub use subjects_traits::{SubjectRepositoryTrait, SubjectServiceTrait};
