use crate::errors::Result;
use crate::subjects::subjects_model::{
    AttendanceMark, AttendanceOutcome, NewSubject, Subject, SubjectUpdate,
};
use async_trait::async_trait;

/// Trait for subject repository operations.
///
/// Every lookup is scoped by owner; a subject of another owner is invisible.
#[async_trait]
pub trait SubjectRepositoryTrait: Send + Sync {
    fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Subject>>;
    fn find_for_owner(&self, owner_id: &str, subject_id: &str) -> Result<Option<Subject>>;
    async fn insert(&self, owner_id: &str, new_subject: NewSubject) -> Result<Subject>;
    async fn update(&self, subject: Subject) -> Result<Subject>;
    async fn delete(&self, owner_id: &str, subject_id: &str) -> Result<usize>;
}

/// Trait for subject service operations
#[async_trait]
pub trait SubjectServiceTrait: Send + Sync {
    fn list_subjects(&self, owner_id: &str) -> Result<Vec<Subject>>;
    fn get_subject(&self, owner_id: &str, subject_id: &str) -> Result<Subject>;
    async fn create_subject(&self, owner_id: &str, new_subject: NewSubject) -> Result<Subject>;
    async fn record_attendance(
        &self,
        owner_id: &str,
        subject_id: &str,
        mark: AttendanceMark,
    ) -> Result<AttendanceOutcome>;
    async fn update_subject(
        &self,
        owner_id: &str,
        subject_id: &str,
        update: SubjectUpdate,
    ) -> Result<Subject>;
    async fn delete_subject(&self, owner_id: &str, subject_id: &str) -> Result<()>;
}
