use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use super::attendance;
use super::subjects_model::{AttendanceMark, AttendanceOutcome, NewSubject, Subject, SubjectUpdate};
use super::subjects_traits::{SubjectRepositoryTrait, SubjectServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing subjects and their attendance counters.
pub struct SubjectService {
    repository: Arc<dyn SubjectRepositoryTrait>,
}

impl SubjectService {
    pub fn new(repository: Arc<dyn SubjectRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn load_owned(&self, owner_id: &str, subject_id: &str) -> Result<Subject> {
        self.repository
            .find_for_owner(owner_id, subject_id)?
            .ok_or_else(|| Error::not_found("Subject"))
    }
}

#[async_trait::async_trait]
impl SubjectServiceTrait for SubjectService {
    fn list_subjects(&self, owner_id: &str) -> Result<Vec<Subject>> {
        self.repository.list_for_owner(owner_id)
    }

    fn get_subject(&self, owner_id: &str, subject_id: &str) -> Result<Subject> {
        self.load_owned(owner_id, subject_id)
    }

    async fn create_subject(&self, owner_id: &str, new_subject: NewSubject) -> Result<Subject> {
        attendance::validate_new_subject(&new_subject)?;
        let new_subject = NewSubject {
            name: new_subject.name.trim().to_string(),
            ..new_subject
        };
        let created = self.repository.insert(owner_id, new_subject).await?;
        debug!("Created subject {} for owner {}", created.id, owner_id);
        Ok(created)
    }

    /// Loads the subject, lets the accounting rules move one counter and then
    /// either stores the new counters or deletes the completed subject.
    ///
    /// Load and store are separate round-trips; two concurrent marks on the same
    /// subject can lose one update.
    async fn record_attendance(
        &self,
        owner_id: &str,
        subject_id: &str,
        mark: AttendanceMark,
    ) -> Result<AttendanceOutcome> {
        let subject = self.load_owned(owner_id, subject_id)?;

        match attendance::record_attendance(&subject, mark)? {
            AttendanceOutcome::Updated(mut updated) => {
                updated.updated_at = Utc::now().naive_utc();
                let stored = self.repository.update(updated).await?;
                debug!(
                    "Recorded {:?} for subject {} ({}/{} attended, {} missed)",
                    mark,
                    stored.id,
                    stored.attended_classes,
                    stored.total_classes,
                    stored.missed_classes
                );
                Ok(AttendanceOutcome::Updated(stored))
            }
            AttendanceOutcome::Completed { subject_id } => {
                self.repository.delete(owner_id, &subject_id).await?;
                info!(
                    "Subject {} completed after its last session, deleted",
                    subject_id
                );
                Ok(AttendanceOutcome::Completed { subject_id })
            }
        }
    }

    async fn update_subject(
        &self,
        owner_id: &str,
        subject_id: &str,
        update: SubjectUpdate,
    ) -> Result<Subject> {
        let subject = self.load_owned(owner_id, subject_id)?;
        let mut edited = attendance::apply_edit(&subject, update)?;
        edited.updated_at = Utc::now().naive_utc();
        self.repository.update(edited).await
    }

    async fn delete_subject(&self, owner_id: &str, subject_id: &str) -> Result<()> {
        let deleted = self.repository.delete(owner_id, subject_id).await?;
        if deleted == 0 {
            return Err(Error::not_found("Subject"));
        }
        debug!("Deleted subject {} for owner {}", subject_id, owner_id);
        Ok(())
    }
}
