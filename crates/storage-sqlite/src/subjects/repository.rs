use attendance_core::errors::Error;
use attendance_core::subjects::{NewSubject, Subject, SubjectRepositoryTrait};
use attendance_core::Result;

use super::model::{NewSubjectDB, SubjectChangesetDB, SubjectDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::subjects;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct SubjectRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SubjectRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SubjectRepository { pool, writer }
    }
}

#[async_trait]
impl SubjectRepositoryTrait for SubjectRepository {
    fn list_for_owner(&self, owner: &str) -> Result<Vec<Subject>> {
        let mut conn = get_connection(&self.pool)?;
        let subjects_db = subjects::table
            .filter(subjects::owner_id.eq(owner))
            .order((subjects::start_date.asc(), subjects::name.asc()))
            .select(SubjectDB::as_select())
            .load::<SubjectDB>(&mut conn)
            .into_core()?;
        Ok(subjects_db.into_iter().map(Subject::from).collect())
    }

    fn find_for_owner(&self, owner: &str, subject_id: &str) -> Result<Option<Subject>> {
        let mut conn = get_connection(&self.pool)?;
        let subject_db = subjects::table
            .filter(subjects::id.eq(subject_id))
            .filter(subjects::owner_id.eq(owner))
            .select(SubjectDB::as_select())
            .first::<SubjectDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(subject_db.map(Subject::from))
    }

    async fn insert(&self, owner: &str, new_subject: NewSubject) -> Result<Subject> {
        let new_subject_db = NewSubjectDB::from_domain(
            Uuid::new_v4().to_string(),
            owner.to_string(),
            new_subject,
            Utc::now().naive_utc(),
        );

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Subject> {
                let result_db = diesel::insert_into(subjects::table)
                    .values(&new_subject_db)
                    .returning(SubjectDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Subject::from(result_db))
            })
            .await
    }

    async fn update(&self, subject: Subject) -> Result<Subject> {
        let changeset = SubjectChangesetDB::from(&subject);
        let subject_id = subject.id;
        let owner = subject.owner_id;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Subject> {
                let affected = diesel::update(
                    subjects::table
                        .filter(subjects::id.eq(&subject_id))
                        .filter(subjects::owner_id.eq(&owner)),
                )
                .set(&changeset)
                .execute(conn)
                .into_core()?;
                if affected == 0 {
                    return Err(Error::not_found("Subject"));
                }

                let result_db = subjects::table
                    .filter(subjects::id.eq(&subject_id))
                    .select(SubjectDB::as_select())
                    .first::<SubjectDB>(conn)
                    .into_core()?;
                Ok(Subject::from(result_db))
            })
            .await
    }

    async fn delete(&self, owner: &str, subject_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let subject_id = subject_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    subjects::table
                        .filter(subjects::id.eq(subject_id))
                        .filter(subjects::owner_id.eq(owner)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
