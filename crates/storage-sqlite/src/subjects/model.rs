//! Database models for subjects.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use attendance_core::subjects::{NewSubject, Subject};

/// Database model for subjects
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::subjects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubjectDB {
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

/// Database model for creating a new subject
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::subjects)]
pub struct NewSubjectDB {
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

/// Mutable columns of a subject. Identity, owner and creation time never change.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::subjects)]
pub struct SubjectChangesetDB {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_classes: i32,
    pub attended_classes: i32,
    pub missed_classes: i32,
    pub target_percentage: f64,
    pub updated_at: NaiveDateTime,
}

impl NewSubjectDB {
    pub fn from_domain(
        id: String,
        owner_id: String,
        domain: NewSubject,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            owner_id,
            name: domain.name,
            start_date: domain.start_date,
            end_date: domain.end_date,
            total_classes: domain.total_classes,
            attended_classes: domain.attended_classes,
            missed_classes: domain.missed_classes,
            target_percentage: domain.target_percentage,
            created_at: now,
            updated_at: now,
        }
    }
}

// Conversion to domain models
impl From<SubjectDB> for Subject {
    fn from(db: SubjectDB) -> Self {
        Self {
            id: db.id,
            owner_id: db.owner_id,
            name: db.name,
            start_date: db.start_date,
            end_date: db.end_date,
            total_classes: db.total_classes,
            attended_classes: db.attended_classes,
            missed_classes: db.missed_classes,
            target_percentage: db.target_percentage,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<&Subject> for SubjectChangesetDB {
    fn from(domain: &Subject) -> Self {
        Self {
            name: domain.name.clone(),
            start_date: domain.start_date,
            end_date: domain.end_date,
            total_classes: domain.total_classes,
            attended_classes: domain.attended_classes,
            missed_classes: domain.missed_classes,
            target_percentage: domain.target_percentage,
            updated_at: domain.updated_at,
        }
    }
}
