//! SQLite storage implementation for subjects.

mod model;
mod repository;

pub use model::{NewSubjectDB, SubjectChangesetDB, SubjectDB};
pub use repository::SubjectRepository;
