use log::{debug, info};
use std::sync::Arc;

use super::users_model::{normalize_email, NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{DatabaseError, Error, Result};

/// Service for registering and looking up users.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(Error::invalid_input("Email is required"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(Error::invalid_input(format!("'{email}' is not a valid email"))),
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        let email = normalize_email(&new_user.email);
        validate_email(&email)?;
        if new_user.password_hash.is_empty() {
            return Err(Error::invalid_input("Password is required"));
        }

        if self.repository.find_by_email(&email)?.is_some() {
            debug!("Registration rejected, {} is taken", email);
            return Err(Error::ConstraintViolation("User already exists".to_string()));
        }

        // A concurrent registration can still win the race; the unique index decides.
        let user = self
            .repository
            .insert(NewUser {
                email,
                password_hash: new_user.password_hash,
            })
            .await
            .map_err(|err| match err {
                Error::Database(DatabaseError::UniqueViolation(_)) => {
                    Error::ConstraintViolation("User already exists".to_string())
                }
                other => other,
            })?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.find_by_email(&normalize_email(email))
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .find_by_id(user_id)?
            .ok_or_else(|| Error::not_found("User"))
    }
}
