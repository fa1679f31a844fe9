use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, UpdateUser, User};
use crate::repository::UserRepository;

/// E.164 phone numbers: leading +, country code, at most 15 digits
static E164: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("E.164 pattern is valid"));

/// Service layer for User business logic.
///
/// Validates input before it reaches the repository and revalidates every
/// record the repository hands back, so a misbehaving store cannot leak
/// corrupt data to callers.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user
    pub async fn add_user(&self, input: NewUser) -> UserResult<User> {
        validate_new_user(&input)?;

        let created = self
            .repository
            .create(input)
            .await
            .map_err(|e| e.context("could not add the user"))?;

        validate_record(&created)?;
        Ok(created)
    }

    /// Get a user by its string identifier.
    ///
    /// The identifier is gated here: an empty or non-UUID id never reaches
    /// the repository.
    pub async fn get_user_by_id(&self, id: &str) -> UserResult<User> {
        let user_id = parse_user_id(id)?;

        let user = self
            .repository
            .get_by_id(user_id)
            .await
            .map_err(|e| e.context(format!("could not retrieve the user with id {}", user_id)))?
            .ok_or(UserError::NotFound(user_id))?;

        validate_record(&user)?;
        if user.id != user_id {
            return Err(UserError::Validation(format!(
                "invalid user id returned. expected: {} returned: {}",
                user_id, user.id
            )));
        }

        Ok(user)
    }

    /// List all users; every returned element must be individually valid
    pub async fn get_all_users(&self) -> UserResult<Vec<User>> {
        let users = self
            .repository
            .list()
            .await
            .map_err(|e| e.context("could not retrieve the users"))?;

        for user in &users {
            validate_record(user)?;
        }

        Ok(users)
    }

    /// Apply a partial update, returning the full post-update record
    pub async fn update_user_by_id(&self, id: &str, update: UpdateUser) -> UserResult<User> {
        let user_id = parse_user_id(id)?;
        validate_update(&update)?;

        let updated = self
            .repository
            .update(user_id, update)
            .await
            .map_err(|e| e.context(format!("could not update the user with id {}", user_id)))?
            .ok_or(UserError::NotFound(user_id))?;

        validate_record(&updated)?;
        Ok(updated)
    }

    /// Delete a user; deleting an id that does not exist is not an error
    pub async fn delete_user_by_id(&self, id: &str) -> UserResult<()> {
        let user_id = parse_user_id(id)?;

        self.repository
            .delete(user_id)
            .await
            .map_err(|e| e.context(format!("could not delete the user with id {}", user_id)))
    }

    /// Release repository resources; called once at shutdown
    pub async fn close(&self) -> UserResult<()> {
        self.repository.close().await
    }
}

// Validation helpers

fn parse_user_id(id: &str) -> UserResult<Uuid> {
    if id.is_empty() {
        return Err(UserError::InvalidId("user id is empty".to_string()));
    }

    Uuid::parse_str(id)
        .map_err(|_| UserError::InvalidId(format!("user id '{}' is not a valid UUID", id)))
}

fn validate_name(field: &str, value: &str) -> UserResult<()> {
    let len = value.chars().count();
    if !(2..=50).contains(&len) {
        return Err(UserError::Validation(format!(
            "{} must be between 2 and 50 characters",
            field
        )));
    }
    Ok(())
}

fn validate_email(value: &str) -> UserResult<()> {
    if !value.validate_email() {
        return Err(UserError::Validation(format!(
            "'{}' is not a valid email address",
            value
        )));
    }
    Ok(())
}

fn validate_phone(value: &str) -> UserResult<()> {
    if !E164.is_match(value) {
        return Err(UserError::Validation(format!(
            "'{}' is not an E.164 phone number",
            value
        )));
    }
    Ok(())
}

fn validate_age(value: i32) -> UserResult<()> {
    if !(0..=150).contains(&value) {
        return Err(UserError::Validation(
            "age must be between 0 and 150".to_string(),
        ));
    }
    Ok(())
}

fn validate_new_user(input: &NewUser) -> UserResult<()> {
    if input.first_name.is_empty() || input.last_name.is_empty() || input.email.is_empty() {
        return Err(UserError::Validation(
            "firstName, lastName or email is empty".to_string(),
        ));
    }

    validate_name("firstName", &input.first_name)?;
    validate_name("lastName", &input.last_name)?;
    validate_email(&input.email)?;
    if let Some(ref phone) = input.phone {
        validate_phone(phone)?;
    }
    if let Some(age) = input.age {
        validate_age(age)?;
    }
    Ok(())
}

fn validate_update(update: &UpdateUser) -> UserResult<()> {
    if let Some(ref first_name) = update.first_name {
        validate_name("firstName", first_name)?;
    }
    if let Some(ref last_name) = update.last_name {
        validate_name("lastName", last_name)?;
    }
    if let Some(ref email) = update.email {
        validate_email(email)?;
    }
    if let Some(ref phone) = update.phone {
        validate_phone(phone)?;
    }
    if let Some(age) = update.age {
        validate_age(age)?;
    }
    Ok(())
}

/// Defensive check on records handed back by the store
fn validate_record(user: &User) -> UserResult<()> {
    if user.id.is_nil() {
        return Err(UserError::Validation(
            "stored user has no id".to_string(),
        ));
    }

    validate_name("firstName", &user.first_name)?;
    validate_name("lastName", &user.last_name)?;
    validate_email(&user.email)?;
    if let Some(ref phone) = user.phone {
        validate_phone(phone)?;
    }
    if let Some(age) = user.age {
        validate_age(age)?;
    }
    if !user.status.is_specified() {
        return Err(UserError::Validation(
            "stored user has no status".to_string(),
        ));
    }
    Ok(())
}
