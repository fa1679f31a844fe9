use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{NewUser, UpdateUser, User, UserStatus};

/// Repository trait for User persistence
///
/// Implementations own identifier assignment and the partial-update
/// field-selection rules; callers never see a half-applied update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and assign it a fresh identifier
    async fn create(&self, user: NewUser) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// List all users
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Apply the present fields of a partial update, returning the full
    /// post-update record, or `None` when the id does not exist
    async fn update(&self, id: Uuid, update: UpdateUser) -> UserResult<Option<User>>;

    /// Delete a user by ID; deleting an absent id is not an error
    async fn delete(&self, id: Uuid) -> UserResult<()>;

    /// Release underlying connection resources; called once at shutdown
    async fn close(&self) -> UserResult<()>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        let status = if user.status.is_specified() {
            user.status
        } else {
            UserStatus::Active
        };

        let user = User {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            age: user.age,
            status,
        };
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn update(&self, id: Uuid, update: UpdateUser) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        user.apply_update(update);

        tracing::info!(user_id = %id, "Updated user");
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(())
    }

    async fn close(&self) -> UserResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_defaults_status() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(new_user("test@example.com")).await.unwrap();
        assert!(!created.id.is_nil());
        assert_eq!(created.status, UserStatus::Active);

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_create_keeps_explicit_status() {
        let repo = InMemoryUserRepository::new();

        let created = repo
            .create(NewUser {
                status: UserStatus::Inactive,
                ..new_user("inactive@example.com")
            })
            .await
            .unwrap();

        assert_eq!(created.status, UserStatus::Inactive);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = InMemoryUserRepository::new();
        let fetched = repo.get_by_id(Uuid::new_v4()).await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let repo = InMemoryUserRepository::new();
        let users = repo.list().await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_partial_update_round_trip() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("jane@example.com")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateUser {
                    age: Some(27),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("user exists");

        assert_eq!(updated.age, Some(27));
        assert_eq!(updated.first_name, created.first_name);
        assert_eq!(updated.last_name, created.last_name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.status, created.status);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = InMemoryUserRepository::new();

        let result = repo
            .update(
                Uuid::new_v4(),
                UpdateUser {
                    age: Some(27),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("gone@example.com")).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());

        // Deleting again (or any absent id) still succeeds
        repo.delete(created.id).await.unwrap();
        repo.delete(Uuid::new_v4()).await.unwrap();
    }
}
