use crate::db::DbResult;
use crate::db::error::{DbError, EMAIL_CONSTRAINT, USERNAME_CONSTRAINT};
use crate::db::repo::UserRepo;
use crate::models::types::UserId;
use crate::models::user::{NewUser, User};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Keeps users in process memory. Used by tests and by `STORAGE=memory` runs.
#[derive(Default)]
pub struct MemoryUserRepository {
    // email -> user
    users: DashMap<String, User>,
    // username -> email
    usernames: DashMap<String, String>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        Ok(self.users.get(email).map(|u| u.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let Some(email) = self.usernames.get(username).map(|e| e.value().clone()) else {
            return Ok(None);
        };
        self.find_by_email(&email).await
    }

    async fn create_user(&self, user: NewUser) -> DbResult<User> {
        // Email is checked before username, matching the column order of the users table
        let email_slot = match self.users.entry(user.email.clone()) {
            Entry::Occupied(_) => return Err(DbError::UniqueViolation(Some(EMAIL_CONSTRAINT.into()))),
            Entry::Vacant(v) => v,
        };

        match self.usernames.entry(user.username.to_string()) {
            Entry::Occupied(_) => Err(DbError::UniqueViolation(Some(USERNAME_CONSTRAINT.into()))),
            Entry::Vacant(name_slot) => {
                let created = User {
                    id: UserId::new(),
                    email: user.email,
                    username: user.username,
                    image: user.image,
                    created_at: chrono::Utc::now(),
                };
                name_slot.insert(created.email.clone());
                email_slot.insert(created.clone());
                Ok(created)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::username::derive_username;

    fn new_user(email: &str, name: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            username: derive_username(name).unwrap(),
            image: None,
        }
    }

    #[tokio::test]
    async fn stores_and_finds_users() {
        let repo = MemoryUserRepository::new();
        let created = repo.create_user(new_user("ada@example.com", "Ada Lovelace")).await.unwrap();

        let by_email = repo.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let by_username = repo.find_by_username("adalovelace").await.unwrap().unwrap();
        assert_eq!(by_username.email, "ada@example.com");

        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let repo = MemoryUserRepository::new();
        repo.create_user(new_user("ada@example.com", "Ada Lovelace")).await.unwrap();

        let err = repo.create_user(new_user("ada@example.com", "Ada King")).await.unwrap_err();
        assert!(err.is_unique_violation_on(EMAIL_CONSTRAINT));
        // the rejected username must not stay reserved
        assert!(repo.find_by_username("adaking0").await.unwrap().is_none());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn rejects_duplicate_username() {
        let repo = MemoryUserRepository::new();
        repo.create_user(new_user("john@example.com", "John Doe")).await.unwrap();

        let err = repo.create_user(new_user("other@example.com", "john-doe")).await.unwrap_err();
        assert!(err.is_unique_violation_on(USERNAME_CONSTRAINT));
        assert!(repo.find_by_email("other@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn email_collision_is_reported_before_username() {
        let repo = MemoryUserRepository::new();
        repo.create_user(new_user("john@example.com", "John Doe")).await.unwrap();

        let err = repo.create_user(new_user("john@example.com", "John Doe")).await.unwrap_err();
        assert!(err.is_unique_violation_on(EMAIL_CONSTRAINT));
        assert_eq!(repo.len(), 1);
    }
}
