use crate::db::DbResult;
use crate::models::user::{NewUser, User};

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Finds the user registered with the given email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<User>>;
    /// Finds the user owning the given username
    async fn find_by_username(&self, username: &str) -> DbResult<Option<User>>;
    /// Stores a new user. Fails with `DbError::UniqueViolation` when the email or username is taken.
    async fn create_user(&self, user: NewUser) -> DbResult<User>;
}
