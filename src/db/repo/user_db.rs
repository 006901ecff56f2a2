use crate::db::repo::UserRepo;
use crate::db::{Db, DbResult, map_row_opt};
use crate::models::user::{NewUser, User};
use std::sync::Arc;

pub struct UserRepository {
    db: Arc<Db>,
}

impl UserRepository {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl UserRepo for UserRepository {
    async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let client = self.db.get_client().await?;

        let stmt = client
            .prepare_cached("SELECT id, email, username, image, created_at FROM users WHERE email = $1")
            .await?;

        let row_opt = client.query_opt(&stmt, &[&email]).await?;
        map_row_opt(row_opt, User::try_from_row, &format!("UserRepo::find_by_email email={}", email))
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let client = self.db.get_client().await?;

        let stmt = client
            .prepare_cached("SELECT id, email, username, image, created_at FROM users WHERE username = $1")
            .await?;

        let row_opt = client.query_opt(&stmt, &[&username]).await?;
        map_row_opt(
            row_opt,
            User::try_from_row,
            &format!("UserRepo::find_by_username username={}", username),
        )
    }

    async fn create_user(&self, user: NewUser) -> DbResult<User> {
        let client = self.db.get_client().await?;

        let stmt = client
            .prepare_cached(
                r#"
                INSERT INTO users (email, username, image)
                VALUES ($1, $2, $3)
                RETURNING id, email, username, image, created_at
                "#,
            )
            .await?;

        let row = client
            .query_one(&stmt, &[&user.email, &user.username.as_str(), &user.image])
            .await?;

        User::try_from_row(&row)
    }
}
