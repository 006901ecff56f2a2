use crate::db::DbResult;
use crate::db::error::DbError;
use crate::models::types::UserId;
use crate::models::username::Username;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// Profile as returned by the OAuth provider after the token exchange.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthProfile {
    pub email: String,
    /// Free-form display name, may be missing or contain anything
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl OAuthProfile {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID
    pub id: UserId,
    /// Email address, used as the identity key
    pub email: String,
    /// Derived username (distinct)
    pub username: Username,
    /// Profile picture URL from the provider
    pub image: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn try_from_row(row: &Row) -> DbResult<Self> {
        let username: String = row.try_get("username")?;
        Ok(Self {
            id: row.try_get::<_, UserId>("id")?,
            email: row.try_get("email")?,
            username: Username::parse(username).map_err(|e| DbError::Decode(format!("username: {e}")))?,
            image: row.try_get("image")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// A user record that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: Username,
    pub image: Option<String>,
}

/// What a session carries about the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub image: Option<String>,
}

impl From<&User> for SessionUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            username: u.username.to_string(),
            image: u.image.clone(),
        }
    }
}
