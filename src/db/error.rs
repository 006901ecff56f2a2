use deadpool_postgres::{BuildError, PoolError};
use thiserror::Error;
use tokio_postgres::error::SqlState;

pub const EMAIL_CONSTRAINT: &str = "users_email_key";
pub const USERNAME_CONSTRAINT: &str = "users_username_key";

// DbError is the lowest level error type, wrapping errors from the database layer. It does not wrap
// any higher level errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Unique constraint violation, with the constraint name when known
    #[error("unique violation ({})", .0.as_deref().unwrap_or("unknown constraint"))]
    UniqueViolation(Option<String>),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Pg(tokio_postgres::Error),

    #[error(transparent)]
    Migrate(#[from] refinery::Error),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("row decode error: {0}")]
    Decode(String),
}

impl DbError {
    pub fn is_unique_violation_on(&self, constraint: &str) -> bool {
        matches!(self, DbError::UniqueViolation(Some(c)) if c == constraint)
    }
}

impl From<tokio_postgres::Error> for DbError {
    fn from(e: tokio_postgres::Error) -> Self {
        if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
            let constraint = e.as_db_error().and_then(|db| db.constraint()).map(str::to_string);
            return DbError::UniqueViolation(constraint);
        }
        DbError::Pg(e)
    }
}
