use crate::db::error::DbError;
use crate::models::username::ValidationError;
use thiserror::Error;

/// SignInError covers everything that can stop a user from being provisioned or
/// from getting a session. The sign-in callback turns each of these into a denied
/// session; nothing is persisted when one is returned.
#[derive(Debug, Error)]
pub enum SignInError {
    #[error("profile has no email address")]
    MissingEmail,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("username already taken: {0}")]
    UsernameTaken(String),

    #[error("no user registered for {0}")]
    UnknownUser(String),

    #[error(transparent)]
    Database(#[from] DbError),
}
