mod auth;
mod error;

pub use auth::{AuthService, Provisioned, SignInOutcome, SignInResult};
pub use error::SignInError;
