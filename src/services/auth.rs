use crate::db::error::{EMAIL_CONSTRAINT, USERNAME_CONSTRAINT};
use crate::db::repo::UserRepo;
use crate::models::user::{NewUser, OAuthProfile, SessionUser, User};
use crate::models::username::derive_username;
use crate::services::SignInError;
use std::sync::Arc;

pub type SignInResult<T> = Result<T, SignInError>;

/// Handles the provider callbacks: provisioning on sign-in and session lookup.
pub struct AuthService {
    repo: Arc<dyn UserRepo>,
}

#[derive(Debug, Clone)]
pub struct Provisioned {
    pub user: User,
    /// True when this sign-in created the user record
    pub created: bool,
}

/// Whether a session may be issued for a sign-in attempt.
#[derive(Debug)]
pub enum SignInOutcome {
    Admitted(Provisioned),
    Denied(SignInError),
}

impl SignInOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, SignInOutcome::Admitted(_))
    }
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserRepo>) -> Self {
        Self { repo }
    }

    /// Sign-in callback. Provisions the user on first login and decides whether
    /// the session is admitted. Any provisioning failure denies the session.
    pub async fn sign_in(&self, profile: &OAuthProfile) -> SignInOutcome {
        match self.provision(profile).await {
            Ok(p) => {
                tracing::info!(email = %p.user.email, username = %p.user.username, created = p.created, "sign-in admitted");
                SignInOutcome::Admitted(p)
            }
            Err(e) => {
                tracing::warn!(email = %profile.email, error = %e, "sign-in denied");
                SignInOutcome::Denied(e)
            }
        }
    }

    /// Returns the user for the profile's email, creating it when missing.
    pub async fn provision(&self, profile: &OAuthProfile) -> SignInResult<Provisioned> {
        let email = profile.email.as_str();
        if email.trim().is_empty() {
            return Err(SignInError::MissingEmail);
        }

        if let Some(user) = self.repo.find_by_email(email).await? {
            return Ok(Provisioned { user, created: false });
        }

        let username = derive_username(profile.display_name())?;
        if let Some(owner) = self.repo.find_by_username(username.as_str()).await? {
            // Same person, provisioned by a concurrent sign-in since our email lookup
            if owner.email == email {
                return Ok(Provisioned { user: owner, created: false });
            }
            return Err(SignInError::UsernameTaken(username.into_inner()));
        }

        let candidate = username.to_string();
        let new_user = NewUser {
            email: email.to_string(),
            username,
            image: profile.picture.clone(),
        };

        match self.repo.create_user(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, username = %user.username, "provisioned new user");
                Ok(Provisioned { user, created: true })
            }
            // A concurrent first sign-in for the same email got there first
            Err(e) if e.is_unique_violation_on(EMAIL_CONSTRAINT) => match self.repo.find_by_email(email).await? {
                Some(user) => Ok(Provisioned { user, created: false }),
                None => Err(e.into()),
            },
            Err(e) if e.is_unique_violation_on(USERNAME_CONSTRAINT) => match self.repo.find_by_email(email).await? {
                Some(user) => Ok(Provisioned { user, created: false }),
                None => Err(SignInError::UsernameTaken(candidate)),
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Session callback. Attaches the stored user id to the session of `email`.
    pub async fn session(&self, email: &str) -> SignInResult<SessionUser> {
        let Some(user) = self.repo.find_by_email(email).await? else {
            return Err(SignInError::UnknownUser(email.to_string()));
        };

        Ok(SessionUser::from(&user))
    }
}
