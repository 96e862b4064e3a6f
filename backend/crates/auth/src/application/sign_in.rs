//! Sign In Use Case
//!
//! Authenticates a user by name and password and issues a session token.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::session_token::{IssuedToken, issue_session_token};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user_id: UserId,
    pub session: IssuedToken,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.user_name.trim().is_empty() || input.password.trim().is_empty() {
            return Err(AuthError::MissingFields);
        }

        let user_name = UserName::for_lookup(&input.user_name);
        let user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let raw_password = RawPassword::for_verification(input.password)?;
        let stored = user.password.clone();
        let password_valid = tokio::task::spawn_blocking(move || stored.verify(&raw_password))
            .await
            .map_err(|e| AuthError::Internal(format!("verification task failed: {}", e)))?;

        if !password_valid {
            tracing::warn!(user_id = %user.user_id, "Password verification failed");
            return Err(AuthError::InvalidCredentials);
        }

        let session = issue_session_token(&self.config, &user.user_id, Utc::now())?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            user_id: user.user_id,
            session,
        })
    }
}
