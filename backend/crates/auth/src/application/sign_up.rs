//! Sign Up Use Case
//!
//! Creates a new user account and issues a session token.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::session_token::{IssuedToken, issue_session_token};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};
use kernel::error::app_error::AppError;

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub user_id: UserId,
    pub session: IssuedToken,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        if input.user_name.trim().is_empty() || input.password.trim().is_empty() {
            return Err(AuthError::MissingFields);
        }

        // Validate user name
        let user_name = UserName::new(&input.user_name).map_err(|e| {
            AppError::bad_request(e.to_string())
                .with_action("Use 3 to 30 characters without spaces")
        })?;

        // Check if user name is taken
        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        // Validate and hash password (Argon2 is CPU-bound)
        let raw_password = RawPassword::new(input.password)?;
        let password = tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw_password))
            .await
            .map_err(|e| AuthError::Internal(format!("hashing task failed: {}", e)))??;

        // Create user; the unique index still guards concurrent signups
        let user = User::new(user_name, password);
        self.user_repo.create(&user).await?;

        let session = issue_session_token(&self.config, &user.user_id, Utc::now())?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
            session,
        })
    }
}
