//! Authenticate Use Case
//!
//! Resolves the session cookie of a request to an existing user.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::session_token::verify_session_token;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// The signed-in user, inserted into request extensions by `require_auth`
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub user_name: UserName,
}

/// Authenticate use case
pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, token: Option<&str>) -> AuthResult<AuthenticatedUser> {
        let token = token.ok_or(AuthError::MissingToken)?;
        let claims = verify_session_token(&self.config, token, Utc::now())?;

        let user = self
            .user_repo
            .find_by_id(&claims.user_id)
            .await?
            .ok_or(AuthError::SessionUserMissing)?;

        Ok(AuthenticatedUser {
            user_id: user.user_id,
            user_name: user.user_name,
        })
    }
}
