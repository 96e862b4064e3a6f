//! Session Token
//!
//! Stateless signed token carried in the session cookie:
//!
//! ```text
//! <user_id>.<expires_at_unix_secs>.<base64url(HMAC-SHA256(secret, "<user_id>.<expires_at_unix_secs>"))>
//! ```
//!
//! Nothing is stored server-side; a token is valid until it expires.

use chrono::{DateTime, TimeZone, Utc};
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

use crate::application::config::AuthConfig;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Freshly issued token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Verified token contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

/// Issue a token for `user_id`, valid for `config.session_ttl` from `now`
pub fn issue_session_token(
    config: &AuthConfig,
    user_id: &UserId,
    now: DateTime<Utc>,
) -> AuthResult<IssuedToken> {
    if config.session_secret.is_empty() {
        return Err(AuthError::Internal("session secret is not configured".to_string()));
    }

    let ttl = chrono::Duration::from_std(config.session_ttl)
        .map_err(|e| AuthError::Internal(format!("invalid session ttl: {}", e)))?;
    let expires_at = now + ttl;

    let payload = format!("{}.{}", user_id, expires_at.timestamp());
    let signature = hmac_sha256(&config.session_secret, payload.as_bytes());

    Ok(IssuedToken {
        token: format!("{}.{}", payload, to_base64url(&signature)),
        expires_at,
    })
}

/// Verify signature and expiry of a session token
///
/// Every failure maps to `AuthError::InvalidToken`.
pub fn verify_session_token(
    config: &AuthConfig,
    token: &str,
    now: DateTime<Utc>,
) -> AuthResult<SessionClaims> {
    if config.session_secret.is_empty() {
        return Err(AuthError::Internal("session secret is not configured".to_string()));
    }

    let (payload, signature) = token.rsplit_once('.').ok_or(AuthError::InvalidToken)?;
    let signature = from_base64url(signature).map_err(|_| AuthError::InvalidToken)?;

    if !verify_hmac_sha256(&config.session_secret, payload.as_bytes(), &signature) {
        return Err(AuthError::InvalidToken);
    }

    let (user_id, expires_at) = payload.split_once('.').ok_or(AuthError::InvalidToken)?;
    let user_id: UserId = user_id.parse().map_err(|_| AuthError::InvalidToken)?;
    let expires_at = expires_at
        .parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .ok_or(AuthError::InvalidToken)?;

    if expires_at <= now {
        return Err(AuthError::InvalidToken);
    }

    Ok(SessionClaims {
        user_id,
        expires_at,
    })
}
