//! User Password Value Object
//!
//! Domain wrapper over `platform::password` that turns policy violations
//! into user-facing `AppError`s.
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("MySecurePass123!".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw).unwrap();
//! assert!(hashed.verify(&raw));
//! ```

use kernel::error::{
    app_error::{AppError, AppResult, ResultExt},
    kind::ErrorKind,
};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a new password against the length policy (signup)
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(policy_error)?;
        Ok(Self(clear_text))
    }

    /// Accept a password for verification only (login)
    pub fn for_verification(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::for_verification(raw).map_err(policy_error)?;
        Ok(Self(clear_text))
    }
}

fn policy_error(e: PasswordPolicyError) -> AppError {
    match e {
        PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
            "Password must be at least {} characters (got {})",
            min, actual
        ))
        .with_action("Please choose a longer password"),

        PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
            "Password must be at most {} characters (got {})",
            max, actual
        ))
        .with_action("Please choose a shorter password"),

        PasswordPolicyError::EmptyOrWhitespace => {
            AppError::bad_request("Fill all the fields").with_action("Please enter a password")
        }

        PasswordPolicyError::InvalidCharacter => {
            AppError::bad_request("Password contains invalid characters")
                .with_action("Please remove any special control characters")
        }
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password
    pub fn from_raw(raw: &RawPassword) -> AppResult<Self> {
        let hashed = raw
            .0
            .hash()
            .map_app_err(ErrorKind::InternalServerError, "Password hashing failed")?;
        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_app_err(
            ErrorKind::InternalServerError,
            "Invalid password hash in database",
        )?;
        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash (constant-time)
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(&raw.0)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("ValidPass123!".to_string()).is_ok());

        let err = RawPassword::new("short".to_string()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.action(), Some("Please choose a longer password"));

        let err = RawPassword::new("".to_string()).unwrap_err();
        assert_eq!(err.message(), "Fill all the fields");
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw).unwrap();
        assert!(hashed.verify(&raw));

        let wrong = RawPassword::for_verification("nope".to_string()).unwrap();
        assert!(!hashed.verify(&wrong));
    }

    #[test]
    fn test_phc_string_from_database() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw));

        let err = UserPassword::from_phc_string("plaintext-password").unwrap_err();
        assert!(err.is_server_error());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("Secret"));
        let hashed = UserPassword::from_raw(&raw).unwrap();
        assert!(format!("{:?}", hashed).contains("HASH"));
    }
}
