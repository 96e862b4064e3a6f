//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{UserId, user_name::UserName, user_password::UserPassword};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier (carried in the session token)
    pub user_id: UserId,
    /// User name (unique on its canonical form)
    pub user_name: UserName,
    /// Argon2id hash; the clear text is never stored
    pub password: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(user_name: UserName, password: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            password,
            created_at: now,
            updated_at: now,
        }
    }
}
