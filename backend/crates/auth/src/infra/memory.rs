//! In-memory Repository
//!
//! Used by tests and by the development server when no database is
//! configured. Contents are lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// In-memory user repository keyed by user id
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        // Same guarantee as the unique index on user_name_canonical
        let taken = users
            .values()
            .any(|u| u.user_name.canonical() == user.user_name.canonical());
        if taken {
            return Err(AuthError::UserNameTaken);
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self.find_by_user_name(user_name).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::{RawPassword, UserPassword};

    fn user(name: &str) -> User {
        let raw = RawPassword::new("CorrectHorse1!".to_string()).unwrap();
        User::new(
            UserName::new(name).unwrap(),
            UserPassword::from_raw(&raw).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let alice = user("Alice");
        repo.create(&alice).await.unwrap();

        let by_id = repo.find_by_id(&alice.user_id).await.unwrap().unwrap();
        assert_eq!(by_id.user_name.original(), "Alice");

        let by_name = repo
            .find_by_user_name(&UserName::for_lookup("ALICE"))
            .await
            .unwrap();
        assert!(by_name.is_some());
        assert!(repo.exists_by_user_name(&UserName::for_lookup("alice")).await.unwrap());
        assert!(!repo.exists_by_user_name(&UserName::for_lookup("bob")).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_canonical_name_is_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(&user("alice")).await.unwrap();

        let err = repo.create(&user("ALICE")).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));
        assert_eq!(repo.len().await, 1);
    }
}
