use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserToken};

/// Repository trait for User persistence
///
/// Implementations reject a second user with the same email on their own,
/// independent of the check the service performs first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by exact email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// All users, oldest first
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Save every field of an existing user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID; `false` when nothing was removed
    async fn delete(&self, id: Uuid) -> UserResult<bool>;
}

/// Password reset tokens
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserTokenRepository: Send + Sync {
    /// Issue and persist a fresh token for `user_id`
    async fn generate(&self, user_id: Uuid) -> UserResult<UserToken>;

    async fn find_by_token(&self, token: Uuid) -> UserResult<Option<UserToken>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(result)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }

        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;

        Ok(users.remove(&id).is_some())
    }
}

/// In-memory implementation of UserTokenRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, UserToken>>>,
}

impl InMemoryUserTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token as-is; lets tests plant tokens with old timestamps.
    pub async fn insert(&self, token: UserToken) {
        self.tokens.write().await.insert(token.token, token);
    }
}

#[async_trait]
impl UserTokenRepository for InMemoryUserTokenRepository {
    async fn generate(&self, user_id: Uuid) -> UserResult<UserToken> {
        let token = UserToken::new(user_id);
        self.insert(token.clone()).await;
        Ok(token)
    }

    async fn find_by_token(&self, token: Uuid) -> UserResult<Option<UserToken>> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(&token).cloned())
    }
}
