use axum_helpers::JwtAuth;
use std::sync::Arc;
use validator::Validate;

use crate::avatar::AvatarStorage;
use crate::error::{UserError, UserResult};
use crate::hashing::verify_password;
use crate::models::{CreateSession, SessionResponse};
use crate::repository::UserRepository;
use crate::service::present;

/// Email + password sign in, answered with a signed JWT.
#[derive(Clone)]
pub struct SessionService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
    avatars: AvatarStorage,
}

impl<R: UserRepository> SessionService<R> {
    pub fn new(repository: R, jwt: JwtAuth, avatars: AvatarStorage) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
            avatars,
        }
    }

    /// Unknown email and wrong password fail the same way.
    pub async fn create_session(&self, input: CreateSession) -> UserResult<SessionResponse> {
        input.validate()?;

        let user = self
            .repository
            .get_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(input.password, user.password_hash.clone()).await? {
            return Err(UserError::InvalidCredentials);
        }

        let token = self
            .jwt
            .create_token(user.id)
            .map_err(|e| UserError::Token(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Session created");

        Ok(SessionResponse {
            user: present(user, &self.avatars),
            token,
        })
    }
}
