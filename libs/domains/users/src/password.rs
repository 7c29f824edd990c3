use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::hashing::hash_password;
use crate::models::{ForgotPassword, ResetPassword, UserToken};
use crate::repository::{UserRepository, UserTokenRepository};

/// Forgot / reset password flow backed by [`UserToken`]s.
///
/// No mail is sent; the issued token is written to the log.
#[derive(Clone)]
pub struct PasswordService<R: UserRepository, T: UserTokenRepository> {
    users: Arc<R>,
    tokens: Arc<T>,
}

impl<R: UserRepository, T: UserTokenRepository> PasswordService<R, T> {
    pub fn new(users: R, tokens: T) -> Self {
        Self {
            users: Arc::new(users),
            tokens: Arc::new(tokens),
        }
    }

    pub async fn forgot_password(&self, input: ForgotPassword) -> UserResult<UserToken> {
        input.validate()?;

        let user = self
            .users
            .get_by_email(&input.email)
            .await?
            .ok_or(UserError::UnknownEmail(input.email))?;

        let token = self.tokens.generate(user.id).await?;

        tracing::info!(user_id = %user.id, token = %token.token, "Issued password reset token");
        Ok(token)
    }

    pub async fn reset_password(&self, input: ResetPassword) -> UserResult<()> {
        input.validate()?;

        let token = self
            .tokens
            .find_by_token(input.token)
            .await?
            .ok_or(UserError::TokenNotFound)?;

        let mut user = self
            .users
            .get_by_id(token.user_id)
            .await?
            .ok_or(UserError::NotFound(token.user_id))?;

        if token.is_expired_at(Utc::now()) {
            return Err(UserError::TokenExpired);
        }

        user.password_hash = hash_password(input.password).await?;
        user.updated_at = Utc::now();
        self.users.update(user).await?;

        tracing::info!(user_id = %token.user_id, "Password reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::repository::{
        InMemoryUserRepository, InMemoryUserTokenRepository, MockUserRepository,
        MockUserTokenRepository,
    };
    use chrono::Duration;
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn user() -> User {
        User::new(
            "Ana".to_string(),
            "ana@example.com".to_string(),
            "old-hash".to_string(),
        )
    }

    fn reset(token: Uuid) -> ResetPassword {
        ResetPassword {
            token,
            password: "n3w".to_string(),
            password_confirmation: "n3w".to_string(),
        }
    }

    #[tokio::test]
    async fn test_forgot_password_for_unknown_email() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_email().returning(|_| Ok(None));
        let mut tokens = MockUserTokenRepository::new();
        tokens.expect_generate().never();

        let service = PasswordService::new(users, tokens);
        let result = service
            .forgot_password(ForgotPassword {
                email: "ghost@example.com".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::UnknownEmail(_))));
    }

    #[tokio::test]
    async fn test_forgot_password_issues_token_for_user() {
        let ana = user();
        let ana_id = ana.id;

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_email()
            .returning(move |_| Ok(Some(ana.clone())));
        let mut tokens = MockUserTokenRepository::new();
        tokens
            .expect_generate()
            .with(eq(ana_id))
            .times(1)
            .returning(|user_id| Ok(UserToken::new(user_id)));

        let service = PasswordService::new(users, tokens);
        let token = service
            .forgot_password(ForgotPassword {
                email: "ana@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(token.user_id, ana_id);
    }

    #[tokio::test]
    async fn test_reset_with_unknown_token() {
        let users = MockUserRepository::new();
        let mut tokens = MockUserTokenRepository::new();
        tokens.expect_find_by_token().returning(|_| Ok(None));

        let service = PasswordService::new(users, tokens);
        let result = service.reset_password(reset(Uuid::new_v4())).await;

        assert!(matches!(result, Err(UserError::TokenNotFound)));
    }

    #[tokio::test]
    async fn test_reset_with_expired_token() {
        let ana = user();
        let mut stale = UserToken::new(ana.id);
        stale.created_at -= Duration::hours(3);
        let token_value = stale.token;

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .returning(move |_| Ok(Some(ana.clone())));
        users.expect_update().never();
        let mut tokens = MockUserTokenRepository::new();
        tokens
            .expect_find_by_token()
            .returning(move |_| Ok(Some(stale.clone())));

        let service = PasswordService::new(users, tokens);
        let result = service.reset_password(reset(token_value)).await;

        assert!(matches!(result, Err(UserError::TokenExpired)));
    }

    #[tokio::test]
    async fn test_reset_rehashes_password() {
        let ana = user();
        let fresh = UserToken::new(ana.id);
        let token_value = fresh.token;

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .returning(move |_| Ok(Some(ana.clone())));
        users
            .expect_update()
            .withf(|user| user.password_hash.starts_with("$argon2id$"))
            .times(1)
            .returning(|user| Ok(user));
        let mut tokens = MockUserTokenRepository::new();
        tokens
            .expect_find_by_token()
            .with(eq(token_value))
            .returning(move |_| Ok(Some(fresh.clone())));

        let service = PasswordService::new(users, tokens);
        service.reset_password(reset(token_value)).await.unwrap();
    }

    #[tokio::test]
    async fn test_reset_token_can_be_used_again_before_expiry() {
        let users = InMemoryUserRepository::new();
        let ana = users.create(user()).await.unwrap();
        let tokens = InMemoryUserTokenRepository::new();
        let issued = tokens.generate(ana.id).await.unwrap();

        let service = PasswordService::new(users.clone(), tokens);
        service.reset_password(reset(issued.token)).await.unwrap();
        service.reset_password(reset(issued.token)).await.unwrap();

        let stored = users.get_by_id(ana.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "old-hash");
    }

    #[tokio::test]
    async fn test_reset_rejects_mismatched_confirmation() {
        let users = MockUserRepository::new();
        let mut tokens = MockUserTokenRepository::new();
        tokens.expect_find_by_token().never();

        let service = PasswordService::new(users, tokens);
        let result = service
            .reset_password(ResetPassword {
                token: Uuid::new_v4(),
                password: "a".to_string(),
                password_confirmation: "b".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }
}
