use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::avatar::AvatarStorage;
use crate::error::{UserError, UserResult};
use crate::hashing::hash_password;
use crate::models::{CreateUser, UpdateUser, User, UserResponse};
use crate::repository::UserRepository;

/// API view of a user, with the avatar filename resolved to a public URL.
pub(crate) fn present(user: User, avatars: &AvatarStorage) -> UserResponse {
    let avatar_url = user.avatar.as_deref().map(|name| avatars.url_for(name));
    UserResponse::new(user, avatar_url)
}

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    avatars: AvatarStorage,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, avatars: AvatarStorage) -> Self {
        Self {
            repository: Arc::new(repository),
            avatars,
        }
    }

    /// Create a user; the email must not be in use. The password is hashed
    /// before it reaches the repository.
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        input.validate()?;

        if self.repository.get_by_email(&input.email).await?.is_some() {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let password_hash = hash_password(input.password).await?;
        let user = User::new(input.name, input.email, password_hash);

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, "Created user");
        Ok(present(created, &self.avatars))
    }

    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users
            .into_iter()
            .map(|user| present(user, &self.avatars))
            .collect())
    }

    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self.find(id).await?;
        Ok(present(user, &self.avatars))
    }

    /// Replace name, email and password. Keeping one's own email is allowed;
    /// taking another user's email is a conflict.
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<UserResponse> {
        input.validate()?;

        let mut user = self.find(id).await?;

        if let Some(existing) = self.repository.get_by_email(&input.email).await?
            && existing.id != id
        {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let password_hash = hash_password(input.password).await?;
        user.apply_update(input.name, input.email, password_hash);

        let updated = self.repository.update(user).await?;
        tracing::info!(user_id = %id, "Updated user");
        Ok(present(updated, &self.avatars))
    }

    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        let user = self.find(id).await?;

        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }

        if let Some(avatar) = user.avatar {
            self.discard_avatar(&avatar).await;
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }

    /// Store an uploaded avatar for `user_id` and replace the previous one.
    pub async fn update_avatar(
        &self,
        user_id: Uuid,
        original_name: &str,
        bytes: &[u8],
    ) -> UserResult<UserResponse> {
        let mut user = self.find(user_id).await?;

        let filename = self.avatars.save(original_name, bytes).await?;
        let previous = user.avatar.replace(filename.clone());
        user.updated_at = chrono::Utc::now();

        let updated = match self.repository.update(user).await {
            Ok(updated) => updated,
            Err(e) => {
                self.discard_avatar(&filename).await;
                return Err(e);
            }
        };

        if let Some(previous) = previous {
            self.discard_avatar(&previous).await;
        }

        tracing::info!(user_id = %user_id, avatar = %filename, "Updated user avatar");
        Ok(present(updated, &self.avatars))
    }

    async fn find(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    async fn discard_avatar(&self, filename: &str) {
        if let Err(e) = self.avatars.remove(filename).await {
            tracing::warn!(avatar = %filename, error = %e, "Failed to remove avatar file");
        }
    }
}
