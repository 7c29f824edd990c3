use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity::{user, user_token},
    error::{UserError, UserResult},
    models::{User, UserToken},
    repository::{UserRepository, UserTokenRepository},
};

/// PostgreSQL-backed user repository. The `users.email` UNIQUE constraint
/// is the final arbiter of email collisions.
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_write_err(err: DbErr, user: &User) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => UserError::DuplicateEmail(user.email.clone()),
        _ => match err {
            DbErr::RecordNotUpdated => UserError::NotFound(user.id),
            other => UserError::from(other),
        },
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let active_model: user::ActiveModel = user.clone().into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, &user))?;

        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let active_model: user::ActiveModel = user.clone().into();

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| map_write_err(e, &user))?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;

        Ok(result.rows_affected > 0)
    }
}

/// PostgreSQL-backed password reset token repository
#[derive(Clone)]
pub struct PgUserTokenRepository {
    db: DatabaseConnection,
}

impl PgUserTokenRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserTokenRepository for PgUserTokenRepository {
    async fn generate(&self, user_id: Uuid) -> UserResult<UserToken> {
        let active_model: user_token::ActiveModel = UserToken::new(user_id).into();
        let model = active_model.insert(&self.db).await?;
        Ok(model.into())
    }

    async fn find_by_token(&self, token: Uuid) -> UserResult<Option<UserToken>> {
        let model = user_token::Entity::find()
            .filter(user_token::Column::Token.eq(token))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }
}
