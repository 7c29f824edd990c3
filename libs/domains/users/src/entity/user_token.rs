use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::UserToken;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub token: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserToken {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            token: model.token,
            user_id: model.user_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<UserToken> for ActiveModel {
    fn from(token: UserToken) -> Self {
        ActiveModel {
            id: Set(token.id),
            token: Set(token.token),
            user_id: Set(token.user_id),
            created_at: Set(token.created_at.into()),
        }
    }
}
