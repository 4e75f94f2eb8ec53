use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{RegisterUser, UpdateUser, User},
    repository::UserRepository,
};

pub struct PgUserRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: RegisterUser, password_hash: String) -> UserResult<User> {
        let active_model = entity::ActiveModel::for_registration(input, password_hash);

        let model = self.base.insert(active_model).await.map_err(|e| {
            // The unique email index is the source of truth for duplicates
            if e.to_string().contains("users_email") {
                UserError::EmailTaken
            } else {
                UserError::Database(e.to_string())
            }
        })?;

        tracing::info!(user_id = %model.id, "Registered user");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email.to_lowercase()))
            .one(self.base.db())
            .await?;
        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, limit: u64, offset: u64) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let mut user: User = model.into();
        user.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            password_hash: Set(user.password_hash.clone()),
            company: Set(user.company.clone()),
            role: Set(user.role),
            active: Set(user.active),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        };

        let updated = self.base.update(active_model).await?;
        tracing::info!(user_id = %id, "Updated user");
        Ok(updated.into())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> UserResult<bool> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Active, sea_orm::sea_query::Expr::value(active))
            .filter(entity::Column::Id.eq(id))
            .exec(self.base.db())
            .await?;

        Ok(result.rows_affected > 0)
    }
}
