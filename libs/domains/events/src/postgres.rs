use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{EventError, EventResult},
    models::{CreateEvent, EventStatus, ExhibitionEvent, UpdateEvent},
    repository::EventRepository,
};

pub struct PgEventRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, input: CreateEvent) -> EventResult<ExhibitionEvent> {
        let active_model: entity::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(event_id = %model.id, "Created exhibition event");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> EventResult<Option<ExhibitionEvent>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, status: Option<EventStatus>) -> EventResult<Vec<ExhibitionEvent>> {
        let mut query = entity::Entity::find();

        if let Some(status) = status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        let models = query
            .order_by_desc(entity::Column::StartsAt)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateEvent) -> EventResult<ExhibitionEvent> {
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))?;

        let mut event: ExhibitionEvent = model.into();
        event.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(event.id),
            name: Set(event.name.clone()),
            description: Set(event.description.clone()),
            starts_at: Set(event.starts_at.into()),
            ends_at: Set(event.ends_at.into()),
            venue: Set(event.venue.clone()),
            status: Set(event.status),
            created_at: Set(event.created_at.into()),
            updated_at: Set(event.updated_at.into()),
        };

        let updated = self.base.update(active_model).await?;
        tracing::info!(event_id = %id, "Updated exhibition event");
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;
        Ok(rows_affected > 0)
    }
}
