use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity::{booths, floor_plans},
    error::{BoothError, BoothResult},
    models::{
        AvailableBoothFilter, Booth, BoothStatus, CreateBooth, CreateFloorPlan, FloorPlan,
        UpdateBooth,
    },
    repository::{BoothRepository, FloorPlanRepository},
};

pub struct PgBoothRepository {
    base: BaseRepository<booths::Entity>,
}

impl PgBoothRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl BoothRepository for PgBoothRepository {
    async fn create(&self, input: CreateBooth) -> BoothResult<Booth> {
        let active_model: booths::ActiveModel = input.into();

        let model = self.base.insert(active_model).await.map_err(|e| {
            if e.to_string().contains("uq_booths_event_number") {
                BoothError::NumberTaken
            } else {
                BoothError::Database(e.to_string())
            }
        })?;

        tracing::info!(booth_id = %model.id, number = %model.number, "Created booth");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> BoothResult<Option<Booth>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn list_by_event(&self, event_id: Uuid) -> BoothResult<Vec<Booth>> {
        let models = booths::Entity::find()
            .filter(booths::Column::EventId.eq(event_id))
            .order_by_asc(booths::Column::Number)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_available(&self, filter: AvailableBoothFilter) -> BoothResult<Vec<Booth>> {
        let mut query = booths::Entity::find()
            .filter(booths::Column::EventId.eq(filter.event_id))
            .filter(booths::Column::Status.eq(BoothStatus::Available));

        if let Some(size) = filter.size {
            query = query.filter(booths::Column::Size.eq(size));
        }
        if let Some(min_price) = filter.min_price {
            query = query.filter(booths::Column::PriceCents.gte(min_price));
        }
        if let Some(max_price) = filter.max_price {
            query = query.filter(booths::Column::PriceCents.lte(max_price));
        }

        let models = query
            .order_by_asc(booths::Column::Number)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn set_status(&self, id: Uuid, status: BoothStatus) -> BoothResult<Option<Booth>> {
        let result = booths::Entity::update_many()
            .col_expr(booths::Column::Status, Expr::value(status))
            .col_expr(
                booths::Column::UpdatedAt,
                Expr::value(chrono::Utc::now()),
            )
            .filter(booths::Column::Id.eq(id))
            .exec(self.base.db())
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let model = self.base.find_by_id(id).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn set_status_if(
        &self,
        id: Uuid,
        from: BoothStatus,
        to: BoothStatus,
    ) -> BoothResult<bool> {
        let result = booths::Entity::update_many()
            .col_expr(booths::Column::Status, Expr::value(to))
            .col_expr(
                booths::Column::UpdatedAt,
                Expr::value(chrono::Utc::now()),
            )
            .filter(booths::Column::Id.eq(id))
            .filter(booths::Column::Status.eq(from))
            .exec(self.base.db())
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn update(&self, id: Uuid, input: UpdateBooth) -> BoothResult<Booth> {
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(BoothError::NotFound(id))?;

        let mut booth: Booth = model.into();
        booth.apply_update(input);

        let active_model = booths::ActiveModel {
            id: Set(booth.id),
            event_id: Set(booth.event_id),
            number: Set(booth.number.clone()),
            size: Set(booth.size),
            price_cents: Set(booth.price_cents),
            status: Set(booth.status),
            position_x: Set(booth.position_x),
            position_y: Set(booth.position_y),
            width: Set(booth.width),
            height: Set(booth.height),
            description: Set(booth.description.clone()),
            amenities: Set(booth.amenities.clone()),
            created_at: Set(booth.created_at.into()),
            updated_at: Set(booth.updated_at.into()),
        };

        let updated = self.base.update(active_model).await?;
        tracing::info!(booth_id = %id, "Updated booth");
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> BoothResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;
        Ok(rows_affected > 0)
    }
}

pub struct PgFloorPlanRepository {
    base: BaseRepository<floor_plans::Entity>,
}

impl PgFloorPlanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl FloorPlanRepository for PgFloorPlanRepository {
    async fn create(&self, input: CreateFloorPlan) -> BoothResult<FloorPlan> {
        let active_model: floor_plans::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(floor_plan_id = %model.id, "Created floor plan");
        Ok(model.into())
    }

    async fn find_by_event(&self, event_id: Uuid) -> BoothResult<Option<FloorPlan>> {
        let model = floor_plans::Entity::find()
            .filter(floor_plans::Column::EventId.eq(event_id))
            .one(self.base.db())
            .await?;
        Ok(model.map(|m| m.into()))
    }
}
