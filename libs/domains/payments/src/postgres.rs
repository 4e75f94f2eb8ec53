use async_trait::async_trait;
use chrono::Utc;
use database::BaseRepository;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    entity,
    error::{PaymentError, PaymentResult},
    models::{Transaction, TransactionStatus},
    repository::TransactionRepository,
};

pub struct PgTransactionRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgTransactionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn require(&self, id: Uuid) -> PaymentResult<entity::Model> {
        self.base
            .find_by_id(id)
            .await?
            .ok_or_else(|| PaymentError::Database(format!("Transaction {} vanished", id)))
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn create(
        &self,
        reservation_id: Uuid,
        amount_cents: i64,
        currency: String,
    ) -> PaymentResult<Transaction> {
        let active_model =
            entity::ActiveModel::for_reservation(reservation_id, amount_cents, currency);
        let model = self.base.insert(active_model).await?;

        tracing::info!(
            transaction_id = %model.id,
            reservation_id = %reservation_id,
            amount_cents,
            "Created transaction"
        );
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> PaymentResult<Option<Transaction>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn find_by_reservation(
        &self,
        reservation_id: Uuid,
    ) -> PaymentResult<Option<Transaction>> {
        let model = entity::Entity::find()
            .filter(entity::Column::ReservationId.eq(reservation_id))
            .one(self.base.db())
            .await?;
        Ok(model.map(|m| m.into()))
    }

    async fn find_by_intent(&self, intent_id: &str) -> PaymentResult<Option<Transaction>> {
        let model = entity::Entity::find()
            .filter(entity::Column::ProcessorIntentId.eq(intent_id))
            .one(self.base.db())
            .await?;
        Ok(model.map(|m| m.into()))
    }

    async fn set_intent(
        &self,
        id: Uuid,
        intent_id: String,
        metadata: serde_json::Value,
    ) -> PaymentResult<Transaction> {
        entity::Entity::update_many()
            .col_expr(
                entity::Column::ProcessorIntentId,
                Expr::value(intent_id.clone()),
            )
            .col_expr(entity::Column::Metadata, Expr::value(metadata))
            .col_expr(entity::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::Column::Id.eq(id))
            .exec(self.base.db())
            .await?;

        tracing::debug!(transaction_id = %id, intent_id = %intent_id, "Backfilled processor intent");
        Ok(self.require(id).await?.into())
    }

    async fn set_status(&self, id: Uuid, status: TransactionStatus) -> PaymentResult<Transaction> {
        entity::Entity::update_many()
            .col_expr(entity::Column::Status, Expr::value(status))
            .col_expr(entity::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::Column::Id.eq(id))
            .exec(self.base.db())
            .await?;

        tracing::info!(transaction_id = %id, status = %status, "Transaction status change");
        Ok(self.require(id).await?.into())
    }

    async fn list(&self, limit: u64, offset: u64) -> PaymentResult<Vec<Transaction>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}
