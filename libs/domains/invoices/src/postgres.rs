use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::BaseRepository;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::InvoiceResult,
    models::{CreateInvoice, Invoice, InvoiceStatus},
    repository::InvoiceRepository,
};

pub struct PgInvoiceRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgInvoiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    async fn create(&self, input: CreateInvoice, number: String) -> InvoiceResult<Invoice> {
        let active_model = entity::ActiveModel::for_issue(input, number);
        let model = self.base.insert(active_model).await?;

        tracing::info!(invoice_id = %model.id, number = %model.number, "Issued invoice");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> InvoiceResult<Option<Invoice>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn find_by_reservation(&self, reservation_id: Uuid) -> InvoiceResult<Option<Invoice>> {
        let model = entity::Entity::find()
            .filter(entity::Column::ReservationId.eq(reservation_id))
            .one(self.base.db())
            .await?;
        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, status: Option<InvoiceStatus>) -> InvoiceResult<Vec<Invoice>> {
        let mut query = entity::Entity::find();

        if let Some(status) = status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        let models = query
            .order_by_desc(entity::Column::CreatedAt)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: InvoiceStatus,
        paid_at: Option<DateTime<Utc>>,
    ) -> InvoiceResult<Option<Invoice>> {
        let mut update = entity::Entity::update_many()
            .col_expr(entity::Column::Status, Expr::value(status))
            .col_expr(entity::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::Column::Id.eq(id));

        if let Some(paid_at) = paid_at {
            update = update.col_expr(entity::Column::PaidAt, Expr::value(paid_at));
        }

        let result = update.exec(self.base.db()).await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        let model = self.base.find_by_id(id).await?;
        Ok(model.map(|m| m.into()))
    }
}
