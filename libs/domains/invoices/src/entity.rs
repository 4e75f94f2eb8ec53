use crate::models::InvoiceStatus;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the invoices table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub reservation_id: Uuid,
    #[sea_orm(unique)]
    pub number: String,
    pub amount_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub status: InvoiceStatus,
    pub due_at: Option<DateTimeWithTimeZone>,
    pub paid_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Invoice {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            reservation_id: model.reservation_id,
            number: model.number,
            amount_cents: model.amount_cents,
            tax_cents: model.tax_cents,
            total_cents: model.total_cents,
            status: model.status,
            due_at: model.due_at.map(Into::into),
            paid_at: model.paid_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl ActiveModel {
    /// Build the insertable row for a freshly issued invoice
    pub fn for_issue(input: crate::models::CreateInvoice, number: String) -> Self {
        ActiveModel {
            id: Set(Uuid::now_v7()),
            reservation_id: Set(input.reservation_id),
            number: Set(number),
            amount_cents: Set(input.amount_cents),
            tax_cents: Set(input.tax_cents),
            total_cents: Set(input.amount_cents + input.tax_cents),
            status: Set(InvoiceStatus::Draft),
            due_at: Set(input.due_at.map(Into::into)),
            paid_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
        }
    }
}
