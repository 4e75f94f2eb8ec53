use crate::models::TransactionStatus;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the transactions table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub amount_cents: i64,
    pub currency: String,
    pub status: TransactionStatus,
    pub processor_intent_id: Option<String>,
    pub metadata: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Transaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            reservation_id: model.reservation_id,
            amount_cents: model.amount_cents,
            currency: model.currency,
            status: model.status,
            processor_intent_id: model.processor_intent_id,
            metadata: model.metadata,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl ActiveModel {
    /// Build the insertable row for a new pending transaction
    pub fn for_reservation(
        reservation_id: Uuid,
        amount_cents: i64,
        currency: String,
    ) -> Self {
        ActiveModel {
            id: Set(Uuid::now_v7()),
            reservation_id: Set(reservation_id),
            amount_cents: Set(amount_cents),
            currency: Set(currency),
            status: Set(TransactionStatus::Pending),
            processor_intent_id: Set(None),
            metadata: Set(serde_json::json!({})),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
        }
    }
}
