use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Transaction lifecycle
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

/// Transaction domain model.
///
/// Amount and currency are snapshots taken at intent creation so later booth
/// price edits cannot change what the exhibitor is charged.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub amount_cents: i64,
    pub currency: String,
    pub status: TransactionStatus,
    pub processor_intent_id: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// The client-side confirmation secret stashed at intent creation
    pub fn client_secret(&self) -> Option<String> {
        self.metadata
            .get("client_secret")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

/// DTO for starting payment on a reservation
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PurchaseRequest {
    pub reservation_id: Uuid,
}

/// DTO for the synchronous confirm path
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ConfirmPaymentRequest {
    #[validate(length(min = 1, max = 255))]
    pub payment_intent_id: String,
}

/// Everything the client needs to complete payment externally
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentIntentResponse {
    pub payment_intent_id: String,
    pub client_secret: Option<String>,
    pub amount_cents: i64,
    pub currency: String,
}

/// DTO for transaction responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub amount_cents: i64,
    pub currency: String,
    pub status: TransactionStatus,
    pub processor_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            reservation_id: tx.reservation_id,
            amount_cents: tx.amount_cents,
            currency: tx.currency,
            status: tx.status,
            processor_intent_id: tx.processor_intent_id,
            created_at: tx.created_at,
        }
    }
}

/// Inbound processor webhook payload
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    pub intent_id: String,
    #[serde(default)]
    pub reason: Option<String>,
}
