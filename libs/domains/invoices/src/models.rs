use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Invoice lifecycle: draft → sent → paid, or cancelled on unwind
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "sent")]
    Sent,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Invoice domain model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Invoice {
    pub id: Uuid,
    pub reservation_id: Uuid,
    /// Human-facing unique number, `INV-...`
    pub number: String,
    pub amount_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub status: InvoiceStatus,
    pub due_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating an invoice
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateInvoice {
    pub reservation_id: Uuid,
    #[validate(range(min = 0))]
    pub amount_cents: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub tax_cents: i64,
    pub due_at: Option<DateTime<Utc>>,
}

/// DTO for invoice responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub number: String,
    pub amount_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub status: InvoiceStatus,
    pub due_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            reservation_id: invoice.reservation_id,
            number: invoice.number,
            amount_cents: invoice.amount_cents,
            tax_cents: invoice.tax_cents,
            total_cents: invoice.total_cents,
            status: invoice.status,
            due_at: invoice.due_at,
            paid_at: invoice.paid_at,
        }
    }
}
