use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use axum_helpers::{ApiResponse, UuidPath};
use serde::Deserialize;

use crate::error::InvoiceResult;
use crate::models::{InvoiceResponse, InvoiceStatus};
use crate::service::InvoiceService;

/// Admin invoice endpoints; mounted by the invoicing module
pub fn admin_router(service: InvoiceService) -> Router {
    Router::new()
        .route("/", get(list_invoices))
        .route("/{id}", get(get_invoice))
        .route("/{id}/send", post(send_invoice))
        .route("/{id}/cancel", post(cancel_invoice))
        .with_state(service)
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct InvoiceListQuery {
    pub status: Option<InvoiceStatus>,
}

/// List invoices with optional status filter
#[utoipa::path(
    get,
    path = "",
    tag = "invoices",
    params(InvoiceListQuery),
    responses((status = 200, description = "Invoices", body = Vec<InvoiceResponse>))
)]
pub async fn list_invoices(
    State(service): State<InvoiceService>,
    Query(query): Query<InvoiceListQuery>,
) -> InvoiceResult<impl IntoResponse> {
    let invoices = service.list_invoices(query.status).await?;
    let invoices: Vec<InvoiceResponse> = invoices.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok(invoices))
}

/// Fetch one invoice
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "invoices",
    params(("id" = String, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice", body = InvoiceResponse),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn get_invoice(
    State(service): State<InvoiceService>,
    UuidPath(id): UuidPath,
) -> InvoiceResult<impl IntoResponse> {
    let invoice = service.get_invoice(id).await?;
    Ok(ApiResponse::ok(InvoiceResponse::from(invoice)))
}

/// Move a draft invoice to sent
#[utoipa::path(
    post,
    path = "/{id}/send",
    tag = "invoices",
    params(("id" = String, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice sent", body = InvoiceResponse),
        (status = 409, description = "Invoice is not a draft")
    )
)]
pub async fn send_invoice(
    State(service): State<InvoiceService>,
    UuidPath(id): UuidPath,
) -> InvoiceResult<impl IntoResponse> {
    let invoice = service.mark_sent(id).await?;
    Ok(ApiResponse::ok(InvoiceResponse::from(invoice)))
}

/// Cancel an unpaid invoice
#[utoipa::path(
    post,
    path = "/{id}/cancel",
    tag = "invoices",
    params(("id" = String, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice cancelled", body = InvoiceResponse),
        (status = 409, description = "Invoice already paid")
    )
)]
pub async fn cancel_invoice(
    State(service): State<InvoiceService>,
    UuidPath(id): UuidPath,
) -> InvoiceResult<impl IntoResponse> {
    let invoice = service.cancel(id).await?;
    Ok(ApiResponse::ok(InvoiceResponse::from(invoice)))
}
