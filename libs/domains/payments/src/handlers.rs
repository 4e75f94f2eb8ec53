use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use axum_helpers::{ApiResponse, ValidatedJson};
use domain_users::CurrentUser;
use serde::Deserialize;

use crate::error::{PaymentError, PaymentResult};
use crate::models::{
    ConfirmPaymentRequest, PaymentIntentResponse, PurchaseRequest, TransactionResponse,
    WebhookEvent,
};
use crate::service::{ConfirmOutcome, PaymentCoordinator};
use crate::webhook::WebhookVerifier;

/// Exhibitor-facing purchase endpoints; mounted by the sales module
pub fn sales_router(coordinator: PaymentCoordinator) -> Router {
    Router::new()
        .route("/purchase", post(purchase))
        .route("/confirm-payment", post(confirm_payment))
        .with_state(coordinator)
}

/// Webhook ingestion; unauthenticated but signature-gated
pub fn webhook_router(coordinator: PaymentCoordinator, verifier: WebhookVerifier) -> Router {
    Router::new()
        .route("/webhook", post(payment_webhook))
        .with_state((coordinator, verifier))
}

/// Admin transaction listing
pub fn admin_router(coordinator: PaymentCoordinator) -> Router {
    Router::new()
        .route("/transactions", get(list_transactions))
        .with_state(coordinator)
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct TransactionListQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

/// Create or reuse the payment intent for a held reservation
#[utoipa::path(
    post,
    path = "/purchase",
    tag = "sales",
    request_body = PurchaseRequest,
    responses(
        (status = 200, description = "Payment intent ready", body = PaymentIntentResponse),
        (status = 400, description = "Hold expired or reservation not pending"),
        (status = 403, description = "Not the reservation owner"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn purchase(
    State(coordinator): State<PaymentCoordinator>,
    current: CurrentUser,
    ValidatedJson(input): ValidatedJson<PurchaseRequest>,
) -> PaymentResult<impl IntoResponse> {
    let owner = coordinator.reservation_owner(input.reservation_id).await?;
    if owner != current.id && !current.is_admin() {
        return Err(PaymentError::Forbidden(
            "Only the reservation owner may pay for it".to_string(),
        ));
    }

    let response = coordinator
        .create_intent(input.reservation_id, &current.email, &current.name)
        .await?;
    Ok(ApiResponse::ok(response))
}

/// Synchronous confirm path: the client reports the intent as completed and
/// the server verifies with the processor before finalizing.
#[utoipa::path(
    post,
    path = "/confirm-payment",
    tag = "sales",
    request_body = ConfirmPaymentRequest,
    responses(
        (status = 200, description = "Booking finalized", body = ConfirmOutcome),
        (status = 400, description = "Processor does not report success"),
        (status = 404, description = "Unknown payment intent")
    )
)]
pub async fn confirm_payment(
    State(coordinator): State<PaymentCoordinator>,
    current: CurrentUser,
    ValidatedJson(input): ValidatedJson<ConfirmPaymentRequest>,
) -> PaymentResult<impl IntoResponse> {
    let tx = coordinator
        .transaction_by_intent(&input.payment_intent_id)
        .await?;
    let owner = coordinator.reservation_owner(tx.reservation_id).await?;
    if owner != current.id && !current.is_admin() {
        return Err(PaymentError::Forbidden(
            "Only the reservation owner may confirm this payment".to_string(),
        ));
    }

    let outcome = coordinator
        .confirm_from_processor(&input.payment_intent_id)
        .await?;
    Ok(ApiResponse::ok(outcome))
}

/// Processor webhook: raw body plus `X-Processor-Signature` header.
///
/// Signature failures are 400 and touch no state. Handler failures after a
/// valid signature return 500 so the processor retries delivery.
#[utoipa::path(
    post,
    path = "/webhook",
    tag = "payments",
    request_body = Vec<u8>,
    responses(
        (status = 200, description = "Event processed or acknowledged"),
        (status = 400, description = "Missing/invalid signature or malformed payload")
    )
)]
pub async fn payment_webhook(
    State((coordinator, verifier)): State<(PaymentCoordinator, WebhookVerifier)>,
    headers: HeaderMap,
    body: Bytes,
) -> PaymentResult<impl IntoResponse> {
    let signature = headers
        .get("x-processor-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or(PaymentError::InvalidSignature)?;

    verifier.verify(signature, &body)?;

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| PaymentError::InvalidPayload(e.to_string()))?;

    coordinator.handle_webhook_event(event).await?;
    Ok(StatusCode::OK)
}

/// List transactions (admin)
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "payments",
    params(TransactionListQuery),
    responses((status = 200, description = "Transactions", body = Vec<TransactionResponse>))
)]
pub async fn list_transactions(
    State(coordinator): State<PaymentCoordinator>,
    Query(query): Query<TransactionListQuery>,
) -> PaymentResult<impl IntoResponse> {
    let transactions = coordinator
        .list_transactions(query.limit, query.offset)
        .await?;
    let transactions: Vec<TransactionResponse> =
        transactions.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok(transactions))
}
