//! OpenAPI documentation assembled from the domain handlers

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Expohall booking API",
        description = "Booth booking backend: browse availability, hold a booth, pay, get your invoice.",
        version = env!("CARGO_PKG_VERSION"),
    ),
    paths(
        domain_users::handlers::register,
        domain_users::handlers::login,
        domain_users::handlers::me,
        domain_users::handlers::list_users,
        domain_users::handlers::get_user,
        domain_users::handlers::update_user,
        domain_users::handlers::deactivate_user,
        domain_events::handlers::list_public_events,
        domain_events::handlers::list_events,
        domain_events::handlers::get_event,
        domain_events::handlers::create_event,
        domain_events::handlers::update_event,
        domain_events::handlers::delete_event,
        domain_booths::handlers::available_booths,
        domain_booths::handlers::floor_plan_svg,
        domain_booths::handlers::list_booths,
        domain_booths::handlers::get_booth,
        domain_booths::handlers::create_booth,
        domain_booths::handlers::update_booth,
        domain_booths::handlers::delete_booth,
        domain_booths::handlers::create_floor_plan,
        domain_reservations::handlers::reserve_booth,
        domain_reservations::handlers::my_reservations,
        domain_reservations::handlers::cancel_reservation,
        domain_reservations::handlers::list_reservations,
        domain_reservations::handlers::get_reservation,
        domain_payments::handlers::purchase,
        domain_payments::handlers::confirm_payment,
        domain_payments::handlers::payment_webhook,
        domain_payments::handlers::list_transactions,
        domain_invoices::handlers::list_invoices,
        domain_invoices::handlers::get_invoice,
        domain_invoices::handlers::send_invoice,
        domain_invoices::handlers::cancel_invoice,
    ),
    components(schemas(
        axum_helpers::ErrorResponse,
        axum_helpers::ErrorBody,
        axum_helpers::ErrorCode,
        domain_users::models::UserRole,
        domain_users::models::RegisterUser,
        domain_users::models::LoginRequest,
        domain_users::models::UpdateUser,
        domain_users::models::AuthTokens,
        domain_users::models::UserResponse,
        domain_events::models::EventStatus,
        domain_events::models::CreateEvent,
        domain_events::models::UpdateEvent,
        domain_events::models::EventResponse,
        domain_booths::models::BoothStatus,
        domain_booths::models::BoothSize,
        domain_booths::models::CreateBooth,
        domain_booths::models::UpdateBooth,
        domain_booths::models::BoothResponse,
        domain_booths::models::BoothPlacement,
        domain_booths::models::CreateFloorPlan,
        domain_reservations::models::ReservationStatus,
        domain_reservations::models::ReserveBooth,
        domain_reservations::models::ReservationResponse,
        domain_payments::models::TransactionStatus,
        domain_payments::models::PurchaseRequest,
        domain_payments::models::ConfirmPaymentRequest,
        domain_payments::models::PaymentIntentResponse,
        domain_payments::models::TransactionResponse,
        domain_payments::service::ConfirmOutcome,
        domain_invoices::models::InvoiceStatus,
        domain_invoices::models::InvoiceResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "User profile and administration"),
        (name = "events", description = "Exhibition events"),
        (name = "events-admin", description = "Exhibition event administration"),
        (name = "sales", description = "Booth browsing, holds, and purchase"),
        (name = "payments", description = "Webhook ingestion and transactions"),
        (name = "invoices", description = "Invoice administration"),
        (name = "booths-admin", description = "Booth administration"),
        (name = "reservations-admin", description = "Reservation administration"),
    )
)]
pub struct ApiDoc;
