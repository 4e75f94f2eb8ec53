//! Monitoring module: Prometheus counters fed by bus events.

use super::FeatureModule;
use crate::state::AppState;
use axum::{routing::get, Router};
use event_bus::topics;
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct MonitoringModule {
    handle: Option<PrometheusHandle>,
}

impl MonitoringModule {
    pub fn new() -> Self {
        // A second install (tests, restarts within one process) is fine; the
        // endpoint just reports unavailable.
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| tracing::warn!(error = %e, "Prometheus recorder already installed"))
            .ok();

        Self { handle }
    }
}

#[async_trait::async_trait]
impl FeatureModule for MonitoringModule {
    fn name(&self) -> &'static str {
        "monitoring"
    }

    fn prefix(&self) -> &'static str {
        "/monitoring"
    }

    fn routes(&self, _state: &AppState) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let handle = handle.clone();
                async move {
                    match handle {
                        Some(handle) => handle.render(),
                        None => "# metrics recorder unavailable\n".to_string(),
                    }
                }
            }),
        )
    }

    async fn subscribe(&self, state: &AppState) {
        let count = |topic: &'static str, metric: &'static str| {
            let bus = state.bus.clone();
            async move {
                bus.subscribe(topic, "monitoring", move |_| async move {
                    counter!(metric).increment(1);
                    Ok(())
                })
                .await;
            }
        };

        count(topics::BOOTH_RESERVED, "booth_reservations_total").await;
        count(topics::BOOTH_BOOKED, "booth_bookings_total").await;
        count(topics::BOOTH_RELEASED, "booth_releases_total").await;
        count(topics::RESERVATION_EXPIRED, "reservation_expiries_total").await;
        count(topics::PAYMENT_COMPLETED, "payments_completed_total").await;
        count(topics::PAYMENT_FAILED, "payments_failed_total").await;
    }
}
