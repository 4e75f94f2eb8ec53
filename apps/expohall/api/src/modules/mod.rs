//! Static feature-module registry.
//!
//! Modules are a compile-time table, not filesystem discovery: each entry
//! declares its name, route prefix, flag dependencies, and hooks. A module
//! loads only when its own flag and all its dependencies' flags are enabled;
//! otherwise its prefix answers 503 `MODULE_DISABLED` and none of its
//! services are touched.

pub mod invoicing;
pub mod monitoring;
pub mod payments;
pub mod sales;

use crate::state::AppState;
use axum::Router;
use axum_helpers::errors::handlers::module_disabled;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;

/// A feature module pluggable into the registry
#[async_trait::async_trait]
pub trait FeatureModule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Route prefix the module mounts under, e.g. `/sales`
    fn prefix(&self) -> &'static str;

    /// Names of modules whose flags must also be enabled
    fn depends_on(&self) -> &'static [&'static str] {
        &[]
    }

    /// Build the module's router; state carries every shared service
    fn routes(&self, state: &AppState) -> Router;

    /// Register the module's event-bus handlers
    async fn subscribe(&self, _state: &AppState) {}

    /// One-time schema/data migration hook, run at load.
    ///
    /// Shared tables live in the central migration crate; this is for
    /// module-private backfills. Failure is logged, not fatal.
    async fn migrate(&self, _state: &AppState) -> eyre::Result<()> {
        Ok(())
    }

    /// One-time startup hook; failure is logged, not fatal
    async fn init(&self, _state: &AppState) -> eyre::Result<()> {
        Ok(())
    }

    /// Shutdown hook; failures are tolerated and logged
    async fn shutdown(&self) -> eyre::Result<()> {
        Ok(())
    }
}

/// The compile-time module table, in load order.
///
/// Order matters for dependency checks: a module may only depend on modules
/// listed before it.
fn module_table() -> Vec<Arc<dyn FeatureModule>> {
    vec![
        Arc::new(payments::PaymentsModule),
        Arc::new(sales::SalesModule),
        Arc::new(invoicing::InvoicingModule),
        Arc::new(monitoring::MonitoringModule::new()),
    ]
}

/// Loaded-module bookkeeping for the shutdown path
pub struct ModuleRegistry {
    loaded: Vec<Arc<dyn FeatureModule>>,
}

impl ModuleRegistry {
    /// Wire every enabled module into a combined router.
    ///
    /// Disabled or dependency-blocked modules still own their prefix with a
    /// 503 fallback, so clients get a stable, explicit error instead of 404s.
    pub async fn load(state: &AppState) -> (Self, Router) {
        let mut loaded: Vec<Arc<dyn FeatureModule>> = Vec::new();
        let mut enabled_names: HashSet<&'static str> = HashSet::new();
        let mut router = Router::new();

        for module in module_table() {
            let name = module.name();
            let flag_on = state.config.modules.enabled(name);
            let deps_ok = module
                .depends_on()
                .iter()
                .all(|dep| enabled_names.contains(dep));

            if !flag_on || !deps_ok {
                if flag_on {
                    tracing::warn!(
                        module = name,
                        depends_on = ?module.depends_on(),
                        "Skipping module: dependency flags disabled"
                    );
                } else {
                    tracing::warn!(module = name, "Skipping module: feature flag disabled");
                }
                router = router.nest(
                    module.prefix(),
                    Router::new().fallback(module_disabled),
                );
                continue;
            }

            module.subscribe(state).await;

            if let Err(e) = module.migrate(state).await {
                tracing::error!(module = name, error = %e, "Module migration failed");
            }

            if let Err(e) = module.init(state).await {
                // Routes stay mounted; the module is degraded, not absent
                tracing::error!(module = name, error = %e, "Module init failed");
            }

            router = router.nest(module.prefix(), module.routes(state));
            enabled_names.insert(name);
            tracing::info!(module = name, prefix = module.prefix(), "Module loaded");
            loaded.push(module);
        }

        (Self { loaded }, router)
    }

    /// Run every loaded module's shutdown hook, tolerating failures, and
    /// wait for all of them to settle.
    pub async fn shutdown(&self) {
        let hooks = self.loaded.iter().map(|module| {
            let module = module.clone();
            async move {
                if let Err(e) = module.shutdown().await {
                    tracing::error!(module = module.name(), error = %e, "Module shutdown failed");
                }
            }
        });

        join_all(hooks).await;
        tracing::info!("All modules shut down");
    }

    pub fn loaded_names(&self) -> Vec<&'static str> {
        self.loaded.iter().map(|m| m.name()).collect()
    }
}
