use axum_helpers::JwtConfig;
use core_config::{app_info, env_flag, env_or_default, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Which payment processor backs the coordinator
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessorMode {
    /// In-memory mock; development and tests
    Mock,
    /// Real HTTP processor
    Remote,
}

/// Payment processor settings
#[derive(Clone, Debug)]
pub struct PaymentConfig {
    pub mode: ProcessorMode,
    pub base_url: String,
    pub secret_key: String,
    /// Shared secret for webhook signature verification
    pub webhook_secret: String,
}

impl FromEnv for PaymentConfig {
    fn from_env() -> Result<Self, core_config::ConfigError> {
        let mode = match env_or_default("PAYMENT_PROCESSOR", "mock").as_str() {
            "remote" => ProcessorMode::Remote,
            _ => ProcessorMode::Mock,
        };

        let (base_url, secret_key) = if mode == ProcessorMode::Remote {
            (
                core_config::env_required("PAYMENT_PROCESSOR_URL")?,
                core_config::env_required("PAYMENT_PROCESSOR_SECRET_KEY")?,
            )
        } else {
            (String::new(), String::new())
        };

        Ok(Self {
            mode,
            base_url,
            secret_key,
            webhook_secret: core_config::env_required("PAYMENT_WEBHOOK_SECRET")?,
        })
    }
}

/// Whether outbound email goes through SMTP or the capture-only mock
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmailMode {
    Mock,
    Smtp,
}

/// Feature flags for the module registry.
///
/// Every module defaults to enabled; `MODULE_<NAME>_ENABLED=false` switches
/// one off.
#[derive(Clone, Debug)]
pub struct ModuleFlags {
    flags: Vec<(&'static str, bool)>,
}

impl ModuleFlags {
    pub fn from_env() -> Self {
        let read = |name: &str| {
            env_flag(
                &format!("MODULE_{}_ENABLED", name.to_uppercase()),
                true,
            )
        };

        Self {
            flags: vec![
                ("sales", read("sales")),
                ("payments", read("payments")),
                ("invoicing", read("invoicing")),
                ("monitoring", read("monitoring")),
            ],
        }
    }

    /// For tests and tooling: explicit flag set
    pub fn fixed(flags: Vec<(&'static str, bool)>) -> Self {
        Self { flags }
    }

    pub fn enabled(&self, name: &str) -> bool {
        self.flags
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, enabled)| *enabled)
            .unwrap_or(false)
    }
}

/// Application configuration composed from shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub jwt: JwtConfig,
    pub payment: PaymentConfig,
    pub email_mode: EmailMode,
    pub modules: ModuleFlags,
    /// Cron expression for the reservation expiry sweep
    pub sweep_schedule: String,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let database = PostgresConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;
        let payment = PaymentConfig::from_env()?;

        let email_mode = match env_or_default("EMAIL_PROVIDER", "mock").as_str() {
            "smtp" => EmailMode::Smtp,
            _ => EmailMode::Mock,
        };

        Ok(Self {
            app: app_info!(),
            server,
            database,
            jwt,
            payment,
            email_mode,
            modules: ModuleFlags::from_env(),
            sweep_schedule: env_or_default("RESERVATION_SWEEP_SCHEDULE", "0 * * * * *"),
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_flags_default_on_and_unknown_off() {
        let flags = ModuleFlags::fixed(vec![("sales", true), ("payments", false)]);
        assert!(flags.enabled("sales"));
        assert!(!flags.enabled("payments"));
        assert!(!flags.enabled("costing"));
    }
}
