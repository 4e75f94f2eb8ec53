pub use sea_orm_migration::prelude::*;

mod m20250601_000000_bootstrap;
mod m20250601_000001_create_users;
mod m20250601_000002_create_events;
mod m20250601_000003_create_booths;
mod m20250601_000004_create_reservations;
mod m20250601_000005_create_transactions;
mod m20250601_000006_create_invoices;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000000_bootstrap::Migration),
            Box::new(m20250601_000001_create_users::Migration),
            Box::new(m20250601_000002_create_events::Migration),
            Box::new(m20250601_000003_create_booths::Migration),
            Box::new(m20250601_000004_create_reservations::Migration),
            Box::new(m20250601_000005_create_transactions::Migration),
            Box::new(m20250601_000006_create_invoices::Migration),
        ]
    }
}
