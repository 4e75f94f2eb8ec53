use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(InvoiceStatus::Enum)
                    .values([
                        InvoiceStatus::Draft,
                        InvoiceStatus::Sent,
                        InvoiceStatus::Paid,
                        InvoiceStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(pk_uuid(Invoices::Id))
                    .col(uuid(Invoices::ReservationId))
                    .col(string_uniq(Invoices::Number))
                    .col(big_integer(Invoices::AmountCents))
                    .col(big_integer(Invoices::TaxCents).default(0))
                    .col(big_integer(Invoices::TotalCents))
                    .col(
                        ColumnDef::new(Invoices::Status)
                            .enumeration(
                                InvoiceStatus::Enum,
                                [
                                    InvoiceStatus::Draft,
                                    InvoiceStatus::Sent,
                                    InvoiceStatus::Paid,
                                    InvoiceStatus::Cancelled,
                                ],
                            )
                            .not_null()
                            .default("draft"),
                    )
                    .col(timestamp_with_time_zone_null(Invoices::DueAt))
                    .col(timestamp_with_time_zone_null(Invoices::PaidAt))
                    .col(
                        timestamp_with_time_zone(Invoices::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Invoices::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoices_reservation_id")
                            .from(Invoices::Table, Invoices::ReservationId)
                            .to(Reservations::Table, Reservations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Confirm paths may race; the second writer hits this and reuses the
        // first one's invoice.
        manager
            .create_index(
                Index::create()
                    .name("uq_invoices_reservation")
                    .table(Invoices::Table)
                    .col(Invoices::ReservationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER invoices_touch_updated_at
                    BEFORE UPDATE ON invoices
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS invoices_touch_updated_at ON invoices")
            .await?;

        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(InvoiceStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Invoices {
    Table,
    Id,
    ReservationId,
    Number,
    AmountCents,
    TaxCents,
    TotalCents,
    Status,
    DueAt,
    PaidAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Reservations {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum InvoiceStatus {
    #[sea_orm(iden = "invoice_status")]
    Enum,
    #[sea_orm(iden = "draft")]
    Draft,
    #[sea_orm(iden = "sent")]
    Sent,
    #[sea_orm(iden = "paid")]
    Paid,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
