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
                    .as_enum(TransactionStatus::Enum)
                    .values([
                        TransactionStatus::Pending,
                        TransactionStatus::Completed,
                        TransactionStatus::Failed,
                        TransactionStatus::Refunded,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(pk_uuid(Transactions::Id))
                    .col(uuid(Transactions::ReservationId))
                    .col(big_integer(Transactions::AmountCents))
                    .col(string(Transactions::Currency).default("usd"))
                    .col(
                        ColumnDef::new(Transactions::Status)
                            .enumeration(
                                TransactionStatus::Enum,
                                [
                                    TransactionStatus::Pending,
                                    TransactionStatus::Completed,
                                    TransactionStatus::Failed,
                                    TransactionStatus::Refunded,
                                ],
                            )
                            .not_null()
                            .default("pending"),
                    )
                    .col(string_null(Transactions::ProcessorIntentId))
                    .col(json_binary(Transactions::Metadata).default("{}"))
                    .col(
                        timestamp_with_time_zone(Transactions::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Transactions::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_reservation_id")
                            .from(Transactions::Table, Transactions::ReservationId)
                            .to(Reservations::Table, Reservations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One transaction per reservation; retries reuse or backfill the
        // existing row rather than inserting a sibling.
        manager
            .create_index(
                Index::create()
                    .name("uq_transactions_reservation")
                    .table(Transactions::Table)
                    .col(Transactions::ReservationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_transactions_processor_intent")
                    .table(Transactions::Table)
                    .col(Transactions::ProcessorIntentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER transactions_touch_updated_at
                    BEFORE UPDATE ON transactions
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
            .execute_unprepared(
                "DROP TRIGGER IF EXISTS transactions_touch_updated_at ON transactions",
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TransactionStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    ReservationId,
    AmountCents,
    Currency,
    Status,
    ProcessorIntentId,
    Metadata,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Reservations {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum TransactionStatus {
    #[sea_orm(iden = "transaction_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "failed")]
    Failed,
    #[sea_orm(iden = "refunded")]
    Refunded,
}
