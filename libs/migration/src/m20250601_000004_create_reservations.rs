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
                    .as_enum(ReservationStatus::Enum)
                    .values([
                        ReservationStatus::Pending,
                        ReservationStatus::Confirmed,
                        ReservationStatus::Cancelled,
                        ReservationStatus::Expired,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(pk_uuid(Reservations::Id))
                    .col(uuid(Reservations::BoothId))
                    .col(uuid(Reservations::EventId))
                    .col(uuid(Reservations::ExhibitorId))
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .enumeration(
                                ReservationStatus::Enum,
                                [
                                    ReservationStatus::Pending,
                                    ReservationStatus::Confirmed,
                                    ReservationStatus::Cancelled,
                                    ReservationStatus::Expired,
                                ],
                            )
                            .not_null()
                            .default("pending"),
                    )
                    .col(timestamp_with_time_zone_null(Reservations::ExpiresAt))
                    .col(timestamp_with_time_zone_null(Reservations::ConfirmedAt))
                    .col(
                        timestamp_with_time_zone(Reservations::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Reservations::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_booth_id")
                            .from(Reservations::Table, Reservations::BoothId)
                            .to(Booths::Table, Booths::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_event_id")
                            .from(Reservations::Table, Reservations::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_exhibitor_id")
                            .from(Reservations::Table, Reservations::ExhibitorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one confirmed reservation may ever exist per booth. Pending
        // holds cannot share the same guard because expiry is decided lazily
        // at read time; they are serialized by the engine's row-locking
        // transaction instead.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX uq_reservations_booth_confirmed
                    ON reservations (booth_id)
                    WHERE status = 'confirmed'
                "#,
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_booth_status")
                    .table(Reservations::Table)
                    .col(Reservations::BoothId)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_exhibitor")
                    .table(Reservations::Table)
                    .col(Reservations::ExhibitorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_expires_at")
                    .table(Reservations::Table)
                    .col(Reservations::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER reservations_touch_updated_at
                    BEFORE UPDATE ON reservations
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
                "DROP TRIGGER IF EXISTS reservations_touch_updated_at ON reservations",
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ReservationStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Reservations {
    Table,
    Id,
    BoothId,
    EventId,
    ExhibitorId,
    Status,
    ExpiresAt,
    ConfirmedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Booths {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum ReservationStatus {
    #[sea_orm(iden = "reservation_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "confirmed")]
    Confirmed,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
    #[sea_orm(iden = "expired")]
    Expired,
}
