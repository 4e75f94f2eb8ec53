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
                    .as_enum(EventStatus::Enum)
                    .values([
                        EventStatus::Draft,
                        EventStatus::Published,
                        EventStatus::Active,
                        EventStatus::Completed,
                        EventStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(pk_uuid(Events::Id))
                    .col(string(Events::Name))
                    .col(text(Events::Description).default(""))
                    .col(timestamp_with_time_zone(Events::StartsAt))
                    .col(timestamp_with_time_zone(Events::EndsAt))
                    .col(string(Events::Venue))
                    .col(
                        ColumnDef::new(Events::Status)
                            .enumeration(
                                EventStatus::Enum,
                                [
                                    EventStatus::Draft,
                                    EventStatus::Published,
                                    EventStatus::Active,
                                    EventStatus::Completed,
                                    EventStatus::Cancelled,
                                ],
                            )
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        timestamp_with_time_zone(Events::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Events::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Event windows must be non-empty
        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE events ADD CONSTRAINT chk_events_window CHECK (starts_at < ends_at)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_status")
                    .table(Events::Table)
                    .col(Events::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER events_touch_updated_at
                    BEFORE UPDATE ON events
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
            .execute_unprepared("DROP TRIGGER IF EXISTS events_touch_updated_at ON events")
            .await?;

        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(EventStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Name,
    Description,
    StartsAt,
    EndsAt,
    Venue,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EventStatus {
    #[sea_orm(iden = "event_status")]
    Enum,
    #[sea_orm(iden = "draft")]
    Draft,
    #[sea_orm(iden = "published")]
    Published,
    #[sea_orm(iden = "active")]
    Active,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
