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
                    .as_enum(BoothStatus::Enum)
                    .values([
                        BoothStatus::Available,
                        BoothStatus::Reserved,
                        BoothStatus::Booked,
                        BoothStatus::Unavailable,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(BoothSize::Enum)
                    .values([
                        BoothSize::Small,
                        BoothSize::Standard,
                        BoothSize::Large,
                        BoothSize::Premium,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Booths::Table)
                    .if_not_exists()
                    .col(pk_uuid(Booths::Id))
                    .col(uuid(Booths::EventId))
                    .col(string(Booths::Number))
                    .col(
                        ColumnDef::new(Booths::Size)
                            .enumeration(
                                BoothSize::Enum,
                                [
                                    BoothSize::Small,
                                    BoothSize::Standard,
                                    BoothSize::Large,
                                    BoothSize::Premium,
                                ],
                            )
                            .not_null()
                            .default("standard"),
                    )
                    .col(big_integer(Booths::PriceCents))
                    .col(
                        ColumnDef::new(Booths::Status)
                            .enumeration(
                                BoothStatus::Enum,
                                [
                                    BoothStatus::Available,
                                    BoothStatus::Reserved,
                                    BoothStatus::Booked,
                                    BoothStatus::Unavailable,
                                ],
                            )
                            .not_null()
                            .default("available"),
                    )
                    .col(integer(Booths::PositionX).default(0))
                    .col(integer(Booths::PositionY).default(0))
                    .col(integer(Booths::Width).default(1))
                    .col(integer(Booths::Height).default(1))
                    .col(text(Booths::Description).default(""))
                    .col(text(Booths::Amenities).default(""))
                    .col(
                        timestamp_with_time_zone(Booths::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Booths::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booths_event_id")
                            .from(Booths::Table, Booths::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A booth number is unique within its event
        manager
            .create_index(
                Index::create()
                    .name("uq_booths_event_number")
                    .table(Booths::Table)
                    .col(Booths::EventId)
                    .col(Booths::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booths_event_status")
                    .table(Booths::Table)
                    .col(Booths::EventId)
                    .col(Booths::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER booths_touch_updated_at
                    BEFORE UPDATE ON booths
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FloorPlans::Table)
                    .if_not_exists()
                    .col(pk_uuid(FloorPlans::Id))
                    .col(uuid(FloorPlans::EventId))
                    .col(string(FloorPlans::Name))
                    .col(integer(FloorPlans::GridWidth))
                    .col(integer(FloorPlans::GridHeight))
                    .col(integer(FloorPlans::CellSize).default(40))
                    .col(json_binary(FloorPlans::Placements).default("[]"))
                    .col(
                        timestamp_with_time_zone(FloorPlans::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(FloorPlans::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_floor_plans_event_id")
                            .from(FloorPlans::Table, FloorPlans::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER floor_plans_touch_updated_at
                    BEFORE UPDATE ON floor_plans
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
                "DROP TRIGGER IF EXISTS floor_plans_touch_updated_at ON floor_plans",
            )
            .await?;

        manager
            .drop_table(Table::drop().table(FloorPlans::Table).to_owned())
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS booths_touch_updated_at ON booths")
            .await?;

        manager
            .drop_table(Table::drop().table(Booths::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BoothSize::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BoothStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Booths {
    Table,
    Id,
    EventId,
    Number,
    Size,
    PriceCents,
    Status,
    PositionX,
    PositionY,
    Width,
    Height,
    Description,
    Amenities,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FloorPlans {
    Table,
    Id,
    EventId,
    Name,
    GridWidth,
    GridHeight,
    CellSize,
    Placements,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum BoothStatus {
    #[sea_orm(iden = "booth_status")]
    Enum,
    #[sea_orm(iden = "available")]
    Available,
    #[sea_orm(iden = "reserved")]
    Reserved,
    #[sea_orm(iden = "booked")]
    Booked,
    #[sea_orm(iden = "unavailable")]
    Unavailable,
}

#[derive(DeriveIden)]
enum BoothSize {
    #[sea_orm(iden = "booth_size")]
    Enum,
    #[sea_orm(iden = "small")]
    Small,
    #[sea_orm(iden = "standard")]
    Standard,
    #[sea_orm(iden = "large")]
    Large,
    #[sea_orm(iden = "premium")]
    Premium,
}
