//! Sea-ORM entities for the booths and floor_plans tables

pub mod booths {
    use crate::models::{BoothSize, BoothStatus};
    use sea_orm::entity::prelude::*;
    use sea_orm::ActiveValue::Set;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "booths")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub event_id: Uuid,
        pub number: String,
        pub size: BoothSize,
        pub price_cents: i64,
        pub status: BoothStatus,
        pub position_x: i32,
        pub position_y: i32,
        pub width: i32,
        pub height: i32,
        #[sea_orm(column_type = "Text")]
        pub description: String,
        #[sea_orm(column_type = "Text")]
        pub amenities: String,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Booth {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                event_id: model.event_id,
                number: model.number,
                size: model.size,
                price_cents: model.price_cents,
                status: model.status,
                position_x: model.position_x,
                position_y: model.position_y,
                width: model.width,
                height: model.height,
                description: model.description,
                amenities: model.amenities,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }
        }
    }

    impl From<crate::models::CreateBooth> for ActiveModel {
        fn from(input: crate::models::CreateBooth) -> Self {
            ActiveModel {
                id: Set(Uuid::now_v7()),
                event_id: Set(input.event_id),
                number: Set(input.number),
                size: Set(input.size),
                price_cents: Set(input.price_cents),
                status: Set(BoothStatus::Available),
                position_x: Set(input.position_x),
                position_y: Set(input.position_y),
                width: Set(input.width),
                height: Set(input.height),
                description: Set(input.description),
                amenities: Set(input.amenities),
                created_at: Set(chrono::Utc::now().into()),
                updated_at: Set(chrono::Utc::now().into()),
            }
        }
    }
}

pub mod floor_plans {
    use sea_orm::entity::prelude::*;
    use sea_orm::ActiveValue::Set;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "floor_plans")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub event_id: Uuid,
        pub name: String,
        pub grid_width: i32,
        pub grid_height: i32,
        pub cell_size: i32,
        pub placements: Json,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::FloorPlan {
        fn from(model: Model) -> Self {
            let placements =
                serde_json::from_value(model.placements.clone()).unwrap_or_default();
            Self {
                id: model.id,
                event_id: model.event_id,
                name: model.name,
                grid_width: model.grid_width,
                grid_height: model.grid_height,
                cell_size: model.cell_size,
                placements,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }
        }
    }

    impl From<crate::models::CreateFloorPlan> for ActiveModel {
        fn from(input: crate::models::CreateFloorPlan) -> Self {
            ActiveModel {
                id: Set(Uuid::now_v7()),
                event_id: Set(input.event_id),
                name: Set(input.name),
                grid_width: Set(input.grid_width),
                grid_height: Set(input.grid_height),
                cell_size: Set(input.cell_size),
                placements: Set(serde_json::to_value(&input.placements)
                    .unwrap_or(serde_json::Value::Array(vec![]))),
                created_at: Set(chrono::Utc::now().into()),
                updated_at: Set(chrono::Utc::now().into()),
            }
        }
    }
}
