use crate::models::ReservationStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the reservations table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub booth_id: Uuid,
    pub event_id: Uuid,
    pub exhibitor_id: Uuid,
    pub status: ReservationStatus,
    pub expires_at: Option<DateTimeWithTimeZone>,
    pub confirmed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Reservation {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            booth_id: model.booth_id,
            event_id: model.event_id,
            exhibitor_id: model.exhibitor_id,
            status: model.status,
            expires_at: model.expires_at.map(Into::into),
            confirmed_at: model.confirmed_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
