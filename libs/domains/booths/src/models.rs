use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Booth availability state; owned by the Booth Store
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booth_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BoothStatus {
    #[default]
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "reserved")]
    Reserved,
    #[sea_orm(string_value = "booked")]
    Booked,
    #[sea_orm(string_value = "unavailable")]
    Unavailable,
}

/// Booth size category
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booth_size")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BoothSize {
    #[sea_orm(string_value = "small")]
    Small,
    #[default]
    #[sea_orm(string_value = "standard")]
    Standard,
    #[sea_orm(string_value = "large")]
    Large,
    #[sea_orm(string_value = "premium")]
    Premium,
}

/// Booth domain model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Booth {
    pub id: Uuid,
    pub event_id: Uuid,
    /// Display number, unique within the event
    pub number: String,
    pub size: BoothSize,
    pub price_cents: i64,
    pub status: BoothStatus,
    pub position_x: i32,
    pub position_y: i32,
    pub width: i32,
    pub height: i32,
    pub description: String,
    pub amenities: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a booth
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBooth {
    pub event_id: Uuid,
    #[validate(length(min = 1, max = 32))]
    pub number: String,
    #[serde(default)]
    pub size: BoothSize,
    #[validate(range(min = 0))]
    pub price_cents: i64,
    #[serde(default)]
    pub position_x: i32,
    #[serde(default)]
    pub position_y: i32,
    #[serde(default = "default_dimension")]
    pub width: i32,
    #[serde(default = "default_dimension")]
    pub height: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: String,
}

fn default_dimension() -> i32 {
    1
}

/// DTO for admin booth updates.
///
/// Status is deliberately absent: status only moves through the store's
/// transition operation.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBooth {
    #[validate(length(min = 1, max = 32))]
    pub number: Option<String>,
    pub size: Option<BoothSize>,
    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,
    pub position_x: Option<i32>,
    pub position_y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub description: Option<String>,
    pub amenities: Option<String>,
}

/// Filters for the availability listing
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct AvailableBoothFilter {
    pub event_id: Uuid,
    pub size: Option<BoothSize>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

/// DTO for booth responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoothResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub number: String,
    pub size: BoothSize,
    pub price_cents: i64,
    pub status: BoothStatus,
    pub description: String,
    pub amenities: String,
}

impl From<Booth> for BoothResponse {
    fn from(booth: Booth) -> Self {
        Self {
            id: booth.id,
            event_id: booth.event_id,
            number: booth.number,
            size: booth.size,
            price_cents: booth.price_cents,
            status: booth.status,
            description: booth.description,
            amenities: booth.amenities,
        }
    }
}

impl Booth {
    pub fn apply_update(&mut self, update: UpdateBooth) {
        if let Some(number) = update.number {
            self.number = number;
        }
        if let Some(size) = update.size {
            self.size = size;
        }
        if let Some(price_cents) = update.price_cents {
            self.price_cents = price_cents;
        }
        if let Some(position_x) = update.position_x {
            self.position_x = position_x;
        }
        if let Some(position_y) = update.position_y {
            self.position_y = position_y;
        }
        if let Some(width) = update.width {
            self.width = width;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(amenities) = update.amenities {
            self.amenities = amenities;
        }
        self.updated_at = chrono::Utc::now();
    }
}

/// A booth's place on the floor plan grid
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BoothPlacement {
    pub booth_id: Uuid,
    pub label: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Floor plan domain model.
///
/// Only a derived view for rendering; never authoritative for booth status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FloorPlan {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub grid_width: i32,
    pub grid_height: i32,
    pub cell_size: i32,
    pub placements: Vec<BoothPlacement>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a floor plan
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFloorPlan {
    pub event_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 1, max = 512))]
    pub grid_width: i32,
    #[validate(range(min = 1, max = 512))]
    pub grid_height: i32,
    #[serde(default = "default_cell_size")]
    #[validate(range(min = 4, max = 256))]
    pub cell_size: i32,
    #[serde(default)]
    pub placements: Vec<BoothPlacement>,
}

fn default_cell_size() -> i32 {
    40
}
