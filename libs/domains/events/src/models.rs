use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Exhibition event lifecycle
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
    #[default]
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Exhibition event domain model (distinct from bus events)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExhibitionEvent {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub venue: String,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating an event
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = validate_window))]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[validate(length(min = 1, max = 255))]
    pub venue: String,
}

fn validate_window(input: &CreateEvent) -> Result<(), ValidationError> {
    if input.starts_at >= input.ends_at {
        return Err(ValidationError::new("event_window")
            .with_message("starts_at must be strictly before ends_at".into()));
    }
    Ok(())
}

/// DTO for updating an event
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 255))]
    pub venue: Option<String>,
    pub status: Option<EventStatus>,
}

/// DTO for event responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub venue: String,
    pub status: EventStatus,
}

impl From<ExhibitionEvent> for EventResponse {
    fn from(event: ExhibitionEvent) -> Self {
        Self {
            id: event.id,
            name: event.name,
            description: event.description,
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            venue: event.venue,
            status: event.status,
        }
    }
}

impl ExhibitionEvent {
    pub fn apply_update(&mut self, update: UpdateEvent) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(starts_at) = update.starts_at {
            self.starts_at = starts_at;
        }
        if let Some(ends_at) = update.ends_at {
            self.ends_at = ends_at;
        }
        if let Some(venue) = update.venue {
            self.venue = venue;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = chrono::Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_event_rejects_inverted_window() {
        let now = Utc::now();
        let input = CreateEvent {
            name: "Spring Expo".to_string(),
            description: String::new(),
            starts_at: now,
            ends_at: now - chrono::Duration::hours(1),
            venue: "Hall 4".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn create_event_accepts_ordered_window() {
        let now = Utc::now();
        let input = CreateEvent {
            name: "Spring Expo".to_string(),
            description: String::new(),
            starts_at: now,
            ends_at: now + chrono::Duration::days(3),
            venue: "Hall 4".to_string(),
        };
        assert!(input.validate().is_ok());
    }
}
