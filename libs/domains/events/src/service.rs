use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, EventStatus, ExhibitionEvent, UpdateEvent};
use crate::repository::EventRepository;

/// Service layer for exhibition event management
#[derive(Clone)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, input), fields(event_name = %input.name))]
    pub async fn create_event(&self, input: CreateEvent) -> EventResult<ExhibitionEvent> {
        input
            .validate()
            .map_err(|e| EventError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    pub async fn get_event(&self, id: Uuid) -> EventResult<ExhibitionEvent> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    pub async fn list_events(&self, status: Option<EventStatus>) -> EventResult<Vec<ExhibitionEvent>> {
        self.repository.list(status).await
    }

    /// Events visible to exhibitors: published or currently running
    pub async fn list_public_events(&self) -> EventResult<Vec<ExhibitionEvent>> {
        let mut events = self.repository.list(Some(EventStatus::Published)).await?;
        events.extend(self.repository.list(Some(EventStatus::Active)).await?);
        events.sort_by_key(|e| std::cmp::Reverse(e.starts_at));
        Ok(events)
    }

    #[instrument(skip(self, input), fields(event_id = %id))]
    pub async fn update_event(&self, id: Uuid, input: UpdateEvent) -> EventResult<ExhibitionEvent> {
        input
            .validate()
            .map_err(|e| EventError::Validation(e.to_string()))?;

        // Window ordering also holds across partial updates
        if let (Some(starts), Some(ends)) = (input.starts_at, input.ends_at) {
            if starts >= ends {
                return Err(EventError::Validation(
                    "starts_at must be strictly before ends_at".to_string(),
                ));
            }
        }

        self.repository.update(id, input).await
    }

    #[instrument(skip(self), fields(event_id = %id))]
    pub async fn delete_event(&self, id: Uuid) -> EventResult<()> {
        if !self.repository.delete(id).await? {
            return Err(EventError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockEventRepository;
    use chrono::Utc;

    fn sample_event(status: EventStatus) -> ExhibitionEvent {
        ExhibitionEvent {
            id: Uuid::new_v4(),
            name: "Spring Expo".to_string(),
            description: String::new(),
            starts_at: Utc::now(),
            ends_at: Utc::now() + chrono::Duration::days(2),
            venue: "Hall 4".to_string(),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn get_event_maps_missing_to_not_found() {
        let mut repo = MockEventRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = EventService::new(Arc::new(repo))
            .get_event(Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, EventError::NotFound(_)));
    }

    #[tokio::test]
    async fn public_listing_merges_published_and_active() {
        let mut repo = MockEventRepository::new();
        repo.expect_list()
            .withf(|s| *s == Some(EventStatus::Published))
            .returning(|_| Ok(vec![sample_event(EventStatus::Published)]));
        repo.expect_list()
            .withf(|s| *s == Some(EventStatus::Active))
            .returning(|_| Ok(vec![sample_event(EventStatus::Active)]));

        let events = EventService::new(Arc::new(repo))
            .list_public_events()
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn update_rejects_inverted_window() {
        let repo = MockEventRepository::new();
        let now = Utc::now();

        let err = EventService::new(Arc::new(repo))
            .update_event(
                Uuid::new_v4(),
                UpdateEvent {
                    starts_at: Some(now),
                    ends_at: Some(now - chrono::Duration::hours(1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, EventError::Validation(_)));
    }
}
