use async_trait::async_trait;
use uuid::Uuid;

use crate::error::EventResult;
use crate::models::{CreateEvent, EventStatus, ExhibitionEvent, UpdateEvent};

/// Repository trait for exhibition event persistence
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, input: CreateEvent) -> EventResult<ExhibitionEvent>;

    async fn find_by_id(&self, id: Uuid) -> EventResult<Option<ExhibitionEvent>>;

    /// List events, optionally filtered by status, newest start first
    async fn list(&self, status: Option<EventStatus>) -> EventResult<Vec<ExhibitionEvent>>;

    async fn update(&self, id: Uuid, input: UpdateEvent) -> EventResult<ExhibitionEvent>;

    async fn delete(&self, id: Uuid) -> EventResult<bool>;
}
