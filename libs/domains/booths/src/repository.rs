use async_trait::async_trait;
use uuid::Uuid;

use crate::error::BoothResult;
use crate::models::{
    AvailableBoothFilter, Booth, BoothStatus, CreateBooth, CreateFloorPlan, FloorPlan, UpdateBooth,
};

/// Repository trait for booth persistence
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait BoothRepository: Send + Sync {
    async fn create(&self, input: CreateBooth) -> BoothResult<Booth>;

    async fn find_by_id(&self, id: Uuid) -> BoothResult<Option<Booth>>;

    async fn list_by_event(&self, event_id: Uuid) -> BoothResult<Vec<Booth>>;

    /// Available booths matching the filter, booth number ascending
    async fn find_available(&self, filter: AvailableBoothFilter) -> BoothResult<Vec<Booth>>;

    /// Set the status unconditionally in one atomic UPDATE.
    ///
    /// Returns the updated booth, or None when the booth does not exist.
    async fn set_status(&self, id: Uuid, status: BoothStatus) -> BoothResult<Option<Booth>>;

    /// Set the status only when the current status matches `from`.
    ///
    /// One conditional UPDATE; false means the row was missing or in another
    /// state: the caller lost the race or the precondition never held.
    async fn set_status_if(
        &self,
        id: Uuid,
        from: BoothStatus,
        to: BoothStatus,
    ) -> BoothResult<bool>;

    async fn update(&self, id: Uuid, input: UpdateBooth) -> BoothResult<Booth>;

    async fn delete(&self, id: Uuid) -> BoothResult<bool>;
}

/// Repository trait for floor plan persistence
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait FloorPlanRepository: Send + Sync {
    async fn create(&self, input: CreateFloorPlan) -> BoothResult<FloorPlan>;

    async fn find_by_event(&self, event_id: Uuid) -> BoothResult<Option<FloorPlan>>;
}
