use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{BoothError, BoothResult};
use crate::models::{
    AvailableBoothFilter, Booth, BoothStatus, CreateBooth, CreateFloorPlan, FloorPlan, UpdateBooth,
};
use crate::repository::{BoothRepository, FloorPlanRepository};
use crate::svg::render_floor_plan;

/// The Booth Store: canonical owner of booth status.
///
/// `transition`/`release` are the only status mutators. They are atomic at
/// the storage layer but enforce no business rules; higher-level ordering
/// (exclusivity, holds) is the reservation engine's job.
#[derive(Clone)]
pub struct BoothStore {
    booths: Arc<dyn BoothRepository>,
    floor_plans: Arc<dyn FloorPlanRepository>,
}

impl BoothStore {
    pub fn new(
        booths: Arc<dyn BoothRepository>,
        floor_plans: Arc<dyn FloorPlanRepository>,
    ) -> Self {
        Self {
            booths,
            floor_plans,
        }
    }

    /// Available booths for an event, ordered by booth number ascending
    pub async fn get_available(&self, filter: AvailableBoothFilter) -> BoothResult<Vec<Booth>> {
        self.booths.find_available(filter).await
    }

    /// Atomically set a booth's status, stamping the modification time
    #[instrument(skip(self), fields(booth_id = %booth_id, status = %new_status))]
    pub async fn transition(&self, booth_id: Uuid, new_status: BoothStatus) -> BoothResult<Booth> {
        let booth = self
            .booths
            .set_status(booth_id, new_status)
            .await?
            .ok_or(BoothError::NotFound(booth_id))?;

        tracing::info!(booth_id = %booth_id, status = %new_status, "Booth status transition");
        Ok(booth)
    }

    /// Conditional transition; false when the booth was not in `from`
    pub async fn transition_if(
        &self,
        booth_id: Uuid,
        from: BoothStatus,
        to: BoothStatus,
    ) -> BoothResult<bool> {
        self.booths.set_status_if(booth_id, from, to).await
    }

    /// Return a booth to the available pool
    pub async fn release(&self, booth_id: Uuid) -> BoothResult<Booth> {
        self.transition(booth_id, BoothStatus::Available).await
    }

    pub async fn get_booth(&self, id: Uuid) -> BoothResult<Booth> {
        self.booths
            .find_by_id(id)
            .await?
            .ok_or(BoothError::NotFound(id))
    }

    pub async fn list_by_event(&self, event_id: Uuid) -> BoothResult<Vec<Booth>> {
        self.booths.list_by_event(event_id).await
    }

    #[instrument(skip(self, input), fields(booth_number = %input.number))]
    pub async fn create_booth(&self, input: CreateBooth) -> BoothResult<Booth> {
        input
            .validate()
            .map_err(|e| BoothError::Validation(e.to_string()))?;

        self.booths.create(input).await
    }

    #[instrument(skip(self, input), fields(booth_id = %id))]
    pub async fn update_booth(&self, id: Uuid, input: UpdateBooth) -> BoothResult<Booth> {
        input
            .validate()
            .map_err(|e| BoothError::Validation(e.to_string()))?;

        self.booths.update(id, input).await
    }

    #[instrument(skip(self), fields(booth_id = %id))]
    pub async fn delete_booth(&self, id: Uuid) -> BoothResult<()> {
        if !self.booths.delete(id).await? {
            return Err(BoothError::NotFound(id));
        }
        Ok(())
    }

    pub async fn create_floor_plan(&self, input: CreateFloorPlan) -> BoothResult<FloorPlan> {
        input
            .validate()
            .map_err(|e| BoothError::Validation(e.to_string()))?;

        self.floor_plans.create(input).await
    }

    pub async fn get_floor_plan(&self, event_id: Uuid) -> BoothResult<FloorPlan> {
        self.floor_plans
            .find_by_event(event_id)
            .await?
            .ok_or(BoothError::FloorPlanNotFound(event_id))
    }

    /// Render the event's floor plan as an SVG document with live statuses
    pub async fn render_floor_plan_svg(&self, event_id: Uuid) -> BoothResult<String> {
        let plan = self.get_floor_plan(event_id).await?;
        let booths = self.booths.list_by_event(event_id).await?;
        Ok(render_floor_plan(&plan, &booths))
    }
}
