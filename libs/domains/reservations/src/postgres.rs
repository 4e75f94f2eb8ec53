use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_booths::entity::booths;
use domain_booths::BoothStatus;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionError, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{ReservationError, ReservationResult},
    models::{Reservation, ReservationStatus},
    repository::ReservationRepository,
};

pub struct PgReservationRepository {
    db: DatabaseConnection,
}

impl PgReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Lazy-expiry predicate: rows that still block their booth at `now`
fn active_condition(now: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(
            entity::Column::Status.is_in([ReservationStatus::Pending, ReservationStatus::Confirmed]),
        )
        .add(
            Condition::any()
                .add(entity::Column::ExpiresAt.is_null())
                .add(entity::Column::ExpiresAt.gt(now)),
        )
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn reserve(
        &self,
        booth_id: Uuid,
        event_id: Uuid,
        exhibitor_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> ReservationResult<Reservation> {
        let result = self
            .db
            .transaction::<_, Reservation, ReservationError>(move |txn| {
                Box::pin(async move {
                    let now = Utc::now();

                    // FOR UPDATE serializes concurrent reserve attempts on
                    // this booth: the second transaction blocks here and then
                    // sees the first one's reservation row.
                    let booth = booths::Entity::find_by_id(booth_id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                        .ok_or(ReservationError::BoothNotFound(booth_id))?;

                    if booth.event_id != event_id {
                        return Err(ReservationError::Validation(
                            "Booth does not belong to the given event".to_string(),
                        ));
                    }

                    let active = entity::Entity::find()
                        .filter(entity::Column::BoothId.eq(booth_id))
                        .filter(active_condition(now))
                        .one(txn)
                        .await?;

                    if active.is_some() {
                        return Err(ReservationError::BoothReserved);
                    }

                    // `reserved` without an active row means the previous
                    // hold lapsed; the booth is reclaimable without any
                    // write-back having happened.
                    match booth.status {
                        BoothStatus::Available | BoothStatus::Reserved => {}
                        BoothStatus::Booked | BoothStatus::Unavailable => {
                            return Err(ReservationError::BoothUnavailable);
                        }
                    }

                    let model = entity::ActiveModel {
                        id: Set(Uuid::now_v7()),
                        booth_id: Set(booth_id),
                        event_id: Set(event_id),
                        exhibitor_id: Set(exhibitor_id),
                        status: Set(ReservationStatus::Pending),
                        expires_at: Set(Some(expires_at.into())),
                        confirmed_at: Set(None),
                        created_at: Set(now.into()),
                        updated_at: Set(now.into()),
                    }
                    .insert(txn)
                    .await?;

                    booths::Entity::update_many()
                        .col_expr(booths::Column::Status, Expr::value(BoothStatus::Reserved))
                        .col_expr(booths::Column::UpdatedAt, Expr::value(now))
                        .filter(booths::Column::Id.eq(booth_id))
                        .exec(txn)
                        .await?;

                    Ok(model.into())
                })
            })
            .await;

        match result {
            Ok(reservation) => {
                tracing::info!(
                    reservation_id = %reservation.id,
                    booth_id = %booth_id,
                    "Placed reservation hold"
                );
                Ok(reservation)
            }
            Err(TransactionError::Connection(e)) => Err(e.into()),
            Err(TransactionError::Transaction(e)) => Err(e),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> ReservationResult<Option<Reservation>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn find_active_for_booth(
        &self,
        booth_id: Uuid,
        now: DateTime<Utc>,
    ) -> ReservationResult<Option<Reservation>> {
        let model = entity::Entity::find()
            .filter(entity::Column::BoothId.eq(booth_id))
            .filter(active_condition(now))
            .one(&self.db)
            .await?;
        Ok(model.map(|m| m.into()))
    }

    async fn confirm_pending(&self, id: Uuid, now: DateTime<Utc>) -> ReservationResult<u64> {
        let result = entity::Entity::update_many()
            .col_expr(
                entity::Column::Status,
                Expr::value(ReservationStatus::Confirmed),
            )
            .col_expr(entity::Column::ConfirmedAt, Expr::value(now))
            .col_expr(entity::Column::UpdatedAt, Expr::value(now))
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Status.eq(ReservationStatus::Pending))
            .filter(
                Condition::any()
                    .add(entity::Column::ExpiresAt.is_null())
                    .add(entity::Column::ExpiresAt.gt(now)),
            )
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn cancel_pending(&self, id: Uuid) -> ReservationResult<u64> {
        let result = entity::Entity::update_many()
            .col_expr(
                entity::Column::Status,
                Expr::value(ReservationStatus::Cancelled),
            )
            .col_expr(entity::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Status.eq(ReservationStatus::Pending))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn expire_pending(&self, id: Uuid, now: DateTime<Utc>) -> ReservationResult<u64> {
        let result = entity::Entity::update_many()
            .col_expr(
                entity::Column::Status,
                Expr::value(ReservationStatus::Expired),
            )
            .col_expr(entity::Column::UpdatedAt, Expr::value(now))
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Status.eq(ReservationStatus::Pending))
            .filter(entity::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn list_by_exhibitor(&self, exhibitor_id: Uuid) -> ReservationResult<Vec<Reservation>> {
        let models = entity::Entity::find()
            .filter(entity::Column::ExhibitorId.eq(exhibitor_id))
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn list(&self, limit: u64, offset: u64) -> ReservationResult<Vec<Reservation>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_stale_pending(&self, now: DateTime<Utc>) -> ReservationResult<Vec<Reservation>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Status.eq(ReservationStatus::Pending))
            .filter(entity::Column::ExpiresAt.lte(now))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}
