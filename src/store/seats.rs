use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
    sea_query::Query,
};

use super::Store;
use crate::{
    entities::{booking, seat},
    error::{AppError, AppResult},
    models::{SeatAvailability, SeatChanges, SeatView},
};

const DUPLICATE_SEAT: &str = "A seat with this seat number already exists.";

impl Store {
    pub async fn list_seats(&self) -> AppResult<Vec<SeatView>> {
        Ok(seat::Entity::find()
            .order_by_asc(seat::Column::SeatNumber)
            .all(&self.db)
            .await?
            .into_iter()
            .map(SeatView::from)
            .collect())
    }

    pub(crate) async fn find_seat(&self, id: i32) -> AppResult<seat::Model> {
        seat::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Seat"))
    }

    pub async fn get_seat(&self, id: i32) -> AppResult<SeatView> {
        Ok(self.find_seat(id).await?.into())
    }

    pub async fn create_seat(&self, seat_number: String, is_booked: bool) -> AppResult<SeatView> {
        let model = seat::ActiveModel {
            id: Default::default(),
            seat_number: Set(seat_number),
            is_booked: Set(is_booked),
        }
        .insert(&self.db)
        .await
        .map_err(|e| AppError::unique_or_internal(e, DUPLICATE_SEAT))?;

        tracing::debug!(seat_id = model.id, seat_number = %model.seat_number, "seat created");
        Ok(model.into())
    }

    pub async fn update_seat(&self, id: i32, changes: SeatChanges) -> AppResult<SeatView> {
        let mut active = self.find_seat(id).await?.into_active_model();
        if let Some(number) = changes.seat_number {
            active.seat_number = Set(number);
        }
        if let Some(is_booked) = changes.is_booked {
            active.is_booked = Set(is_booked);
        }

        if !active.is_changed() {
            return self.get_seat(id).await;
        }
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::unique_or_internal(e, DUPLICATE_SEAT))?;
        Ok(model.into())
    }

    /// Deletes the seat together with every booking of it.
    pub async fn delete_seat(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        if seat::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(AppError::not_found("Seat"));
        }

        let removed = booking::Entity::delete_many()
            .filter(booking::Column::SeatId.eq(id))
            .exec(&txn)
            .await?;
        seat::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(seat_id = id, bookings_removed = removed.rows_affected, "seat deleted");
        Ok(())
    }

    /// Seats free for `movie_id`, or seats not flagged as booked when no movie
    /// is given. Ordered by seat number.
    pub async fn available_seats(&self, movie_id: Option<i32>) -> AppResult<Vec<SeatView>> {
        let query = match movie_id {
            Some(movie_id) => seat::Entity::find().filter(
                seat::Column::Id.not_in_subquery(
                    Query::select()
                        .column(booking::Column::SeatId)
                        .from(booking::Entity)
                        .and_where(booking::Column::MovieId.eq(movie_id))
                        .to_owned(),
                ),
            ),
            None => seat::Entity::find().filter(seat::Column::IsBooked.eq(false)),
        };

        Ok(query
            .order_by_asc(seat::Column::SeatNumber)
            .all(&self.db)
            .await?
            .into_iter()
            .map(SeatView::from)
            .collect())
    }

    pub async fn movie_available_seats(&self, movie_id: i32) -> AppResult<Vec<SeatView>> {
        self.find_movie(movie_id).await?;
        self.available_seats(Some(movie_id)).await
    }

    pub async fn booked_seat_ids(&self, movie_id: i32) -> AppResult<Vec<i32>> {
        Ok(booking::Entity::find()
            .select_only()
            .column(booking::Column::SeatId)
            .filter(booking::Column::MovieId.eq(movie_id))
            .into_tuple::<i32>()
            .all(&self.db)
            .await?)
    }

    pub async fn check_availability(
        &self,
        seat_id: i32,
        movie_id: Option<i32>,
    ) -> AppResult<SeatAvailability> {
        let seat = self.find_seat(seat_id).await?;
        let movie_id = movie_id
            .ok_or_else(|| AppError::Validation("movie_id parameter is required".into()))?;

        let taken = booking::Entity::find()
            .filter(booking::Column::MovieId.eq(movie_id))
            .filter(booking::Column::SeatId.eq(seat_id))
            .one(&self.db)
            .await?
            .is_some();

        Ok(SeatAvailability { seat_number: seat.seat_number, movie_id, is_available: !taken })
    }
}
