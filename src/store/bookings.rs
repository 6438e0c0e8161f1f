use jiff::{Timestamp, civil::Date};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select, Set, SqlErr,
};

use super::{Store, now_sec};
use crate::{
    entities::{booking, movie, seat, user},
    error::{AppError, AppResult},
    models::BookingView,
};

const ALREADY_BOOKED: &str = "This seat is already booked for this movie";

#[derive(Debug, FromQueryResult)]
struct BookingRow {
    id: i32,
    movie_id: i32,
    seat_id: i32,
    booked_at: i64,
    movie_title: String,
    release_date: String,
    seat_number: String,
    username: String,
}

impl TryFrom<BookingRow> for BookingView {
    type Error = AppError;

    fn try_from(row: BookingRow) -> AppResult<Self> {
        Ok(Self {
            id: row.id,
            movie: row.movie_id,
            movie_title: row.movie_title,
            seat: row.seat_id,
            seat_number: row.seat_number,
            user: row.username,
            booking_date: Timestamp::from_second(row.booked_at)?,
            release_date: row.release_date.parse()?,
        })
    }
}

/// Result of booking several seats from the booking page.
#[derive(Debug, Default, PartialEq)]
pub struct PageBookingOutcome {
    pub booked: Vec<String>,
    pub already_taken: Vec<String>,
}

impl Store {
    /// Bookings joined with their movie, seat and user, newest first.
    fn booking_rows() -> Select<booking::Entity> {
        booking::Entity::find()
            .select_only()
            .column(booking::Column::Id)
            .column(booking::Column::MovieId)
            .column(booking::Column::SeatId)
            .column(booking::Column::BookedAt)
            .column_as(movie::Column::Title, "movie_title")
            .column_as(movie::Column::ReleaseDate, "release_date")
            .column_as(seat::Column::SeatNumber, "seat_number")
            .column_as(user::Column::Username, "username")
            .join(JoinType::InnerJoin, booking::Relation::Movie.def())
            .join(JoinType::InnerJoin, booking::Relation::Seat.def())
            .join(JoinType::InnerJoin, booking::Relation::User.def())
            .order_by_desc(booking::Column::BookedAt)
            .order_by_desc(booking::Column::Id)
    }

    async fn load_bookings(&self, query: Select<booking::Entity>) -> AppResult<Vec<BookingView>> {
        query
            .into_model::<BookingRow>()
            .all(&self.db)
            .await?
            .into_iter()
            .map(BookingView::try_from)
            .collect()
    }

    async fn load_booking(&self, id: i32) -> AppResult<BookingView> {
        Self::booking_rows()
            .filter(booking::Column::Id.eq(id))
            .into_model::<BookingRow>()
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Booking"))?
            .try_into()
    }

    /// Books `seat_id` for `movie_id` on behalf of `user`.
    ///
    /// The existence check only produces the friendly conflict; the unique
    /// index on `(movie_id, seat_id)` decides concurrent races, and its
    /// violation maps to the same conflict.
    pub async fn create_booking(
        &self,
        user: &user::Model,
        movie_id: i32,
        seat_id: i32,
    ) -> AppResult<BookingView> {
        self.find_movie(movie_id).await?;
        self.find_seat(seat_id).await?;

        let exists = booking::Entity::find()
            .filter(booking::Column::MovieId.eq(movie_id))
            .filter(booking::Column::SeatId.eq(seat_id))
            .one(&self.db)
            .await?
            .is_some();
        if exists {
            tracing::warn!(movie_id, seat_id, user = %user.username, "seat already booked");
            return Err(AppError::Conflict(ALREADY_BOOKED.to_string()));
        }

        let model = self.insert_booking(user.id, movie_id, seat_id).await?;

        tracing::info!(
            booking_id = model.id,
            movie_id,
            seat_id,
            user = %user.username,
            "booking created"
        );
        self.load_booking(model.id).await
    }

    /// A movie or seat deleted after the existence checks surfaces as a
    /// foreign-key violation and maps to not found.
    async fn insert_booking(
        &self,
        user_id: i32,
        movie_id: i32,
        seat_id: i32,
    ) -> AppResult<booking::Model> {
        booking::ActiveModel {
            id: Default::default(),
            movie_id: Set(movie_id),
            seat_id: Set(seat_id),
            user_id: Set(user_id),
            booked_at: Set(now_sec()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::not_found("Movie or seat"),
            _ => AppError::unique_or_internal(e, ALREADY_BOOKED),
        })
    }

    /// Own bookings, or every booking for staff.
    pub async fn list_bookings(&self, user: &user::Model) -> AppResult<Vec<BookingView>> {
        if user.is_staff {
            self.all_bookings().await
        } else {
            self.my_bookings(user).await
        }
    }

    pub async fn all_bookings(&self) -> AppResult<Vec<BookingView>> {
        self.load_bookings(Self::booking_rows()).await
    }

    pub async fn my_bookings(&self, user: &user::Model) -> AppResult<Vec<BookingView>> {
        self.load_bookings(Self::booking_rows().filter(booking::Column::UserId.eq(user.id))).await
    }

    /// Bookings of `user` whose movie releases on or after `today`.
    pub async fn upcoming_bookings(
        &self,
        user: &user::Model,
        today: Date,
    ) -> AppResult<Vec<BookingView>> {
        self.load_bookings(
            Self::booking_rows()
                .filter(booking::Column::UserId.eq(user.id))
                .filter(movie::Column::ReleaseDate.gte(today.to_string())),
        )
        .await
    }

    /// Another user's booking reads as not found so its existence is not
    /// disclosed.
    pub async fn get_booking(&self, user: &user::Model, id: i32) -> AppResult<BookingView> {
        let found = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .filter(|b| user.is_staff || b.user_id == user.id)
            .ok_or_else(|| AppError::not_found("Booking"))?;
        self.load_booking(found.id).await
    }

    pub async fn cancel_booking(&self, user: &user::Model, id: i32) -> AppResult<BookingView> {
        let found = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Booking"))?;
        if found.user_id != user.id && !user.is_staff {
            return Err(AppError::PermissionDenied(
                "You can only cancel your own bookings".into(),
            ));
        }
        self.remove_booking(id).await
    }

    /// Cancels without an ownership check. Used by the public bookings page.
    pub async fn remove_booking(&self, id: i32) -> AppResult<BookingView> {
        let view = self.load_booking(id).await?;
        booking::Entity::delete_by_id(id).exec(&self.db).await?;
        tracing::info!(
            booking_id = id,
            movie_id = view.movie,
            seat = %view.seat_number,
            "booking cancelled"
        );
        Ok(view)
    }

    /// Books each seat in turn, skipping unknown ids and collecting seats that
    /// were already taken for the movie.
    pub async fn book_seats(
        &self,
        user: &user::Model,
        movie_id: i32,
        seat_ids: &[i32],
    ) -> AppResult<PageBookingOutcome> {
        let mut outcome = PageBookingOutcome::default();
        for &seat_id in seat_ids {
            let seat = match self.find_seat(seat_id).await {
                Ok(seat) => seat,
                Err(AppError::NotFound(_)) => continue,
                Err(err) => return Err(err),
            };
            match self.create_booking(user, movie_id, seat_id).await {
                Ok(_) => outcome.booked.push(seat.seat_number),
                Err(AppError::Conflict(_)) => outcome.already_taken.push(seat.seat_number),
                Err(err) => return Err(err),
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::{
        error::AppError,
        store::{
            PageBookingOutcome,
            testing::{self, store},
        },
    };

    #[tokio::test]
    async fn insert_against_vanished_movie_is_not_found() {
        let store = store().await;
        let seat = testing::seat(&store, "G7").await;
        let user = testing::user(&store, "late").await;

        let err = store.insert_booking(user.id, 4242, seat.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let movie = testing::movie(&store, "Gone Soon", date(2025, 3, 1)).await;
        store.delete_movie(movie.id).await.unwrap();
        let err = store.insert_booking(user.id, movie.id, seat.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn booking_carries_denormalized_names() {
        let store = store().await;
        let movie = testing::movie(&store, "Heat", date(1995, 12, 15)).await;
        let seat = testing::seat(&store, "F12").await;
        let user = testing::user(&store, "neil").await;

        let booking = store.create_booking(&user, movie.id, seat.id).await.unwrap();
        assert_eq!(booking.movie, movie.id);
        assert_eq!(booking.movie_title, "Heat");
        assert_eq!(booking.seat_number, "F12");
        assert_eq!(booking.user, "neil");
    }

    #[tokio::test]
    async fn seat_cannot_be_booked_twice_for_a_movie() {
        let store = store().await;
        let movie = testing::movie(&store, "Heat", date(1995, 12, 15)).await;
        let seat = testing::seat(&store, "A1").await;
        let first = testing::user(&store, "first").await;
        let second = testing::user(&store, "second").await;

        store.create_booking(&first, movie.id, seat.id).await.unwrap();
        let err = store.create_booking(&second, movie.id, seat.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m.contains("already booked")));
        assert_eq!(store.all_bookings().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn same_seat_can_be_booked_for_different_movies() {
        let store = store().await;
        let one = testing::movie(&store, "One", date(2025, 1, 1)).await;
        let two = testing::movie(&store, "Two", date(2025, 1, 2)).await;
        let seat = testing::seat(&store, "A1").await;
        let user = testing::user(&store, "fan").await;

        store.create_booking(&user, one.id, seat.id).await.unwrap();
        store.create_booking(&user, two.id, seat.id).await.unwrap();
        assert_eq!(store.my_bookings(&user).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_bookings_leave_one_winner() {
        let store = store().await;
        let movie = testing::movie(&store, "Race", date(2025, 1, 1)).await;
        let seat = testing::seat(&store, "A1").await;
        let a = testing::user(&store, "a").await;
        let b = testing::user(&store, "b").await;

        let (ra, rb) = tokio::join!(
            store.create_booking(&a, movie.id, seat.id),
            store.create_booking(&b, movie.id, seat.id)
        );
        assert_eq!([ra.is_ok(), rb.is_ok()].iter().filter(|ok| **ok).count(), 1);
        let loser = if ra.is_err() { ra } else { rb };
        assert!(matches!(loser, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn booking_unknown_movie_or_seat_is_not_found() {
        let store = store().await;
        let movie = testing::movie(&store, "Real", date(2025, 1, 1)).await;
        let seat = testing::seat(&store, "A1").await;
        let user = testing::user(&store, "u").await;

        let err = store.create_booking(&user, 99, seat.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Movie not found"));
        let err = store.create_booking(&user, movie.id, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Seat not found"));
    }

    #[tokio::test]
    async fn other_users_bookings_are_hidden_and_protected() {
        let store = store().await;
        let movie = testing::movie(&store, "Private", date(2025, 1, 1)).await;
        let seat = testing::seat(&store, "A1").await;
        let owner = testing::user(&store, "owner").await;
        let stranger = testing::user(&store, "stranger").await;
        let booking = store.create_booking(&owner, movie.id, seat.id).await.unwrap();

        assert!(matches!(
            store.get_booking(&stranger, booking.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.cancel_booking(&stranger, booking.id).await,
            Err(AppError::PermissionDenied(_))
        ));
        assert!(store.list_bookings(&stranger).await.unwrap().is_empty());

        assert_eq!(store.get_booking(&owner, booking.id).await.unwrap().id, booking.id);
        store.cancel_booking(&owner, booking.id).await.unwrap();
        assert!(store.all_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn staff_see_and_cancel_everything() {
        let store = store().await;
        let movie = testing::movie(&store, "Staffed", date(2025, 1, 1)).await;
        let seat = testing::seat(&store, "A1").await;
        let owner = testing::user(&store, "owner").await;
        store.ensure_staff("boss", "boss-pass").await.unwrap();
        let boss = store.find_username("boss").await.unwrap().unwrap();
        let booking = store.create_booking(&owner, movie.id, seat.id).await.unwrap();

        assert_eq!(store.list_bookings(&boss).await.unwrap().len(), 1);
        store.cancel_booking(&boss, booking.id).await.unwrap();
    }

    #[tokio::test]
    async fn upcoming_filters_on_release_date() {
        let store = store().await;
        let past = testing::movie(&store, "Past", date(2000, 1, 1)).await;
        let future = testing::movie(&store, "Future", date(2030, 1, 1)).await;
        let seat = testing::seat(&store, "A1").await;
        let user = testing::user(&store, "planner").await;
        store.create_booking(&user, past.id, seat.id).await.unwrap();
        store.create_booking(&user, future.id, seat.id).await.unwrap();

        let today = date(2025, 6, 1);
        let upcoming = store.upcoming_bookings(&user, today).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].movie_title, "Future");
    }

    #[tokio::test]
    async fn page_booking_reports_taken_and_skips_unknown() {
        let store = store().await;
        let movie = testing::movie(&store, "Matinee", date(2025, 1, 1)).await;
        let a1 = testing::seat(&store, "A1").await;
        let a2 = testing::seat(&store, "A2").await;
        let early = testing::user(&store, "early").await;
        let guest = store.guest_user("Late Comer").await.unwrap();
        store.create_booking(&early, movie.id, a1.id).await.unwrap();

        let outcome = store.book_seats(&guest, movie.id, &[a1.id, a2.id, 404]).await.unwrap();
        assert_eq!(
            outcome,
            PageBookingOutcome { booked: vec!["A2".into()], already_taken: vec!["A1".into()] }
        );
    }
}
