use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::Store;
use crate::{
    entities::{booking, movie, seat},
    error::{AppError, AppResult},
    models::{MovieChanges, MovieDetail, MovieView, NewMovie},
};

impl Store {
    pub async fn list_movies(&self) -> AppResult<Vec<MovieView>> {
        movie::Entity::find()
            .order_by_desc(movie::Column::ReleaseDate)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(MovieView::try_from)
            .collect()
    }

    pub(crate) async fn find_movie(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Movie"))
    }

    pub async fn get_movie(&self, id: i32) -> AppResult<MovieView> {
        self.find_movie(id).await?.try_into()
    }

    pub async fn movie_detail(&self, id: i32) -> AppResult<MovieDetail> {
        let movie = self.get_movie(id).await?;
        let total_bookings = booking::Entity::find()
            .filter(booking::Column::MovieId.eq(id))
            .count(&self.db)
            .await?;
        let total_seats = seat::Entity::find().count(&self.db).await?;

        Ok(MovieDetail {
            movie,
            available_seats_count: total_seats.saturating_sub(total_bookings),
            total_bookings,
        })
    }

    pub async fn create_movie(&self, new: NewMovie) -> AppResult<MovieView> {
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            description: Set(new.description),
            release_date: Set(new.release_date.to_string()),
            duration: Set(new.duration),
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(movie_id = model.id, title = %model.title, "movie created");
        model.try_into()
    }

    pub async fn update_movie(&self, id: i32, changes: MovieChanges) -> AppResult<MovieView> {
        let mut active = self.find_movie(id).await?.into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(date) = changes.release_date {
            active.release_date = Set(date.to_string());
        }
        if let Some(duration) = changes.duration {
            active.duration = Set(duration);
        }

        if !active.is_changed() {
            return self.get_movie(id).await;
        }
        active.update(&self.db).await?.try_into()
    }

    /// Deletes the movie together with every booking for it.
    pub async fn delete_movie(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let found = movie::Entity::find_by_id(id).one(&txn).await?;
        if found.is_none() {
            return Err(AppError::not_found("Movie"));
        }

        let removed = booking::Entity::delete_many()
            .filter(booking::Column::MovieId.eq(id))
            .exec(&txn)
            .await?;
        movie::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(movie_id = id, bookings_removed = removed.rows_affected, "movie deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::{
        error::AppError,
        models::MovieChanges,
        store::testing::{self, store},
    };

    #[tokio::test]
    async fn movies_are_listed_newest_first() {
        let store = store().await;
        testing::movie(&store, "Older", date(2020, 1, 1)).await;
        testing::movie(&store, "Newer", date(2024, 6, 1)).await;

        let titles: Vec<_> =
            store.list_movies().await.unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, ["Newer", "Older"]);
    }

    #[tokio::test]
    async fn unknown_movie_is_not_found() {
        let store = store().await;
        let err = store.get_movie(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Movie not found"));
    }

    #[tokio::test]
    async fn partial_update_keeps_untouched_fields() {
        let store = store().await;
        let movie = testing::movie(&store, "Alien", date(1979, 5, 25)).await;

        let updated = store
            .update_movie(movie.id, MovieChanges { duration: Some(117), ..Default::default() })
            .await
            .unwrap();

        assert_eq!(updated.duration, 117);
        assert_eq!(updated.title, "Alien");
        assert_eq!(updated.release_date, date(1979, 5, 25));

        let unchanged = store.update_movie(movie.id, MovieChanges::default()).await.unwrap();
        assert_eq!(unchanged.duration, 117);
    }

    #[tokio::test]
    async fn detail_counts_bookings_and_free_seats() {
        let store = store().await;
        let movie = testing::movie(&store, "Jaws", date(1975, 6, 20)).await;
        let a1 = testing::seat(&store, "A1").await;
        testing::seat(&store, "A2").await;
        testing::seat(&store, "A3").await;
        let user = testing::user(&store, "quint").await;
        store.create_booking(&user, movie.id, a1.id).await.unwrap();

        let detail = store.movie_detail(movie.id).await.unwrap();
        assert_eq!(detail.total_bookings, 1);
        assert_eq!(detail.available_seats_count, 2);
    }

    #[tokio::test]
    async fn deleting_a_movie_removes_its_bookings() {
        let store = store().await;
        let doomed = testing::movie(&store, "Doomed", date(2025, 1, 1)).await;
        let kept = testing::movie(&store, "Kept", date(2025, 1, 2)).await;
        let seat = testing::seat(&store, "B4").await;
        let user = testing::user(&store, "viewer").await;
        store.create_booking(&user, doomed.id, seat.id).await.unwrap();
        store.create_booking(&user, kept.id, seat.id).await.unwrap();

        store.delete_movie(doomed.id).await.unwrap();

        let left = store.all_bookings().await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].movie, kept.id);
        assert!(matches!(store.delete_movie(doomed.id).await, Err(AppError::NotFound(_))));
    }
}
