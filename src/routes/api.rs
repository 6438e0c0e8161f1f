use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::Deserialize;

use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::{
    AppState,
    auth::AuthUser,
    error::{AppError, AppResult},
    models::{
        BookingPayload, BookingView, MovieDetail, MoviePayload, MovieView, RegisterPayload,
        SeatAvailability, SeatPayload, SeatView, UserView,
    },
};

type Shared = State<Arc<AppState>>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies/", get(list_movies).post(create_movie))
        .route(
            "/movies/{id}/",
            get(get_movie).put(replace_movie).patch(patch_movie).delete(delete_movie),
        )
        .route("/movies/{id}/available_seats/", get(movie_available_seats))
        .route("/seats/", get(list_seats).post(create_seat))
        .route("/seats/available/", get(available_seats))
        .route(
            "/seats/{id}/",
            get(get_seat).put(replace_seat).patch(patch_seat).delete(delete_seat),
        )
        .route("/seats/{id}/check_availability/", get(check_availability))
        .route("/bookings/", get(list_bookings).post(create_booking))
        .route("/bookings/my_bookings/", get(my_bookings))
        .route("/bookings/upcoming/", get(upcoming_bookings))
        .route("/bookings/{id}/", get(get_booking).delete(cancel_booking))
        .route("/users/", post(register))
        .route("/users/{id}/", delete(delete_user))
}

/* ---------- movies ---------- */

async fn list_movies(State(state): Shared) -> AppResult<Json<Vec<MovieView>>> {
    Ok(Json(state.store.list_movies().await?))
}

async fn create_movie(
    State(state): Shared,
    _user: AuthUser,
    ApiJson(payload): ApiJson<MoviePayload>,
) -> AppResult<(StatusCode, Json<MovieView>)> {
    let new = payload.validate()?.require_all()?;
    Ok((StatusCode::CREATED, Json(state.store.create_movie(new).await?)))
}

async fn get_movie(
    State(state): Shared,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MovieDetail>> {
    Ok(Json(state.store.movie_detail(id).await?))
}

async fn replace_movie(
    State(state): Shared,
    _user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<MoviePayload>,
) -> AppResult<Json<MovieView>> {
    let new = payload.validate()?.require_all()?;
    let changes = crate::models::MovieChanges {
        title: Some(new.title),
        description: Some(new.description),
        release_date: Some(new.release_date),
        duration: Some(new.duration),
    };
    Ok(Json(state.store.update_movie(id, changes).await?))
}

async fn patch_movie(
    State(state): Shared,
    _user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<MoviePayload>,
) -> AppResult<Json<MovieView>> {
    Ok(Json(state.store.update_movie(id, payload.validate()?).await?))
}

async fn delete_movie(
    State(state): Shared,
    _user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_movie(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn movie_available_seats(
    State(state): Shared,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<Vec<SeatView>>> {
    Ok(Json(state.store.movie_available_seats(id).await?))
}

/* ---------- seats ---------- */

#[derive(Debug, Deserialize)]
struct MovieFilter {
    movie_id: Option<i32>,
}

async fn list_seats(State(state): Shared) -> AppResult<Json<Vec<SeatView>>> {
    Ok(Json(state.store.list_seats().await?))
}

async fn create_seat(
    State(state): Shared,
    _user: AuthUser,
    ApiJson(payload): ApiJson<SeatPayload>,
) -> AppResult<(StatusCode, Json<SeatView>)> {
    let changes = payload.validate()?;
    let seat_number = changes
        .seat_number
        .ok_or_else(|| AppError::Validation("seat_number is required.".into()))?;
    let seat = state.store.create_seat(seat_number, changes.is_booked.unwrap_or(false)).await?;
    Ok((StatusCode::CREATED, Json(seat)))
}

async fn get_seat(State(state): Shared, ApiPath(id): ApiPath<i32>) -> AppResult<Json<SeatView>> {
    Ok(Json(state.store.get_seat(id).await?))
}

async fn replace_seat(
    State(state): Shared,
    _user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<SeatPayload>,
) -> AppResult<Json<SeatView>> {
    let mut changes = payload.validate()?;
    if changes.seat_number.is_none() {
        return Err(AppError::Validation("seat_number is required.".into()));
    }
    changes.is_booked.get_or_insert(false);
    Ok(Json(state.store.update_seat(id, changes).await?))
}

async fn patch_seat(
    State(state): Shared,
    _user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<SeatPayload>,
) -> AppResult<Json<SeatView>> {
    Ok(Json(state.store.update_seat(id, payload.validate()?).await?))
}

async fn delete_seat(
    State(state): Shared,
    _user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_seat(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn available_seats(
    State(state): Shared,
    ApiQuery(filter): ApiQuery<MovieFilter>,
) -> AppResult<Json<Vec<SeatView>>> {
    Ok(Json(state.store.available_seats(filter.movie_id).await?))
}

async fn check_availability(
    State(state): Shared,
    ApiPath(id): ApiPath<i32>,
    ApiQuery(filter): ApiQuery<MovieFilter>,
) -> AppResult<Json<SeatAvailability>> {
    Ok(Json(state.store.check_availability(id, filter.movie_id).await?))
}

/* ---------- bookings ---------- */

async fn list_bookings(
    State(state): Shared,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<BookingView>>> {
    Ok(Json(state.store.list_bookings(&user).await?))
}

async fn create_booking(
    State(state): Shared,
    AuthUser(user): AuthUser,
    ApiJson(payload): ApiJson<BookingPayload>,
) -> AppResult<(StatusCode, Json<BookingView>)> {
    let (movie_id, seat_id) = payload.validate()?;
    let booking = state.store.create_booking(&user, movie_id, seat_id).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn get_booking(
    State(state): Shared,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<BookingView>> {
    Ok(Json(state.store.get_booking(&user, id).await?))
}

async fn cancel_booking(
    State(state): Shared,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.store.cancel_booking(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn my_bookings(
    State(state): Shared,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<BookingView>>> {
    Ok(Json(state.store.my_bookings(&user).await?))
}

async fn upcoming_bookings(
    State(state): Shared,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<BookingView>>> {
    let today = jiff::Zoned::now().date();
    Ok(Json(state.store.upcoming_bookings(&user, today).await?))
}

/* ---------- users ---------- */

async fn register(
    State(state): Shared,
    ApiJson(payload): ApiJson<RegisterPayload>,
) -> AppResult<(StatusCode, Json<UserView>)> {
    let user = state.store.register(&payload.username, &payload.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn delete_user(
    State(state): Shared,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_user(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
