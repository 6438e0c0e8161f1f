use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use axum_extra::extract::{Form, cookie::CookieJar};
use serde::Deserialize;

use crate::{
    AppState,
    error::PageResult,
    flash::{self, Flash, Level},
    templates,
};

type Shared = State<Arc<AppState>>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(movie_list))
        .route("/movie/{id}/", get(movie_detail))
        .route("/movie/{id}/book/", get(seat_booking).post(submit_booking))
        .route("/movie/{id}/confirmation/", get(confirmation))
        .route("/bookings/", get(all_bookings))
        .route("/booking/{id}/cancel/", post(cancel_booking))
}

async fn movie_list(State(state): Shared, jar: CookieJar) -> PageResult<(CookieJar, Html<String>)> {
    let (jar, flashes) = flash::take(jar);
    let movies = state.store.list_movies().await?;
    Ok((jar, Html(templates::movie_list_page(&movies, &flashes))))
}

async fn movie_detail(State(state): Shared, Path(id): Path<i32>) -> PageResult<Html<String>> {
    let movie = state.store.get_movie(id).await?;
    let available = state.store.available_seats(Some(id)).await?;
    Ok(Html(templates::movie_detail_page(&movie, &available)))
}

async fn seat_booking(
    State(state): Shared,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let movie = state.store.get_movie(id).await?;
    let (jar, flashes) = flash::take(jar);
    let seats = state.store.list_seats().await?;
    let booked = state.store.booked_seat_ids(id).await?;
    Ok((jar, Html(templates::seat_booking_page(&movie, &seats, &booked, &flashes))))
}

#[derive(Debug, Default, Deserialize)]
struct BookingForm {
    /// Repeated checkbox values, or a single comma-separated list.
    #[serde(default)]
    seat_ids: Vec<String>,
    #[serde(default)]
    guest_name: String,
}

impl BookingForm {
    fn seat_ids(&self) -> Option<Vec<i32>> {
        self.seat_ids
            .iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().ok())
            .collect()
    }
}

async fn submit_booking(
    State(state): Shared,
    Path(id): Path<i32>,
    jar: CookieJar,
    Form(form): Form<BookingForm>,
) -> PageResult<(CookieJar, Redirect)> {
    let movie = state.store.get_movie(id).await?;
    let back = Redirect::to(&format!("/movie/{id}/book/"));

    let seat_ids = match form.seat_ids() {
        Some(ids) if !ids.is_empty() => ids,
        Some(_) => {
            let jar =
                flash::push(jar, &[Flash::new(Level::Error, "Please select at least one seat.")]);
            return Ok((jar, back));
        }
        None => {
            let jar = flash::push(jar, &[Flash::new(Level::Error, "Invalid seat selection.")]);
            return Ok((jar, back));
        }
    };

    let guest = state.store.guest_user(&form.guest_name).await?;
    let outcome = state.store.book_seats(&guest, id, &seat_ids).await?;

    let mut messages = Vec::new();
    if !outcome.booked.is_empty() {
        messages.push(Flash::new(
            Level::Success,
            format!(
                "Successfully booked seat(s): {} for {}!",
                outcome.booked.join(", "),
                movie.title
            ),
        ));
    }
    if !outcome.already_taken.is_empty() {
        messages.push(Flash::new(
            Level::Warning,
            format!("Seat(s) {} were already booked.", outcome.already_taken.join(", ")),
        ));
    }
    if messages.is_empty() {
        let jar = flash::push(jar, &[Flash::new(Level::Error, "No valid seats selected.")]);
        return Ok((jar, back));
    }

    Ok((flash::push(jar, &messages), Redirect::to(&format!("/movie/{id}/confirmation/"))))
}

async fn confirmation(
    State(state): Shared,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let movie = state.store.get_movie(id).await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(templates::confirmation_page(&movie, &flashes))))
}

async fn all_bookings(
    State(state): Shared,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let (jar, flashes) = flash::take(jar);
    let today = jiff::Zoned::now().date();
    let bookings = state.store.all_bookings().await?;
    let upcoming = bookings.iter().filter(|b| b.release_date >= today).count();
    Ok((jar, Html(templates::bookings_page(&bookings, upcoming, today, &flashes))))
}

async fn cancel_booking(
    State(state): Shared,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Redirect)> {
    let cancelled = state.store.remove_booking(id).await?;
    let jar = flash::push(
        jar,
        &[Flash::new(
            Level::Success,
            format!(
                "Successfully cancelled booking for {}, Seat {}.",
                cancelled.movie_title, cancelled.seat_number
            ),
        )],
    );
    Ok((jar, Redirect::to("/bookings/")))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use jiff::civil::date;
    use tower::ServiceExt;

    use super::BookingForm;
    use crate::{store::testing, test_app};

    #[test]
    fn seat_ids_accept_lists_and_repeats() {
        let form = BookingForm {
            seat_ids: vec!["1,2".into(), "3".into(), "".into()],
            ..Default::default()
        };
        assert_eq!(form.seat_ids(), Some(vec![1, 2, 3]));

        let bad = BookingForm { seat_ids: vec!["1,x".into()], ..Default::default() };
        assert_eq!(bad.seat_ids(), None);
    }

    #[tokio::test]
    async fn booking_page_books_and_redirects_with_flash() {
        let (app, state) = test_app().await;
        let movie = testing::movie(&state.store, "Casablanca", date(1942, 11, 26)).await;
        let a1 = testing::seat(&state.store, "A1").await;
        let a2 = testing::seat(&state.store, "A2").await;

        let form = format!("seat_ids={}&seat_ids={}&guest_name=Rick+Blaine", a1.id, a2.id);
        let resp = app
            .clone()
            .oneshot(
                Request::post(format!("/movie/{}/book/", movie.id))
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], format!("/movie/{}/confirmation/", movie.id));
        let cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        assert!(cookie.starts_with("flash="));

        let bookings = state.store.all_bookings().await.unwrap();
        assert_eq!(bookings.len(), 2);
        assert!(bookings.iter().all(|b| b.user == "guest_rick_blaine"));

        let flash_pair = cookie.split(';').next().unwrap().to_string();
        let resp = app
            .oneshot(
                Request::get(format!("/movie/{}/confirmation/", movie.id))
                    .header(header::COOKIE, flash_pair)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Successfully booked seat(s): A1, A2 for Casablanca!"));
    }

    #[tokio::test]
    async fn empty_selection_goes_back_to_the_grid() {
        let (app, state) = test_app().await;
        let movie = testing::movie(&state.store, "Empty", date(2025, 1, 1)).await;

        let resp = app
            .oneshot(
                Request::post(format!("/movie/{}/book/", movie.id))
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("guest_name=Nobody"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], format!("/movie/{}/book/", movie.id));
        assert!(state.store.all_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancel_removes_booking_and_unknown_is_404() {
        let (app, state) = test_app().await;
        let movie = testing::movie(&state.store, "Cancelled", date(2025, 1, 1)).await;
        let seat = testing::seat(&state.store, "A1").await;
        let guest = state.store.guest_user("walk in").await.unwrap();
        let booking = state.store.create_booking(&guest, movie.id, seat.id).await.unwrap();

        let resp = app
            .clone()
            .oneshot(
                Request::post(format!("/booking/{}/cancel/", booking.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/bookings/");
        assert!(state.store.all_bookings().await.unwrap().is_empty());

        let resp = app
            .oneshot(
                Request::post(format!("/booking/{}/cancel/", booking.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn movie_pages_render() {
        let (app, state) = test_app().await;
        let movie = testing::movie(&state.store, "Brazil", date(1985, 2, 20)).await;
        testing::seat(&state.store, "K9").await;

        let uris = [
            "/".to_string(),
            format!("/movie/{}/", movie.id),
            format!("/movie/{}/book/", movie.id),
            "/bookings/".to_string(),
        ];
        for uri in uris {
            let req = Request::get(uri.as_str()).body(Body::empty()).unwrap();
            let resp = app.clone().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        }

        let req = Request::get("/movie/999/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
