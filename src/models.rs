use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use crate::{
    entities::{movie, seat, user},
    error::{AppError, AppResult},
};

const MAX_TITLE_LEN: usize = 200;
const MAX_SEAT_NUMBER_LEN: usize = 10;
const MAX_USERNAME_LEN: usize = 150;

#[derive(Clone, Debug, Serialize)]
pub struct MovieView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: Date,
    pub duration: i32,
}

impl TryFrom<movie::Model> for MovieView {
    type Error = AppError;

    fn try_from(m: movie::Model) -> AppResult<Self> {
        Ok(Self {
            id: m.id,
            title: m.title,
            description: m.description,
            release_date: m.release_date.parse()?,
            duration: m.duration,
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: MovieView,
    pub available_seats_count: u64,
    pub total_bookings: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeatView {
    pub id: i32,
    pub seat_number: String,
    pub is_booked: bool,
}

impl From<seat::Model> for SeatView {
    fn from(s: seat::Model) -> Self {
        Self { id: s.id, seat_number: s.seat_number, is_booked: s.is_booked }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SeatAvailability {
    pub seat_number: String,
    pub movie_id: i32,
    pub is_available: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct BookingView {
    pub id: i32,
    pub movie: i32,
    pub movie_title: String,
    pub seat: i32,
    pub seat_number: String,
    pub user: String,
    pub booking_date: Timestamp,
    #[serde(skip)]
    pub release_date: Date,
}

#[derive(Clone, Debug, Serialize)]
pub struct UserView {
    pub id: i32,
    pub username: String,
    pub is_staff: bool,
}

impl From<user::Model> for UserView {
    fn from(u: user::Model) -> Self {
        Self { id: u.id, username: u.username, is_staff: u.is_staff }
    }
}

/// Request body for movie create/replace/patch. Every field is optional at
/// the wire level so missing fields surface as validation errors.
#[derive(Debug, Default, Deserialize)]
pub struct MoviePayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<String>,
    pub duration: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<Date>,
    pub duration: Option<i32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub release_date: Date,
    pub duration: i32,
}

impl MoviePayload {
    pub fn validate(self) -> AppResult<MovieChanges> {
        let title = self
            .title
            .map(|t| {
                let t = t.trim().to_string();
                if t.is_empty() {
                    return Err(AppError::Validation("Title cannot be empty.".into()));
                }
                if t.chars().count() > MAX_TITLE_LEN {
                    return Err(AppError::Validation(format!(
                        "Title must be at most {MAX_TITLE_LEN} characters."
                    )));
                }
                Ok(t)
            })
            .transpose()?;

        let release_date = self
            .release_date
            .map(|d| {
                d.trim().parse::<Date>().map_err(|_| {
                    AppError::Validation("Release date must be a date in YYYY-MM-DD format.".into())
                })
            })
            .transpose()?;

        let duration = self
            .duration
            .map(|d| match i32::try_from(d) {
                Ok(d) if d > 0 => Ok(d),
                _ => Err(AppError::Validation("Duration must be a positive number.".into())),
            })
            .transpose()?;

        Ok(MovieChanges { title, description: self.description, release_date, duration })
    }
}

impl MovieChanges {
    pub fn require_all(self) -> AppResult<NewMovie> {
        let missing = |field: &str| AppError::Validation(format!("{field} is required."));
        Ok(NewMovie {
            title: self.title.ok_or_else(|| missing("title"))?,
            description: self.description.ok_or_else(|| missing("description"))?,
            release_date: self.release_date.ok_or_else(|| missing("release_date"))?,
            duration: self.duration.ok_or_else(|| missing("duration"))?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SeatPayload {
    pub seat_number: Option<String>,
    pub is_booked: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeatChanges {
    pub seat_number: Option<String>,
    pub is_booked: Option<bool>,
}

impl SeatPayload {
    pub fn validate(self) -> AppResult<SeatChanges> {
        let seat_number = self.seat_number.map(|n| validate_seat_number(&n)).transpose()?;
        Ok(SeatChanges { seat_number, is_booked: self.is_booked })
    }
}

pub fn validate_seat_number(raw: &str) -> AppResult<String> {
    let n = raw.trim();
    if n.is_empty() {
        return Err(AppError::Validation("Seat number cannot be empty.".into()));
    }
    if n.chars().count() > MAX_SEAT_NUMBER_LEN {
        return Err(AppError::Validation(format!(
            "Seat number must be at most {MAX_SEAT_NUMBER_LEN} characters."
        )));
    }
    Ok(n.to_string())
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingPayload {
    pub movie: Option<i32>,
    pub seat: Option<i32>,
}

impl BookingPayload {
    pub fn validate(self) -> AppResult<(i32, i32)> {
        match (self.movie, self.seat) {
            (Some(movie), Some(seat)) => Ok((movie, seat)),
            _ => Err(AppError::Validation("movie and seat are required".into())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub username: String,
    pub password: String,
}

pub fn validate_username(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Username cannot be empty.".into()));
    }
    if name.chars().count() > MAX_USERNAME_LEN
        || !name.chars().all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
    {
        return Err(AppError::Validation(
            "Username may contain at most 150 letters, digits and @/./+/-/_ characters.".into(),
        ));
    }
    Ok(name.to_string())
}

/// `guest_<name>` account used by the booking page.
pub fn guest_username(guest_name: &str) -> String {
    let name = guest_name.trim();
    let name = if name.is_empty() { "Guest" } else { name };
    format!("guest_{}", name.to_lowercase().replace(' ', "_"))
}
