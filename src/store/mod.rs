//! Persistence operations over the cinema schema.
//!
//! Every operation goes through [`Store`], which owns the connection pool.
//! Booking state is derived from the `bookings` table only; the `is_booked`
//! flag on seats is stored and returned but never consulted for a movie.

mod bookings;
mod movies;
mod seats;
mod users;

use sea_orm::DatabaseConnection;

pub use bookings::PageBookingOutcome;

#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
    bcrypt_cost: u32,
}

impl Store {
    pub fn new(db: DatabaseConnection, bcrypt_cost: u32) -> Self {
        Self { db, bcrypt_cost }
    }
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}

#[cfg(test)]
pub(crate) mod testing {
    use jiff::civil::Date;

    use super::Store;
    use crate::{
        entities::user,
        models::{MovieView, NewMovie, SeatView},
    };

    // Lowest cost bcrypt accepts.
    pub const TEST_BCRYPT_COST: u32 = 4;

    pub async fn store() -> Store {
        Store::new(crate::db::memory().await, TEST_BCRYPT_COST)
    }

    pub async fn movie(store: &Store, title: &str, release_date: Date) -> MovieView {
        store
            .create_movie(NewMovie {
                title: title.to_string(),
                description: format!("{title} description"),
                release_date,
                duration: 120,
            })
            .await
            .unwrap()
    }

    pub async fn seat(store: &Store, number: &str) -> SeatView {
        store.create_seat(number.to_string(), false).await.unwrap()
    }

    pub async fn user(store: &Store, username: &str) -> user::Model {
        store.register(username, "secret-pass").await.unwrap();
        store.find_username(username).await.unwrap().unwrap()
    }
}
