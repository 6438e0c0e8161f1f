use axum::http::StatusCode;
use jiff::civil::Date;
use maud::{DOCTYPE, Markup, html};

use crate::{
    flash::{Flash, Level},
    models::{BookingView, MovieView, SeatView},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn movie_list_page(movies: &[MovieView], flashes: &[Flash]) -> String {
    page(
        "Now Showing",
        flashes,
        html! {
            div class="flex items-center justify-between" {
                h1 class="text-3xl font-bold text-gray-900" { "Now Showing" }
                a class="text-sm text-blue-600 hover:text-blue-800" href="/bookings/" { "All bookings" }
            }

            @if movies.is_empty() {
                div class="mt-10 bg-white shadow rounded-lg p-8" {
                    p class="text-gray-600" { "No movies are scheduled yet." }
                }
            } @else {
                div class="mt-10 grid gap-4 md:grid-cols-2" {
                    @for movie in movies {
                        (movie_card(movie))
                    }
                }
            }
        },
    )
}

pub fn movie_detail_page(movie: &MovieView, available: &[SeatView]) -> String {
    page(
        &movie.title,
        &[],
        html! {
            a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "← All movies" }
            div class="mt-6 bg-white shadow rounded-lg p-8" {
                h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                p class="mt-2 text-sm text-gray-500" {
                    (movie.release_date) " · " (movie.duration) " min"
                }
                p class="mt-4 text-gray-700" { (movie.description) }

                h2 class="mt-8 text-lg font-semibold text-gray-900" {
                    "Available seats (" (available.len()) ")"
                }
                @if available.is_empty() {
                    p class="mt-2 text-gray-600" { "Sold out." }
                } @else {
                    div class="mt-3 flex flex-wrap gap-2" {
                        @for seat in available {
                            span class="rounded bg-green-100 px-2 py-1 text-sm text-green-800" { (seat.seat_number) }
                        }
                    }
                    a class="mt-8 inline-block rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href=(format!("/movie/{}/book/", movie.id)) {
                        "Book seats"
                    }
                }
            }
        },
    )
}

pub fn seat_booking_page(
    movie: &MovieView,
    seats: &[SeatView],
    booked_ids: &[i32],
    flashes: &[Flash],
) -> String {
    page(
        &format!("Book · {}", movie.title),
        flashes,
        html! {
            a class="text-sm text-blue-600 hover:text-blue-800" href=(format!("/movie/{}/", movie.id)) { "← " (movie.title) }
            div class="mt-6 bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Choose your seats" }

                form class="mt-6 space-y-6" method="post" action=(format!("/movie/{}/book/", movie.id)) {
                    div class="grid grid-cols-6 gap-2" {
                        @for seat in seats {
                            @let taken = booked_ids.contains(&seat.id);
                            label class=(if taken { "rounded border px-2 py-1 text-sm text-gray-400 line-through" } else { "rounded border px-2 py-1 text-sm text-gray-800" }) {
                                input type="checkbox" name="seat_ids" value=(seat.id) disabled[taken];
                                " " (seat.seat_number)
                            }
                        }
                    }

                    div {
                        label class="block text-sm font-medium text-gray-700" for="guest_name" { "Your name" }
                        input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="guest_name" id="guest_name" placeholder="Guest";
                    }

                    button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Book" }
                }
            }
        },
    )
}

pub fn confirmation_page(movie: &MovieView, flashes: &[Flash]) -> String {
    page(
        "Booking confirmed",
        flashes,
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Booking summary" }
                p class="mt-2 text-gray-600" { (movie.title) " · " (movie.release_date) }
                div class="mt-6 flex gap-4" {
                    a class="text-blue-600 hover:text-blue-800" href="/bookings/" { "View all bookings" }
                    a class="text-blue-600 hover:text-blue-800" href="/" { "Back to movies" }
                }
            }
        },
    )
}

pub fn bookings_page(
    bookings: &[BookingView],
    upcoming_count: usize,
    today: Date,
    flashes: &[Flash],
) -> String {
    page(
        "All bookings",
        flashes,
        html! {
            div class="flex items-start justify-between gap-6" {
                div {
                    h1 class="text-3xl font-bold text-gray-900" { "All bookings" }
                    p class="mt-2 text-gray-600" { (bookings.len()) " total · " (upcoming_count) " upcoming" }
                }
                a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "Movies" }
            }

            @if bookings.is_empty() {
                div class="mt-10 bg-white shadow rounded-lg p-8" {
                    p class="text-gray-600" { "No bookings yet." }
                }
            } @else {
                table class="mt-10 w-full bg-white shadow rounded-lg text-left text-sm" {
                    thead {
                        tr { th class="p-3" { "Movie" } th class="p-3" { "Seat" } th class="p-3" { "Guest" } th class="p-3" { "Booked" } th {} }
                    }
                    tbody {
                        @for booking in bookings {
                            tr class="border-t" {
                                td class="p-3" {
                                    (booking.movie_title)
                                    @if booking.release_date >= today {
                                        span class="ml-2 rounded bg-purple-100 px-2 text-xs text-purple-800" { "upcoming" }
                                    }
                                }
                                td class="p-3" { (booking.seat_number) }
                                td class="p-3" { (booking.user) }
                                td class="p-3" { (booking.booking_date.strftime("%Y-%m-%d %H:%M")) }
                                td class="p-3" {
                                    form method="post" action=(format!("/booking/{}/cancel/", booking.id)) {
                                        button class="text-red-600 hover:text-red-800" type="submit" { "Cancel" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        &[],
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Error " (status.as_u16()) }
                p class="mt-4 text-gray-700" { (message) }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
            }
        },
    )
}

fn page(title: &str, flashes: &[Flash], body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-10" {
                    @for flash in flashes {
                        (flash_banner(flash))
                    }
                    (body)
                }
            }
        }
    }
    .into_string()
}

fn flash_banner(flash: &Flash) -> Markup {
    let class = match flash.level {
        Level::Success => "mb-4 rounded-md bg-green-50 p-4 text-green-800",
        Level::Warning => "mb-4 rounded-md bg-yellow-50 p-4 text-yellow-800",
        Level::Error => "mb-4 rounded-md bg-red-50 p-4 text-red-800",
    };
    html! { div class=(class) role="alert" { (flash.message) } }
}

fn movie_card(movie: &MovieView) -> Markup {
    html! {
        a class="block bg-white shadow rounded-lg p-6 hover:shadow-md" href=(format!("/movie/{}/", movie.id)) {
            h2 class="text-xl font-semibold text-gray-900" { (movie.title) }
            p class="mt-1 text-sm text-gray-500" { (movie.release_date) " · " (movie.duration) " min" }
        }
    }
}
