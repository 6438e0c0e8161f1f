//! One-shot page messages carried across a redirect in a cookie.

use axum_extra::extract::cookie::CookieJar;
use cookie::Cookie;
use serde::{Deserialize, Serialize};

const FLASH_COOKIE: &str = "flash";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Level {
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }
}

/// Stores `messages` for the next page render.
pub fn push(jar: CookieJar, messages: &[Flash]) -> CookieJar {
    if messages.is_empty() {
        return jar;
    }
    let Ok(json) = serde_json::to_string(messages) else {
        return jar;
    };
    jar.add(
        Cookie::build((FLASH_COOKIE, urlencoding::encode(&json).into_owned()))
            .path("/")
            .http_only(true)
            .max_age(time::Duration::minutes(5)),
    )
}

/// Reads and clears pending messages. Malformed cookies are dropped.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<Flash>) {
    let Some(raw) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, Vec::new());
    };
    let messages = urlencoding::decode(&raw)
        .ok()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default();
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
}
