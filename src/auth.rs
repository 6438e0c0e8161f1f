use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose};

use crate::{AppState, entities::user, error::AppError};

/// Authenticated caller, resolved from an HTTP Basic `Authorization` header.
#[derive(Clone, Debug)]
pub struct AuthUser(pub user::Model);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let (username, password) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_basic)
            .ok_or(AppError::Unauthorized)?;

        match state.store.authenticate(&username, &password).await? {
            Some(user) => Ok(Self(user)),
            None => {
                tracing::debug!(%username, "rejected credentials");
                Err(AppError::Unauthorized)
            }
        }
    }
}

fn parse_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (username, password) = credentials.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

#[cfg(test)]
pub fn basic_header(username: &str, password: &str) -> String {
    format!("Basic {}", general_purpose::STANDARD.encode(format!("{username}:{password}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_credentials() {
        let header = basic_header("ripley", "nostromo:180");
        assert_eq!(parse_basic(&header), Some(("ripley".into(), "nostromo:180".into())));
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert_eq!(parse_basic("Bearer abc"), None);
        assert_eq!(parse_basic("Basic !!!"), None);
        let no_colon = format!("Basic {}", general_purpose::STANDARD.encode("nocolon"));
        assert_eq!(parse_basic(&no_colon), None);
    }
}
