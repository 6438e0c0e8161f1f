mod auth;
mod config;
mod db;
mod entities;
mod error;
mod flash;
mod models;
mod routes;
mod store;
mod templates;

use std::sync::Arc;

use crate::{config::Config, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,cinebook=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(config.database_url.as_str()).await?;
    let store = Store::new(db, config.bcrypt_cost);

    if let Some(admin) = &config.admin {
        store.ensure_staff(&admin.username, &admin.password).await?;
    }

    let state = Arc::new(AppState { store });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState { store: store::testing::store().await });
    (routes::router(state.clone()), state)
}
