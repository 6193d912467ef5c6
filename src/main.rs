mod config;
mod db;
mod error;
mod models;
mod params;
mod query;
mod routes;

use crate::config::AppConfig;
use axum::extract::FromRef;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
}

impl FromRef<AppState> for sqlx::PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkpot=info,tower_http=info".into()),
        )
        .init();

    let settings = AppConfig::load().expect("Failed to load config.toml");

    let pool = db::setup_database(&settings).await?;
    let state = AppState { db: pool };
    let app = routes::create_router(state);

    tracing::info!(addr = %settings.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
