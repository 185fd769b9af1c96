mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use keepsake_api::state::{AppState, AppStateInner};
use keepsake_api::storage::Storage;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keepsake=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let db = keepsake_db::Database::open(&config.db_path)?;
    let storage = Storage::new(config.upload_dir.clone()).await?;

    let state: AppState = Arc::new(AppStateInner { db, storage });

    let app = keepsake_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Keepsake server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
