use tracing::info;

use dicebox_server::{create_router, AppState};
use dicebox_store::RollStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://dicebox.db?mode=rwc".to_string());
    let store = RollStore::connect(&db_url).await?;
    store.init().await?;

    let app = create_router(AppState { store });

    let addr = std::env::var("BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
