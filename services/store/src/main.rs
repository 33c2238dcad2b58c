use sea_orm::Database;
use tracing::info;

use shopfront_core::config::Config;
use shopfront_core::tracing::init_tracing;

use shopfront_store::changes::ChangeFeed;
use shopfront_store::config::StoreConfig;
use shopfront_store::domain::types::RootIdentity;
use shopfront_store::router::build_router;
use shopfront_store::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing("info,sqlx=warn");

    let config = StoreConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let root = RootIdentity::new(&config.root_admin_email);
    info!(root_admin = root.email(), "root identity configured");

    let state = AppState {
        db,
        root,
        changes: ChangeFeed::new(config.change_feed_capacity),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.store_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("store service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
