use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod cookie;
pub mod handlers;
pub mod multipart;
pub mod page;
pub mod state;

pub use cookie::SessionId;
pub use state::AppState;

/// Uploaded article images can be large phone photos.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(|| async { "OK" }))
        .route("/articles", post(handlers::add_article))
        .route("/articles/clear", post(handlers::clear_queue))
        .route("/articles/:index/remove", post(handlers::remove_article))
        .route("/settings", post(handlers::save_settings))
        .route("/process", post(handlers::process))
        .route("/batch/new", post(handlers::new_batch))
        .route("/downloads/:article/:kind", get(handlers::download))
        .route("/api/session", get(handlers::session_snapshot))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> cf_core::Result<()> {
    let app = create_app(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
