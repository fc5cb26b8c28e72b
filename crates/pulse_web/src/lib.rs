use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/articles", get(handlers::list_articles))
        .route("/api/last-publish", get(handlers::last_publish))
        .route("/api/calendar", get(handlers::upcoming_events))
        .route("/api/refresh", post(handlers::refresh_now))
        .route("/api/publish/:kind", post(handlers::trigger_publish))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use pulse_core::{PublishOutcome, Result, StructuredArticle};
}
