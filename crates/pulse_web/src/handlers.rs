use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use pulse_core::{PublishOutcome, SummaryKind};

use crate::AppState;

pub async fn list_articles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.snapshot().await)
}

pub async fn last_publish(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.last_publish().await)
}

pub async fn upcoming_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.upcoming_events().await)
}

pub async fn refresh_now(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.orchestrator.refresh_content().await {
        Ok(()) => Json(json!({
            "status": "success",
            "message": "content refreshed",
        })),
        Err(e) => {
            warn!("on-demand refresh failed: {}", e);
            Json(json!({
                "status": "error",
                "message": "refresh failed, previous articles kept",
            }))
        }
    }
}

#[derive(Serialize)]
struct TriggerResponse {
    status: &'static str,
    message: String,
    outcome: PublishOutcome,
}

pub async fn trigger_publish(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Response {
    let kind: SummaryKind = match kind.parse() {
        Ok(kind) => kind,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "status": "error", "message": message })),
            )
                .into_response();
        }
    };

    let outcome = state.orchestrator.trigger_publish(kind).await;
    let (status, message) = match &outcome {
        PublishOutcome::Success { url, .. } => {
            ("success", format!("{} digest posted: {}", kind, url))
        }
        PublishOutcome::RateLimited => (
            "error",
            format!("{} digest skipped: publisher rate limit", kind),
        ),
        PublishOutcome::Failed { .. } => ("error", format!("{} digest failed", kind)),
    };

    Json(TriggerResponse {
        status,
        message,
        outcome,
    })
    .into_response()
}
