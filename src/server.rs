use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    error::SchemaProxyError,
    quota::QuotaStore,
    request_log::{RequestLogger, RequestOutcome},
    schema,
    youtube::MetadataFetcher,
    Result,
};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn MetadataFetcher>,
    pub quota: Arc<dyn QuotaStore>,
    pub request_log: Arc<RequestLogger>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/youtube-schema", get(schema_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Video schema proxy is running. Use /api/youtube-schema?id=VIDEO_ID"
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Deserialize)]
struct SchemaQuery {
    id: Option<String>,
}

/// Per-request pipeline: Validate -> QuotaCheck -> Fetch -> Map -> Respond,
/// terminal on the first failing state. Exactly one log append per request;
/// the quota is consulted exactly once and only after validation passes.
async fn schema_handler(
    State(state): State<AppState>,
    Query(params): Query<SchemaQuery>,
) -> Response {
    let video_id = params.id.unwrap_or_default();
    let result = build_schema(&state, &video_id).await;

    let logged_id = (!video_id.is_empty()).then_some(video_id.as_str());
    let outcome = match &result {
        Ok(_) => RequestOutcome::Ok,
        Err(e) => e.outcome(),
    };
    state.request_log.append(logged_id, outcome).await;

    match result {
        Ok(doc) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            Json(doc),
        )
            .into_response(),
        Err(e) => {
            if matches!(e.outcome(), RequestOutcome::UpstreamError) {
                warn!("upstream fetch failed for {:?}: {}", logged_id, e);
            }
            e.into_response()
        }
    }
}

async fn build_schema(state: &AppState, video_id: &str) -> Result<Value> {
    if video_id.is_empty() {
        return Err(SchemaProxyError::MissingVideoId);
    }

    if !state.quota.admit().await {
        return Err(SchemaProxyError::QuotaExceeded);
    }

    let metadata = state.fetcher.fetch_video(video_id).await?;
    Ok(schema::video_object(&metadata, video_id))
}
