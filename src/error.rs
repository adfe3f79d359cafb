use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::request_log::RequestOutcome;

#[derive(Error, Debug)]
pub enum SchemaProxyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("videoId required")]
    MissingVideoId,

    #[error("video not found: {0}")]
    VideoNotFound(String),

    #[error("daily request limit exceeded")]
    QuotaExceeded,

    #[error("upstream API error: {0}")]
    Upstream(String),
}

impl SchemaProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SchemaProxyError::MissingVideoId => StatusCode::BAD_REQUEST,
            SchemaProxyError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            SchemaProxyError::VideoNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Tag written to the request log for the terminal state this error
    /// represents.
    pub fn outcome(&self) -> RequestOutcome {
        match self {
            SchemaProxyError::MissingVideoId => RequestOutcome::Invalid,
            SchemaProxyError::QuotaExceeded => RequestOutcome::Limit,
            SchemaProxyError::VideoNotFound(_) => RequestOutcome::NotFound,
            _ => RequestOutcome::UpstreamError,
        }
    }
}

impl IntoResponse for SchemaProxyError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status_code(), Json(body)).into_response()
    }
}
