use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Error for failures no service owns, such as unknown routes.
///
/// Renders as `{ "kind": "<CODE>", "message": "<text>" }`, the same shape
/// service-specific errors use.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Build the JSON error body used by every Shopfront service.
pub fn error_body(kind: &str, message: String) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "kind": kind,
        "message": message,
    }))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), error_body(self.kind(), self.to_string())).into_response()
    }
}

/// Fallback handler for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
