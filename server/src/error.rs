//! Error taxonomy for the todo API.
//!
//! # Design
//! A single `Error` enum covers both the store and the HTTP layer. Each
//! variant maps to one status code, and `IntoResponse` renders the same
//! `{"error": ...}` body shape for all of them, so handlers can bubble
//! failures with `?` and never hand axum an unspecified fault.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Errors returned by store operations and rendered by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field was missing or blank after trimming.
    #[error("Title is required")]
    TitleRequired,

    /// No todo with the requested id exists.
    #[error("Todo not found")]
    TodoNotFound,

    /// Catch-all fault boundary: anything unexpected becomes a defined
    /// 500 response instead of an unhandled failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::TitleRequired => StatusCode::BAD_REQUEST,
            Error::TodoNotFound => StatusCode::NOT_FOUND,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
