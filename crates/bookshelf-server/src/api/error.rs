use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookshelf_core::BookshelfError;
use thiserror::Error;

/// Request-scoped failures. Clients only ever see a bare status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("book not found")]
    NotFound,

    #[error("bad request")]
    BadRequest,

    #[error("store error: {0}")]
    Store(#[from] BookshelfError),

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(_) | ApiError::Task(_) = &self {
            tracing::error!(error = %self, "request failed");
        }
        self.status().into_response()
    }
}
