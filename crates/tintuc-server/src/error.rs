//! HTTP error responses
//!
//! Every failure leaves the server as a status code plus `{"detail": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tintuc_core::{ErrorBody, TinTucError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Conflict(String),

    /// Extractor rejection, keeps axum's status
    #[error("{1}")]
    Rejected(StatusCode, String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Rejected(status, _) => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TinTucError> for ApiError {
    fn from(err: TinTucError) -> Self {
        match err {
            TinTucError::ArticleNotFound(_) => ApiError::NotFound("article not found".into()),
            TinTucError::CategoryNotFound(id) => {
                ApiError::BadRequest(format!("category {} does not exist", id))
            }
            TinTucError::Validation(msg) => ApiError::Unprocessable(msg),
            TinTucError::Conflict(msg) => ApiError::Conflict(msg),
            TinTucError::Downstream(msg) => {
                tracing::error!("Summarization failed: {}", msg);
                ApiError::Internal(format!("summarization failed: {}", msg))
            }
            other => {
                tracing::error!("Request failed: {}", other);
                ApiError::Internal("internal server error".into())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            detail: self.to_string(),
        });
        (status, body).into_response()
    }
}
