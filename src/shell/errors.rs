// Maps every failure that reaches an HTTP handler to a status code and a
// `{"detail": "..."}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::shared::core::errors::RepositoryError;
use crate::shared::infrastructure::tabular::TabularError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Tabular(#[from] TabularError),

    #[error("unexpected: {0}")]
    Unexpected(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ApplicationError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApplicationError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
            ApplicationError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApplicationError::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            ApplicationError::Repository(RepositoryError::InUse(_)) => StatusCode::BAD_REQUEST,
            ApplicationError::Repository(RepositoryError::Database(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApplicationError::Tabular(TabularError::UnsupportedFormat) => StatusCode::BAD_REQUEST,
            ApplicationError::Tabular(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApplicationError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
