use crate::api::error_response;
use crate::api::event::error::EventError;
use crate::database::DbError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_error(error: &IngestError) {
    match error {
        IngestError::BadRequest(message) => warn!("Ingest -> Bad request: {}", message),
        IngestError::Forbidden(message) => warn!("Ingest -> Forbidden: {}", message),
        IngestError::NotFound(message) => warn!("Ingest -> Not found: {}", message),
        IngestError::Conflict(message) => warn!("Ingest -> Conflict: {}", message),
        IngestError::Internal(e) => warn!("Ingest -> Internal error: {:?}", e),
    }
}

impl IngestError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        log_error(&self);

        let status = self.status_code();
        let message = match self {
            Self::BadRequest(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message) => message,
            Self::Internal(_) => "An unexpected internal error occurred.".to_owned(),
        };

        error_response(status, message)
    }
}

impl From<EventError> for IngestError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::BadRequest(message) => Self::BadRequest(message),
            EventError::Forbidden(message) => Self::Forbidden(message),
            EventError::NotFound(message) => Self::NotFound(message),
            EventError::Conflict(message) => Self::Conflict(message),
            EventError::Internal(report) => Self::Internal(report),
        }
    }
}

impl From<DbError> for IngestError {
    fn from(err: DbError) -> Self {
        Self::Internal(eyre::Report::new(err))
    }
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(eyre::Report::new(err))
    }
}

impl From<tokio::task::JoinError> for IngestError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(eyre::Report::new(err))
    }
}
