use crate::api::error_response;
use crate::database::DbError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum EventError {
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

fn log_error(error: &EventError) {
    match error {
        EventError::BadRequest(message) => warn!("Event -> Bad request: {}", message),
        EventError::Forbidden(message) => warn!("Event -> Forbidden: {}", message),
        EventError::NotFound(message) => warn!("Event -> Not found: {}", message),
        EventError::Conflict(message) => warn!("Event -> Conflict: {}", message),
        EventError::Internal(e) => warn!("Event -> Internal error: {:?}", e),
    }
}

impl EventError {
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

impl IntoResponse for EventError {
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

impl From<DbError> for EventError {
    fn from(err: DbError) -> Self {
        match err.violated_constraint() {
            Some("event_slug_key") => Self::Conflict("Event slug already exists".to_owned()),
            Some("event_collaborator_event_id_user_id_key") => {
                Self::Conflict("User is already a collaborator".to_owned())
            }
            _ => Self::Internal(eyre::Report::new(err)),
        }
    }
}

impl From<sqlx::Error> for EventError {
    fn from(err: sqlx::Error) -> Self {
        DbError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            EventError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            EventError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EventError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn non_constraint_database_errors_are_internal() {
        let err = EventError::from(DbError::from(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
