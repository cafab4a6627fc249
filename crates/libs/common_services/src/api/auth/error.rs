use crate::api::error_response;
use crate::database::DbError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("Refresh token expired or not found")]
    RefreshTokenExpiredOrNotFound,

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_auth_failure(error: &AuthError) {
    match error {
        AuthError::MissingToken => warn!("Authentication failed: Missing Authorization token."),
        AuthError::InvalidToken => warn!("Authentication failed: Invalid token provided."),
        AuthError::InvalidCredentials => info!("Login failed: Invalid password."),
        AuthError::RefreshTokenExpiredOrNotFound => info!("Refresh token not found or expired."),
        AuthError::UserAlreadyExists(email) => {
            info!("Registration failed: User {} already exists.", email);
        }
        AuthError::UserNotFound => warn!("Authentication failed: User not found."),
        AuthError::BadRequest(message) => info!("Auth -> Bad request: {}", message),
        AuthError::Forbidden(message) => warn!("Auth -> Forbidden: {}", message),
        AuthError::Internal(e) => warn!("Internal error during authentication: {:?}", e),
    }
}

impl AuthError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken
            | Self::InvalidToken
            | Self::InvalidCredentials
            | Self::RefreshTokenExpiredOrNotFound => StatusCode::UNAUTHORIZED,
            Self::UserAlreadyExists(_) => StatusCode::CONFLICT,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        log_auth_failure(&self);

        let message = match &self {
            Self::MissingToken | Self::InvalidToken | Self::RefreshTokenExpiredOrNotFound => {
                "Authentication failed".to_owned()
            }
            Self::InvalidCredentials => "Invalid password".to_owned(),
            Self::UserAlreadyExists(_) => "User already exists".to_owned(),
            Self::UserNotFound => "User not found".to_owned(),
            Self::BadRequest(message) => message.clone(),
            Self::Forbidden(_) => "Permission denied".to_owned(),
            Self::Internal(_) => "An internal error occurred".to_owned(),
        };

        error_response(self.status_code(), message)
    }
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        Self::Internal(eyre::Report::new(err))
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Internal(eyre::Report::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::UserAlreadyExists("a@x.com".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::BadRequest("missing".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Internal(eyre::eyre!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_details_do_not_leak() {
        let response = AuthError::Internal(eyre::eyre!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
