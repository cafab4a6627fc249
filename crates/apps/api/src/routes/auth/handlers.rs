//! HTTP handlers for registration, login and session management.

use crate::api_state::ApiContext;
use crate::json_body::JsonBody;
use axum::{Extension, Json, extract::State, http::StatusCode};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::interfaces::{
    CreateUser, LoginResponse, LoginUser, MeResponse, RefreshTokenPayload, RegisterResponse,
    Tokens,
};
use common_services::api::auth::service::{
    authenticate_user, create_user, issue_tokens, logout_user, refresh_tokens,
};
use common_services::api::ErrorBody;
use common_services::database::app_user::{User, UserSummary};
use tracing::instrument;

/// Handles user login and returns the user with a new set of tokens.
///
/// # Errors
///
/// Returns `AuthError` if the email is unknown, the password is wrong or
/// the tokens could not be created.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Email or password missing", body = ErrorBody),
        (status = 401, description = "Invalid password", body = ErrorBody),
        (status = 404, description = "No user with this email", body = ErrorBody),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn login(
    State(context): State<ApiContext>,
    JsonBody(payload): JsonBody<LoginUser>,
) -> Result<Json<LoginResponse>, AuthError> {
    let user = authenticate_user(&context.pool, &payload.email, &payload.password).await?;
    let tokens = issue_tokens(
        &context.pool,
        &context.settings.secrets.jwt,
        &context.settings.auth,
        user.id,
    )
    .await?;

    Ok(Json(LoginResponse {
        success: true,
        user: UserSummary::from(User::from(user)),
        tokens,
    }))
}

/// Handles the registration of a new user.
///
/// # Errors
///
/// Returns `AuthError` if a field is missing, the email is taken or the
/// user could not be stored.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created successfully", body = RegisterResponse),
        (status = 400, description = "A required field is missing", body = ErrorBody),
        (status = 409, description = "User with this email already exists", body = ErrorBody),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn register(
    State(context): State<ApiContext>,
    JsonBody(payload): JsonBody<CreateUser>,
) -> Result<Json<RegisterResponse>, AuthError> {
    let user = create_user(&context.pool, &payload).await?;
    Ok(Json(RegisterResponse {
        success: true,
        user,
    }))
}

/// Handles refreshing the session using a valid refresh token.
///
/// # Errors
///
/// Returns `AuthError` if the refresh token is invalid, expired, or not found in the database.
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "Auth",
    request_body = RefreshTokenPayload,
    responses(
        (status = 200, description = "Session refreshed successfully", body = Tokens),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorBody),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn refresh_session(
    State(context): State<ApiContext>,
    JsonBody(payload): JsonBody<RefreshTokenPayload>,
) -> Result<Json<Tokens>, AuthError> {
    let tokens = refresh_tokens(
        &context.pool,
        &context.settings.secrets.jwt,
        &context.settings.auth,
        &payload.refresh_token,
    )
    .await?;
    Ok(Json(tokens))
}

/// Handles user logout by invalidating the provided refresh token.
///
/// # Errors
///
/// Returns `AuthError` only for database failures.
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    request_body = RefreshTokenPayload,
    responses(
        (status = 204, description = "Logout successful"),
    )
)]
pub async fn logout(
    State(context): State<ApiContext>,
    JsonBody(payload): JsonBody<RefreshTokenPayload>,
) -> Result<StatusCode, AuthError> {
    logout_user(&context.pool, &payload.refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get current user info.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user data", body = MeResponse),
        (status = 401, description = "Authentication required", body = ErrorBody),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(Extension(user): Extension<User>) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        user,
    })
}
