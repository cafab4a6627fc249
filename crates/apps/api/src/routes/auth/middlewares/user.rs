use crate::api_state::ApiContext;
use crate::auth::middlewares::common::{extract_token, resolve_user};
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use common_services::api::auth::error::AuthError;
use common_services::database::app_user::User;

/// Guard for routes that need a signed-in caller.
///
/// On success the [`User`] is also stored in the request extensions, which is
/// where handlers pick it up with `Extension<User>`.
#[derive(Clone, Debug)]
pub struct RequireUser(pub User);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let user = resolve_user(parts, state, &token).await?;
        parts.extensions.insert(user.clone());
        Ok(Self(user))
    }
}
