use crate::api_state::ApiContext;
use crate::auth::middlewares::common::{extract_token, resolve_user};
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use common_services::api::auth::error::AuthError;
use common_services::database::app_user::User;

/// The caller if a token was sent. A missing token is fine, a bad one is not.
#[derive(Clone, Debug)]
pub struct OptionalUser(pub Option<User>);

impl OptionalUser {
    #[must_use]
    pub fn id(&self) -> Option<i32> {
        self.0.as_ref().map(|user| user.id)
    }
}

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = match extract_token(parts) {
            Ok(token) => Some(resolve_user(parts, state, &token).await?),
            Err(AuthError::MissingToken) => None,
            Err(e) => return Err(e),
        };
        parts.extensions.insert(Self(user.clone()));
        Ok(Self(user))
    }
}
