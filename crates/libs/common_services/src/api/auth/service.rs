use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use crate::api::auth::interfaces::{AuthClaims, CreateUser, Tokens};
use crate::api::auth::token::{
    RefreshTokenParts, generate_refresh_token_parts, split_refresh_token, verify_token,
};
use crate::database::DbError;
use crate::database::app_user::{User, UserWithPassword};
use crate::database::refresh_token_store::RefreshTokenStore;
use crate::database::user_store::UserStore;
use app_state::AuthSettings;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sqlx::{Executor, PgPool, Postgres};
use tracing::{info, instrument, warn};

/// Checks email and password.
///
/// # Errors
///
/// * `AuthError::BadRequest` if either field is empty.
/// * `AuthError::UserNotFound` if no user has this email.
/// * `AuthError::InvalidCredentials` if the password does not match.
#[instrument(skip(pool, password))]
pub async fn authenticate_user(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<UserWithPassword, AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::BadRequest(
            "Email and password are required".to_owned(),
        ));
    }

    let user = UserStore::find_by_email_with_password(pool, email.trim())
        .await?
        .ok_or(AuthError::UserNotFound)?;

    if !verify_password(password.as_bytes(), &user.password)? {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

/// Creates a new user.
///
/// The pre-check only produces a friendlier error, `app_user_email_key` is what
/// actually keeps concurrent registrations of one email apart.
///
/// # Errors
///
/// * `AuthError::BadRequest` if a field is empty.
/// * `AuthError::UserAlreadyExists` if the email is taken.
#[instrument(skip(pool, payload), fields(email = %payload.email))]
pub async fn create_user(pool: &PgPool, payload: &CreateUser) -> Result<User, AuthError> {
    let email = payload.email.trim();
    let name = payload.name.trim();
    if email.is_empty() || name.is_empty() || payload.password.is_empty() {
        return Err(AuthError::BadRequest("All fields are required".to_owned()));
    }

    if UserStore::find_by_email(pool, email).await?.is_some() {
        return Err(AuthError::UserAlreadyExists(email.to_owned()));
    }

    let hashed = hash_password(payload.password.as_bytes())?;
    info!("Creating user email={}, name={}", email, name);

    match UserStore::create(pool, email, name, &hashed).await {
        Ok(user) => Ok(user),
        Err(err) if err.is_unique_violation() => Err(AuthError::UserAlreadyExists(email.to_owned())),
        Err(err) => Err(err.into()),
    }
}

/// Stores a refresh token.
///
/// # Errors
///
/// * Database errors.
pub async fn store_refresh_token(
    executor: impl Executor<'_, Database = Postgres>,
    auth_settings: &AuthSettings,
    user_id: i32,
    parts: &RefreshTokenParts,
) -> Result<(), AuthError> {
    let expires_at = Utc::now() + Duration::days(auth_settings.refresh_token_expiry_days);
    RefreshTokenStore::insert(
        executor,
        user_id,
        &parts.selector,
        &parts.verifier_hash,
        expires_at,
    )
    .await?;
    Ok(())
}

/// Creates a signed access token for a user.
///
/// # Errors
///
/// * `jsonwebtoken::Error` if encoding fails.
pub fn create_access_token(
    jwt_secret: &str,
    auth_settings: &AuthSettings,
    user_id: i32,
) -> Result<(String, u64), AuthError> {
    let exp = (Utc::now() + Duration::minutes(auth_settings.access_token_expiry_minutes))
        .timestamp();
    let claims = AuthClaims { sub: user_id, exp };
    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )?;

    Ok((access_token, exp.max(0) as u64))
}

/// Issues a fresh access token and refresh token for a user.
///
/// # Errors
///
/// * Encoding, hashing or database errors.
pub async fn issue_tokens(
    pool: &PgPool,
    jwt_secret: &str,
    auth_settings: &AuthSettings,
    user_id: i32,
) -> Result<Tokens, AuthError> {
    let (access_token, expiry) = create_access_token(jwt_secret, auth_settings, user_id)?;
    let token_parts = generate_refresh_token_parts()?;
    store_refresh_token(pool, auth_settings, user_id, &token_parts).await?;

    Ok(Tokens {
        expiry,
        access_token,
        refresh_token: token_parts.raw_token,
    })
}

/// Rotates a refresh token: the presented one is deleted and a new pair issued.
///
/// # Errors
///
/// * `AuthError::InvalidToken` if the token is malformed or its verifier is wrong.
/// * `AuthError::RefreshTokenExpiredOrNotFound` if the token is unknown or expired.
/// * `AuthError::UserNotFound` if the owning user no longer exists.
#[instrument(skip(pool, jwt_secret, raw_token))]
pub async fn refresh_tokens(
    pool: &PgPool,
    jwt_secret: &str,
    auth_settings: &AuthSettings,
    raw_token: &str,
) -> Result<Tokens, AuthError> {
    let (selector, verifier_bytes) = split_refresh_token(raw_token)?;
    let record = RefreshTokenStore::find_valid(pool, &selector)
        .await?
        .ok_or(AuthError::RefreshTokenExpiredOrNotFound)?;

    if !verify_token(&verifier_bytes, &record.verifier_hash)? {
        // Wrong verifier for a known selector: treat as theft and revoke everything.
        warn!("Refresh token verifier mismatch for user {}", record.user_id);
        if let Err(e) = RefreshTokenStore::delete_for_user(pool, record.user_id).await {
            warn!("Could not revoke refresh tokens: {e}");
        }
        return Err(AuthError::InvalidToken);
    }

    UserStore::find_by_id(pool, record.user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    let new_parts = generate_refresh_token_parts()?;
    let mut tx = pool.begin().await.map_err(DbError::from)?;
    RefreshTokenStore::delete_by_selector(&mut *tx, &selector).await?;
    store_refresh_token(&mut *tx, auth_settings, record.user_id, &new_parts).await?;
    tx.commit().await.map_err(DbError::from)?;

    let (access_token, expiry) = create_access_token(jwt_secret, auth_settings, record.user_id)?;
    Ok(Tokens {
        expiry,
        access_token,
        refresh_token: new_parts.raw_token,
    })
}

/// Deletes the presented refresh token. Unknown or malformed tokens are ignored
/// so the caller cannot tell which tokens exist.
///
/// # Errors
///
/// * Database errors.
#[instrument(skip(pool, raw_token))]
pub async fn logout_user(pool: &PgPool, raw_token: &str) -> Result<(), AuthError> {
    let Ok((selector, verifier_bytes)) = split_refresh_token(raw_token) else {
        return Ok(());
    };
    let Some(record) = RefreshTokenStore::find(pool, &selector).await? else {
        return Ok(());
    };
    if verify_token(&verifier_bytes, &record.verifier_hash).unwrap_or(false) {
        RefreshTokenStore::delete_by_selector(pool, &selector).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    fn auth_settings() -> AuthSettings {
        AuthSettings {
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 30,
        }
    }

    #[test]
    fn access_token_carries_user_id_and_expiry() -> Result<(), AuthError> {
        let (token, expiry) = create_access_token("secret", &auth_settings(), 42)?;
        let claims = decode::<AuthClaims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )?
        .claims;

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp as u64, expiry);
        assert!(claims.exp > Utc::now().timestamp());
        Ok(())
    }

    #[test]
    fn access_token_rejects_other_secret() -> Result<(), AuthError> {
        let (token, _) = create_access_token("secret", &auth_settings(), 1)?;
        let decoded = decode::<AuthClaims>(
            &token,
            &DecodingKey::from_secret(b"other"),
            &Validation::default(),
        );
        assert!(decoded.is_err());
        Ok(())
    }
}
