use crate::runner::context::test_context::TestContext;
use crate::test_constants::{OWNER_EMAIL, OWNER_NAME, PASSWORD};
use crate::test_helpers::{login, register};
use color_eyre::Result;
use common_services::api::auth::interfaces::{
    CreateUser, LoginUser, MeResponse, RefreshTokenPayload, Tokens,
};
use common_services::database::user_store::UserStore;
use reqwest::StatusCode;
use serde_json::Value;

pub async fn test_register(context: &TestContext) -> Result<()> {
    // ACT
    let user = register(context, OWNER_EMAIL, OWNER_NAME).await?;

    // ASSERT
    assert_eq!(user.email, OWNER_EMAIL);
    assert_eq!(user.name, OWNER_NAME);

    let all_users = UserStore::list_users(&context.pool).await?;
    assert_eq!(all_users.len(), 1);
    assert_eq!(all_users[0].id, user.id);

    let stored = UserStore::find_by_email_with_password(&context.pool, OWNER_EMAIL)
        .await?
        .expect("registered user is stored");
    assert_ne!(stored.password, PASSWORD, "password must be stored hashed");
    Ok(())
}

pub async fn test_second_register_attempt(context: &TestContext) -> Result<()> {
    // ACT
    let response = context
        .http_client
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            email: OWNER_EMAIL.to_owned(),
            name: "Someone Else".to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;

    // ASSERT
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(UserStore::list_users(&context.pool).await?.len(), 1);
    Ok(())
}

pub async fn test_login(context: &TestContext) -> Result<()> {
    // ACT
    let response = login(context, OWNER_EMAIL).await?;

    // ASSERT
    assert!(response.success);
    assert_eq!(response.user.email, OWNER_EMAIL);
    assert!(!response.tokens.access_token.is_empty());
    assert!(!response.tokens.refresh_token.is_empty());
    Ok(())
}

pub async fn test_login_rejections(context: &TestContext) -> Result<()> {
    // ARRANGE
    let attempt = |email: &str, password: &str| {
        context
            .http_client
            .post(context.url("/auth/login"))
            .json(&LoginUser {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .send()
    };

    // ACT
    let wrong_password = attempt(OWNER_EMAIL, "not the password").await?;
    let unknown_email = attempt("nobody@example.com", PASSWORD).await?;
    let missing_fields = attempt("", "").await?;

    // ASSERT
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing_fields.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

pub async fn test_me(context: &TestContext) -> Result<()> {
    // ARRANGE
    let tokens = login(context, OWNER_EMAIL).await?.tokens;

    // ACT
    let authorized = context
        .http_client
        .get(context.url("/auth/me"))
        .bearer_auth(&tokens.access_token)
        .send()
        .await?;
    let anonymous = context.http_client.get(context.url("/auth/me")).send().await?;

    // ASSERT
    assert_eq!(authorized.status(), StatusCode::OK);
    let me: MeResponse = authorized.json().await?;
    assert_eq!(me.user.email, OWNER_EMAIL);
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

pub async fn test_refresh(context: &TestContext) -> Result<()> {
    // ARRANGE
    let tokens = login(context, OWNER_EMAIL).await?.tokens;
    let refresh = |refresh_token: String| {
        context
            .http_client
            .post(context.url("/auth/refresh"))
            .json(&RefreshTokenPayload { refresh_token })
            .send()
    };

    // ACT
    let first = refresh(tokens.refresh_token.clone()).await?;
    let first_status = first.status();
    let rotated: Tokens = first.json().await?;
    let replayed = refresh(tokens.refresh_token).await?;

    // ASSERT
    assert_eq!(first_status, StatusCode::OK);
    assert_ne!(rotated.refresh_token, "");
    assert_eq!(
        replayed.status(),
        StatusCode::UNAUTHORIZED,
        "a rotated refresh token must not be usable again"
    );
    Ok(())
}

pub async fn test_logout(context: &TestContext) -> Result<()> {
    // ARRANGE
    let tokens = login(context, OWNER_EMAIL).await?.tokens;

    // ACT
    let logout = context
        .http_client
        .post(context.url("/auth/logout"))
        .json(&RefreshTokenPayload {
            refresh_token: tokens.refresh_token.clone(),
        })
        .send()
        .await?;
    let refresh_after_logout = context
        .http_client
        .post(context.url("/auth/refresh"))
        .json(&RefreshTokenPayload {
            refresh_token: tokens.refresh_token,
        })
        .send()
        .await?;

    // ASSERT
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
    assert_eq!(refresh_after_logout.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
