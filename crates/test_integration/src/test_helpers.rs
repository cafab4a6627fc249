use crate::runner::context::test_context::TestContext;
use crate::test_constants::PASSWORD;
use color_eyre::Result;
use color_eyre::eyre::ensure;
use common_services::api::auth::interfaces::{CreateUser, LoginResponse, LoginUser, RegisterResponse};
use common_services::api::event::interfaces::{CreateEventRequest, EventResponse};
use common_services::database::app_user::User;
use common_services::database::event::event::Event;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

pub async fn register(context: &TestContext, email: &str, name: &str) -> Result<User> {
    let response = context
        .http_client
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            email: email.to_owned(),
            name: name.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    ensure!(
        response.status().is_success(),
        "register {email} returned {}",
        response.status()
    );
    let body: RegisterResponse = response.json().await?;
    Ok(body.user)
}

pub async fn login(context: &TestContext, email: &str) -> Result<LoginResponse> {
    let response = context
        .http_client
        .post(context.url("/auth/login"))
        .json(&LoginUser {
            email: email.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    ensure!(
        response.status().is_success(),
        "login {email} returned {}",
        response.status()
    );
    Ok(response.json().await?)
}

/// Logs in and returns only the access token.
pub async fn access_token(context: &TestContext, email: &str) -> Result<String> {
    Ok(login(context, email).await?.tokens.access_token)
}

pub async fn create_event(context: &TestContext, token: &str, name: &str) -> Result<Event> {
    let response = context
        .http_client
        .post(context.url("/events"))
        .bearer_auth(token)
        .json(&CreateEventRequest {
            name: name.to_owned(),
            owner_id: None,
        })
        .send()
        .await?;
    ensure!(
        response.status().is_success(),
        "create event {name} returned {}",
        response.status()
    );
    let body: EventResponse = response.json().await?;
    Ok(body.event)
}

/// A gradient PNG, big enough that the resize path is taken.
pub fn png_bytes(width: u32, height: u32) -> Result<Vec<u8>> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
