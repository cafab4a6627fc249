pub mod app_user;
pub mod event;
pub mod refresh_token;
