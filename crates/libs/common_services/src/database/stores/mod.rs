pub mod event_collaborator_store;
pub mod event_image_store;
pub mod event_store;
pub mod refresh_token_store;
pub mod user_store;
