pub mod event;
pub mod event_collaborator;
pub mod event_image;
