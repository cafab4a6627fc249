pub mod auth;
pub mod event;
pub mod ingest;
pub mod policy;
mod response;

pub use response::*;
