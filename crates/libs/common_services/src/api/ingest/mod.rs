pub mod error;
pub mod filename;
pub mod files;
pub mod interfaces;
pub mod pipeline;
pub mod service;
pub mod sweep;
