pub mod api;
pub mod browser;
pub mod config;
pub mod documents;
pub mod http;
pub mod library;
pub mod logging;

mod status;
pub use status::Status;

mod tracing;
pub use crate::tracing::Tracing;
