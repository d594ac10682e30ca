pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod services;

pub use error::AuditError;
