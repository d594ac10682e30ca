use controller::{AuthenticationError, CommandError};
use domain::AggregationError;
use thiserror::Error;

/// Failures that end an audit run.
///
/// Per-device command failures never surface here; auditors absorb them as "N/A"/Unknown.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Report aggregation failed: {0}")]
    Aggregation(#[from] AggregationError),

    #[error("Could not build controller client: {0}")]
    Client(#[from] CommandError),

    #[error("No credentials configured for the controller")]
    MissingCredentials,

    #[error("Could not write report: {0}")]
    Output(#[from] std::io::Error),

    #[error("Could not serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}
