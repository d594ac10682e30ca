//! Controller access layer for the fleet audit.
//!
//! This crate contains:
//! - Session management (API key generation)
//! - The operational command client and its command templates
//! - A queryable XML tree for controller responses
//! - An in-memory controller for tests and dry runs

pub mod api;
pub mod client;
pub mod command;
pub mod error;
pub mod metrics;
pub mod mock;
pub mod session;
pub mod xml;

pub use api::OperationalApi;
pub use client::{CommandClient, ControllerEndpoint};
pub use command::{ContentPackage, OperationalCommand};
pub use error::{AuthenticationError, CommandError, CommandErrorCause};
pub use mock::MockController;
pub use session::{Session, SessionManager};
pub use xml::{XmlError, XmlNode};
