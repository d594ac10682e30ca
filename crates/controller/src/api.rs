//! Operational API abstraction.

use crate::command::OperationalCommand;
use crate::error::CommandError;
use crate::session::Session;
use crate::xml::XmlNode;

/// Issues operational commands against the controller.
///
/// Implementations are stateless apart from their transport: every call is an independent,
/// idempotent read, so one instance may be shared across concurrent device audits.
#[async_trait::async_trait]
pub trait OperationalApi: Send + Sync {
    /// Execute a command, optionally scoped to one managed device by serial number.
    ///
    /// Returns the `<result>`-bearing response tree. A missing field in the response is never
    /// an error; only transport, status, and parse failures are.
    async fn execute(
        &self,
        session: &Session,
        command: OperationalCommand,
        target: Option<&str>,
    ) -> Result<XmlNode, CommandError>;
}
