//! In-memory controller for development and testing.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::OperationalApi;
use crate::client::parse_command_response;
use crate::command::OperationalCommand;
use crate::error::CommandError;
use crate::session::Session;
use crate::xml::XmlNode;

/// Response returned for commands without a canned reply: a success envelope with an empty
/// result, so every field lookup comes back absent.
const EMPTY_RESPONSE: &str = r#"<response status="success"><result/></response>"#;

type CallKey = (OperationalCommand, Option<String>);

/// Mock operational API.
///
/// Replies are canned per command and target. Canned XML goes through the same envelope
/// handling as real responses. Every call is recorded.
#[derive(Default)]
pub struct MockController {
    replies: HashMap<CallKey, Result<String, CommandError>>,
    calls: Mutex<Vec<CallKey>>,
}

impl MockController {
    /// Create a mock controller with no canned replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `command` (for `target`, or the controller itself when `None`) with `xml`.
    pub fn respond(mut self, command: OperationalCommand, target: Option<&str>, xml: &str) -> Self {
        self.replies.insert(
            (command, target.map(str::to_string)),
            Ok(xml.to_string()),
        );
        self
    }

    /// Fail `command` for `target` with `error`.
    pub fn fail(
        mut self,
        command: OperationalCommand,
        target: Option<&str>,
        error: CommandError,
    ) -> Self {
        self.replies
            .insert((command, target.map(str::to_string)), Err(error));
        self
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<(OperationalCommand, Option<String>)> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl OperationalApi for MockController {
    async fn execute(
        &self,
        _session: &Session,
        command: OperationalCommand,
        target: Option<&str>,
    ) -> Result<XmlNode, CommandError> {
        let key = (command, target.map(str::to_string));
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(key.clone());

        match self.replies.get(&key) {
            Some(Ok(xml)) => parse_command_response(xml),
            Some(Err(error)) => Err(error.clone()),
            None => parse_command_response(EMPTY_RESPONSE),
        }
    }
}
