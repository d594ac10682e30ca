//! HTTP client for the controller's administrative API.
//!
//! All requests go to a single `/api/` endpoint. Operational commands are sent as
//! `type=op&cmd=<xml>&key=<key>[&target=<serial>]`, and every response is an XML
//! `<response status="...">` envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::api::OperationalApi;
use crate::command::OperationalCommand;
use crate::error::CommandError;
use crate::metrics::{record_command_failure, CommandTimer};
use crate::session::Session;
use crate::xml::XmlNode;

/// Longest slice of a response body quoted in an error message.
const BODY_SNIPPET_CHARS: usize = 200;

/// Where the controller's API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerEndpoint {
    base_url: String,
}

impl ControllerEndpoint {
    /// Accepts a bare host/IP (HTTPS is assumed) or a full `http(s)://` base URL.
    pub fn new(host: &str) -> Self {
        let host = host.trim().trim_end_matches('/');
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_url(&self) -> String {
        format!("{}/api/", self.base_url)
    }
}

/// Builds the HTTP client shared by key generation and operational commands.
///
/// Certificate verification is the caller's policy; controllers commonly run with
/// self-signed certificates.
pub fn build_http_client(timeout: Duration, verify_tls: bool) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(!verify_tls)
        .build()
}

/// Outcome of checking a response envelope.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Envelope {
    Success(XmlNode),
    Error(String),
    NotAResponse(String),
}

/// Classifies a parsed document by its `<response status="...">` envelope.
pub(crate) fn open_envelope(root: XmlNode) -> Envelope {
    if root.name() != "response" {
        return Envelope::NotAResponse(format!("unexpected root element <{}>", root.name()));
    }
    match root.attr("status") {
        Some("error") => Envelope::Error(error_message(&root)),
        _ => Envelope::Success(root),
    }
}

fn error_message(root: &XmlNode) -> String {
    let Some(msg) = root.find("msg") else {
        return "no message".to_string();
    };
    let lines: Vec<&str> = msg
        .find_all("line")
        .into_iter()
        .map(XmlNode::text)
        .filter(|t| !t.is_empty())
        .collect();
    if !lines.is_empty() {
        lines.join("; ")
    } else if !msg.text().is_empty() {
        msg.text().to_string()
    } else {
        "no message".to_string()
    }
}

pub(crate) fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}

/// Parses a response body and unwraps its envelope into a command result.
pub(crate) fn parse_command_response(body: &str) -> Result<XmlNode, CommandError> {
    let root = XmlNode::parse(body).map_err(|e| CommandError::Malformed(e.to_string()))?;
    match open_envelope(root) {
        Envelope::Success(node) => Ok(node),
        Envelope::Error(message) => Err(CommandError::ControllerRejected(message)),
        Envelope::NotAResponse(message) => Err(CommandError::Malformed(message)),
    }
}

/// Operational command client backed by HTTPS.
pub struct CommandClient {
    http: Client,
    endpoint: ControllerEndpoint,
    timeout_ms: u64,
}

impl CommandClient {
    /// Create a new command client with a per-call timeout.
    pub fn new(
        endpoint: ControllerEndpoint,
        timeout: Duration,
        verify_tls: bool,
    ) -> Result<Self, CommandError> {
        let http = build_http_client(timeout, verify_tls)
            .map_err(|e| CommandError::Network(e.to_string()))?;
        Ok(Self {
            http,
            endpoint,
            timeout_ms: timeout.as_millis() as u64,
        })
    }

    pub fn endpoint(&self) -> &ControllerEndpoint {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> CommandError {
        if err.is_timeout() {
            CommandError::Timeout(self.timeout_ms)
        } else {
            // The URL carries the API key; keep it out of the message.
            CommandError::Network(err.without_url().to_string())
        }
    }

    async fn send(
        &self,
        session: &Session,
        command: OperationalCommand,
        target: Option<&str>,
    ) -> Result<XmlNode, CommandError> {
        let cmd = command.to_xml();
        let mut params: Vec<(&str, &str)> =
            vec![("type", "op"), ("cmd", cmd.as_str()), ("key", session.key())];
        if let Some(target) = target {
            params.push(("target", target));
        }

        let response = self
            .http
            .get(self.endpoint.api_url())
            .query(&params)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CommandError::ControllerRejected(format!(
                "HTTP {}: {}",
                status,
                snippet(&body)
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;
        parse_command_response(&body)
    }
}

#[async_trait]
impl OperationalApi for CommandClient {
    async fn execute(
        &self,
        session: &Session,
        command: OperationalCommand,
        target: Option<&str>,
    ) -> Result<XmlNode, CommandError> {
        let timer = CommandTimer::new(command.name());
        let result = self.send(session, command, target).await;
        let duration_ms = timer.elapsed_ms();
        timer.record();

        match &result {
            Ok(_) => debug!(
                command = %command,
                device = target.unwrap_or("controller"),
                duration_ms = duration_ms,
                "Operational command succeeded"
            ),
            Err(e) => {
                record_command_failure(command.name(), e.cause());
                warn!(
                    command = %command,
                    device = target.unwrap_or("controller"),
                    cause = %e.cause(),
                    error = %e,
                    duration_ms = duration_ms,
                    "Operational command failed"
                );
            }
        }
        result
    }
}
