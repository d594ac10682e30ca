//! Session management against the controller.
//!
//! A session is one API key, obtained once per audit run and lent read-only to every command.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use shared::crypto::key_fingerprint;
use tracing::{error, info};

use crate::client::{build_http_client, open_envelope, snippet, ControllerEndpoint, Envelope};
use crate::error::AuthenticationError;
use crate::xml::XmlNode;

/// An authenticated API session. Immutable once issued.
#[derive(Clone)]
pub struct Session {
    key: String,
    issued_at: DateTime<Utc>,
}

impl Session {
    /// Wraps a pre-issued API key without contacting the controller.
    pub fn from_api_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Loggable identifier for the key.
    pub fn fingerprint(&self) -> String {
        key_fingerprint(&self.key)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("key", &format_args!("<redacted {}>", self.fingerprint()))
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Obtains sessions through the controller's key generation call.
pub struct SessionManager {
    http: Client,
    endpoint: ControllerEndpoint,
    timeout_ms: u64,
}

impl SessionManager {
    pub fn new(
        endpoint: ControllerEndpoint,
        timeout: Duration,
        verify_tls: bool,
    ) -> Result<Self, AuthenticationError> {
        let http = build_http_client(timeout, verify_tls)
            .map_err(|e| AuthenticationError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            http,
            endpoint,
            timeout_ms: timeout.as_millis() as u64,
        })
    }

    /// Generates an API key for the given credentials. Single attempt, no retry.
    pub async fn acquire(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthenticationError> {
        info!(
            controller = %self.endpoint.base_url(),
            username = %username,
            "Authenticating to controller"
        );

        match self.request_key(username, password).await {
            Ok(session) => {
                info!(
                    key_fingerprint = %session.fingerprint(),
                    "Controller session established"
                );
                Ok(session)
            }
            Err(e) => {
                error!(error = %e, "Controller authentication failed");
                Err(e)
            }
        }
    }

    async fn request_key(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthenticationError> {
        let response = self
            .http
            .post(self.endpoint.api_url())
            .form(&[("type", "keygen"), ("user", username), ("password", password)])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        // Rejected credentials usually come back as a 403 with an error envelope.
        let parsed = XmlNode::parse(&body);
        if !status.is_success() {
            let message = match parsed.map(open_envelope) {
                Ok(Envelope::Error(message)) => message,
                _ => format!("HTTP {}: {}", status, snippet(&body)),
            };
            return Err(AuthenticationError::Rejected(message));
        }

        let root = parsed.map_err(|e| AuthenticationError::Malformed(e.to_string()))?;
        match open_envelope(root) {
            Envelope::Success(node) => node
                .find_text("key")
                .map(Session::from_api_key)
                .ok_or(AuthenticationError::MissingKey),
            Envelope::Error(message) => Err(AuthenticationError::Rejected(message)),
            Envelope::NotAResponse(message) => Err(AuthenticationError::Malformed(message)),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> AuthenticationError {
        if err.is_timeout() {
            AuthenticationError::Timeout(self.timeout_ms)
        } else {
            AuthenticationError::Transport(err.without_url().to_string())
        }
    }
}
