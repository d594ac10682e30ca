//! Deployment job domain models.

use serde::{Deserialize, Serialize};

/// Kind of deployment job considered by the audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Commit,
    Push,
    Template,
}

impl JobType {
    /// Parses a controller job type, case-insensitively. Other job types yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "commit" => Some(JobType::Commit),
            "push" => Some(JobType::Push),
            "template" => Some(JobType::Template),
            _ => None,
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobType::Commit => write!(f, "commit"),
            JobType::Push => write!(f, "push"),
            JobType::Template => write!(f, "template"),
        }
    }
}

/// Classified result of a job on one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushOutcome {
    Success,
    SuccessWithWarnings,
    Failed,
    Unknown,
    /// Result text that matched no rule, title-cased.
    Other(String),
}

impl std::fmt::Display for PushOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PushOutcome::Success => write!(f, "Success"),
            PushOutcome::SuccessWithWarnings => write!(f, "SuccessWithWarnings"),
            PushOutcome::Failed => write!(f, "Failed"),
            PushOutcome::Unknown => write!(f, "Unknown"),
            PushOutcome::Other(text) => f.write_str(text),
        }
    }
}

/// Per-device entry of a job as reported by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobDeviceEntry {
    pub device_name: Option<String>,
    pub serial_number: Option<String>,
    pub status: Option<String>,
    pub result: Option<String>,
}

/// A job as reported by the controller, before filtering and classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobRecord {
    pub id: Option<String>,
    pub job_type: Option<String>,
    pub status: Option<String>,
    pub result: Option<String>,
    pub finished_at: Option<String>,
    pub entries: Vec<JobDeviceEntry>,
}

/// Outcome of one finished job on one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    pub job_type: JobType,
    pub device_name: String,
    pub serial_number: String,
    pub deployment_status: String,
    pub push_outcome: PushOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
}

impl JobOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.push_outcome, PushOutcome::Failed)
    }
}
