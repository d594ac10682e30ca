//! Deployment job outcome classification.

use shared::text::title_case;

use crate::models::job::{JobDeviceEntry, JobOutcome, JobRecord, JobType, PushOutcome};

/// Controller status of a job that has run to completion.
pub const FINISHED_STATUS: &str = "FIN";

/// Ordered substring rules applied to lowercased result text. The first match wins, so
/// `"warning"` takes precedence over `"ok"`/`"success"`.
pub const OUTCOME_RULES: &[(&str, PushOutcome)] = &[
    ("warning", PushOutcome::SuccessWithWarnings),
    ("ok", PushOutcome::Success),
    ("success", PushOutcome::Success),
    ("fail", PushOutcome::Failed),
];

/// Whether a job status marks a finished job.
pub fn is_finished(status: &str) -> bool {
    status.trim().eq_ignore_ascii_case(FINISHED_STATUS)
}

/// Classifies a device's free-text job result.
pub fn classify_push_result(result: Option<&str>) -> PushOutcome {
    let Some(raw) = result.map(str::trim).filter(|r| !r.is_empty()) else {
        return PushOutcome::Unknown;
    };
    let cleaned = raw.to_lowercase();
    OUTCOME_RULES
        .iter()
        .find(|(needle, _)| cleaned.contains(needle))
        .map(|(_, outcome)| outcome.clone())
        .unwrap_or_else(|| PushOutcome::Other(title_case(&cleaned)))
}

/// Per-device outcomes of one job, or nothing if the job is not a finished
/// commit/push/template job.
pub fn outcomes_for_job(job: &JobRecord) -> Vec<JobOutcome> {
    let Some(job_type) = job.job_type.as_deref().and_then(JobType::parse) else {
        return Vec::new();
    };
    if !job.status.as_deref().is_some_and(is_finished) {
        return Vec::new();
    }

    job.entries
        .iter()
        .map(|entry| outcome_for_entry(job, job_type, entry))
        .collect()
}

fn outcome_for_entry(job: &JobRecord, job_type: JobType, entry: &JobDeviceEntry) -> JobOutcome {
    JobOutcome {
        job_id: job.id.clone(),
        job_type,
        device_name: entry
            .device_name
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        serial_number: entry
            .serial_number
            .clone()
            .unwrap_or_else(|| "-".to_string()),
        deployment_status: entry.status.clone().unwrap_or_else(|| "-".to_string()),
        push_outcome: classify_push_result(entry.result.as_deref()),
        job_result: job.result.clone(),
        finished_at: job.finished_at.clone(),
    }
}
