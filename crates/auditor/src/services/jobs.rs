//! Deployment job audit.

use std::sync::Arc;

use controller::{OperationalApi, OperationalCommand, Session};
use domain::models::JobOutcome;
use domain::services::outcomes_for_job;
use tracing::{info, warn};

use super::extract;

/// Reports per-device outcomes of finished commit, push and template jobs.
pub struct JobAuditor {
    api: Arc<dyn OperationalApi>,
}

impl JobAuditor {
    pub fn new(api: Arc<dyn OperationalApi>) -> Self {
        Self { api }
    }

    /// Outcomes in job-list order. Empty when the job list cannot be read.
    pub async fn audit_job_outcomes(&self, session: &Session) -> Vec<JobOutcome> {
        let response = match self
            .api
            .execute(session, OperationalCommand::JobList, None)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(cause = %e.cause(), error = %e, "Failed to fetch job history");
                return Vec::new();
            }
        };

        let jobs = extract::job_records(&response);
        let outcomes: Vec<JobOutcome> = jobs.iter().flat_map(outcomes_for_job).collect();
        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        info!(
            jobs = jobs.len(),
            outcomes = outcomes.len(),
            failed,
            "Audited deployment jobs"
        );
        outcomes
    }
}
