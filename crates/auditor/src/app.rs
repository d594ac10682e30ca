//! Audit run orchestration.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use controller::{CommandClient, ControllerEndpoint, OperationalApi, Session, SessionManager};
use domain::models::AuditReport;
use domain::AggregationError;
use tracing::{info, warn};

use crate::config::{AuditConfig, Config, ControllerConfig};
use crate::error::AuditError;
use crate::services::{DeviceEnumerator, JobAuditor, LicenseAuditor, VersionAuditor};

/// Runs the enabled auditors against one controller session and aggregates their results.
pub struct AuditRunner {
    api: Arc<dyn OperationalApi>,
    settings: AuditConfig,
    today: Option<NaiveDate>,
}

impl AuditRunner {
    pub fn new(api: Arc<dyn OperationalApi>, settings: AuditConfig) -> Self {
        Self {
            api,
            settings,
            today: None,
        }
    }

    /// Pins the date license expiry is measured against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Audits every managed device.
    ///
    /// Only a structural defect in the aggregated results fails the run; command failures show up
    /// as "N/A"/Unknown values in the report.
    pub async fn run(&self, session: Session) -> Result<AuditReport, AggregationError> {
        let session = Arc::new(session);
        let concurrency = self.settings.concurrency;

        let devices = DeviceEnumerator::new(Arc::clone(&self.api))
            .list_devices(&session)
            .await;
        if devices.is_empty() {
            warn!("No managed devices found, nothing to audit");
            return Ok(AuditReport::empty());
        }

        let versions = if self.settings.versions {
            VersionAuditor::new(Arc::clone(&self.api), concurrency)
                .audit_versions(&session, &devices)
                .await
        } else {
            BTreeMap::new()
        };

        let licenses = if self.settings.licenses {
            let mut auditor = LicenseAuditor::new(Arc::clone(&self.api), concurrency);
            if let Some(today) = self.today {
                auditor = auditor.with_today(today);
            }
            auditor.audit_licenses(&session, &devices).await
        } else {
            BTreeMap::new()
        };

        let job_outcomes = if self.settings.jobs {
            JobAuditor::new(Arc::clone(&self.api))
                .audit_job_outcomes(&session)
                .await
        } else {
            Vec::new()
        };

        let report = AuditReport::build(devices, versions, licenses, job_outcomes)?;
        info!(
            run_id = %report.run_id,
            devices = report.summary.devices,
            outdated_packages = report.summary.outdated_packages,
            expired_licenses = report.summary.expired_licenses,
            failed_jobs = report.summary.failed_jobs,
            "Audit complete"
        );
        Ok(report)
    }
}

/// Obtains the session for the run: the pre-issued key if configured, otherwise a generated one.
pub async fn authenticate(config: &ControllerConfig) -> Result<Session, AuditError> {
    if let Some(key) = config.api_key() {
        let session = Session::from_api_key(key);
        info!(
            key_fingerprint = %session.fingerprint(),
            "Using pre-issued API key"
        );
        return Ok(session);
    }

    let (username, password) = config.credentials().ok_or(AuditError::MissingCredentials)?;
    let manager = SessionManager::new(
        ControllerEndpoint::new(&config.host),
        config.timeout(),
        config.verify_tls,
    )?;
    Ok(manager.acquire(username, password).await?)
}

/// Authenticates, audits the fleet and returns the report.
///
/// No operational command is issued unless a session was obtained.
pub async fn run(config: &Config) -> Result<AuditReport, AuditError> {
    let session = authenticate(&config.controller).await?;

    let client = CommandClient::new(
        ControllerEndpoint::new(&config.controller.host),
        config.controller.timeout(),
        config.controller.verify_tls,
    )?;
    let runner = AuditRunner::new(Arc::new(client), config.audit.clone());
    let report = runner.run(session).await?;
    Ok(report.with_controller(config.controller.host.clone()))
}
