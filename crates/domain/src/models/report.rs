//! Audit report aggregation.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::device::Device;
use super::job::{JobOutcome, PushOutcome};
use super::license::{LicenseRecord, LicenseStatus};
use super::version::{VersionRecord, VersionStatus};

/// Per-device records keyed by device serial number.
pub type DeviceRecords<T> = BTreeMap<String, Vec<T>>;

/// Structural inconsistency between the device list and the per-device results.
///
/// This indicates a defect in the audit pipeline rather than a controller problem.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Duplicate device in device list: {0}")]
    DuplicateDevice(String),

    #[error("Version results reference unknown device: {0}")]
    UnknownVersionDevice(String),

    #[error("License results reference unknown device: {0}")]
    UnknownLicenseDevice(String),
}

/// Counts of findings that need operator attention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub devices: usize,
    pub outdated_packages: usize,
    pub unknown_versions: usize,
    pub expired_licenses: usize,
    pub expiring_licenses: usize,
    pub missing_licenses: usize,
    pub failed_jobs: usize,
    pub jobs_with_warnings: usize,
}

impl ReportSummary {
    fn compute(
        devices: &[Device],
        versions: &DeviceRecords<VersionRecord>,
        licenses: &DeviceRecords<LicenseRecord>,
        job_outcomes: &[JobOutcome],
    ) -> Self {
        let version_records = versions.values().flatten();
        let license_records: Vec<&LicenseRecord> = licenses.values().flatten().collect();
        let (mut outdated_packages, mut unknown_versions) = (0, 0);
        for record in version_records {
            match record.status {
                VersionStatus::Outdated => outdated_packages += 1,
                VersionStatus::Unknown => unknown_versions += 1,
                VersionStatus::UpToDate => {}
            }
        }
        let count_licenses = |status: LicenseStatus| {
            license_records
                .iter()
                .filter(|r| r.status == status)
                .count()
        };

        Self {
            devices: devices.len(),
            outdated_packages,
            unknown_versions,
            expired_licenses: count_licenses(LicenseStatus::Expired),
            expiring_licenses: count_licenses(LicenseStatus::ExpiringSoon),
            missing_licenses: count_licenses(LicenseStatus::NotInstalled),
            failed_jobs: job_outcomes.iter().filter(|o| o.is_failure()).count(),
            jobs_with_warnings: job_outcomes
                .iter()
                .filter(|o| o.push_outcome == PushOutcome::SuccessWithWarnings)
                .count(),
        }
    }
}

/// Results of one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    pub devices: Vec<Device>,
    pub versions: DeviceRecords<VersionRecord>,
    pub licenses: DeviceRecords<LicenseRecord>,
    pub job_outcomes: Vec<JobOutcome>,
    pub summary: ReportSummary,
}

impl AuditReport {
    /// Merges auditor results into a report.
    ///
    /// Every key of `versions` and `licenses` must be the serial number of a device in `devices`,
    /// and serial numbers in `devices` must be unique.
    pub fn build(
        devices: Vec<Device>,
        versions: DeviceRecords<VersionRecord>,
        licenses: DeviceRecords<LicenseRecord>,
        job_outcomes: Vec<JobOutcome>,
    ) -> Result<Self, AggregationError> {
        let mut known = HashSet::with_capacity(devices.len());
        for device in &devices {
            if !known.insert(device.serial_number.as_str()) {
                return Err(AggregationError::DuplicateDevice(
                    device.serial_number.clone(),
                ));
            }
        }
        if let Some(serial) = versions.keys().find(|k| !known.contains(k.as_str())) {
            return Err(AggregationError::UnknownVersionDevice(serial.clone()));
        }
        if let Some(serial) = licenses.keys().find(|k| !known.contains(k.as_str())) {
            return Err(AggregationError::UnknownLicenseDevice(serial.clone()));
        }

        let summary = ReportSummary::compute(&devices, &versions, &licenses, &job_outcomes);
        Ok(Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            controller: None,
            devices,
            versions,
            licenses,
            job_outcomes,
            summary,
        })
    }

    /// A report for a controller with nothing to audit.
    pub fn empty() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            controller: None,
            devices: Vec::new(),
            versions: BTreeMap::new(),
            licenses: BTreeMap::new(),
            job_outcomes: Vec::new(),
            summary: ReportSummary::default(),
        }
    }

    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn versions_for(&self, device: &Device) -> &[VersionRecord] {
        self.versions
            .get(&device.serial_number)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn licenses_for(&self, device: &Device) -> &[LicenseRecord] {
        self.licenses
            .get(&device.serial_number)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
