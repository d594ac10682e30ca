//! License expiry audit.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use controller::{OperationalApi, OperationalCommand, Session};
use domain::models::report::DeviceRecords;
use domain::models::{Device, LicenseRecord};
use domain::services::{classify_licenses, unreadable_licenses};
use tracing::{info, warn};

use super::extract;
use super::pool::run_bounded;

/// Classifies the tracked license features of every device.
pub struct LicenseAuditor {
    api: Arc<dyn OperationalApi>,
    concurrency: usize,
    today: Option<NaiveDate>,
}

impl LicenseAuditor {
    pub fn new(api: Arc<dyn OperationalApi>, concurrency: usize) -> Self {
        Self {
            api,
            concurrency,
            today: None,
        }
    }

    /// Pins the date expiry is measured against. Defaults to the local date at audit time.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// License records for every device, keyed by serial number.
    ///
    /// A device whose license data cannot be read reports every feature as unknown expiry.
    pub async fn audit_licenses(
        &self,
        session: &Arc<Session>,
        devices: &[Device],
    ) -> DeviceRecords<LicenseRecord> {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());

        let results = run_bounded(devices.to_vec(), self.concurrency, |device| {
            let api = Arc::clone(&self.api);
            let session = Arc::clone(session);
            async move { audit_device(api.as_ref(), &session, &device, today).await }
        })
        .await;

        devices
            .iter()
            .zip(results)
            .map(|(device, records)| {
                (
                    device.serial_number.clone(),
                    records.unwrap_or_else(unreadable_licenses),
                )
            })
            .collect()
    }
}

async fn audit_device(
    api: &dyn OperationalApi,
    session: &Session,
    device: &Device,
    today: NaiveDate,
) -> Vec<LicenseRecord> {
    let serial = device.serial_number.as_str();
    let response = match api
        .execute(session, OperationalCommand::LicenseInfo, Some(serial))
        .await
    {
        Ok(response) => response,
        Err(e) => {
            warn!(
                serial = %serial,
                cause = %e.cause(),
                error = %e,
                "License lookup failed, expiry unknown"
            );
            return unreadable_licenses();
        }
    };

    let records = classify_licenses(&extract::license_entries(&response), today);
    let attention = records.iter().filter(|r| r.is_attention_needed()).count();
    info!(serial = %serial, hostname = %device.hostname, attention, "Audited licenses");
    records
}
