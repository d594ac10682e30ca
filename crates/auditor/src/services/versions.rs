//! Content and firmware version audit.
//!
//! Latest content versions are checked once against the controller itself. Current versions and
//! the latest firmware are read per device. Any command that fails leaves its fields at "N/A".

use std::collections::HashMap;
use std::sync::Arc;

use controller::{ContentPackage, OperationalApi, OperationalCommand, Session, XmlNode};
use domain::models::report::DeviceRecords;
use domain::models::{Device, PackageName, VersionRecord, VersionStatus, NOT_AVAILABLE};
use tracing::{debug, info, warn};

use super::extract;
use super::pool::run_bounded;

/// Latest content versions available from the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestVersions {
    content: HashMap<ContentPackage, String>,
}

impl LatestVersions {
    pub fn get(&self, package: ContentPackage) -> Option<&str> {
        self.content.get(&package).map(String::as_str)
    }
}

/// `show system info` field holding a package's installed version.
fn system_info_field(package: PackageName) -> &'static str {
    match package {
        PackageName::AppThreat => "app-version",
        PackageName::Antivirus => "av-version",
        PackageName::Wildfire => "wildfire-version",
        PackageName::UrlFiltering => "url-filtering-version",
        PackageName::Firmware => "sw-version",
    }
}

/// Compares installed against available versions on every device.
pub struct VersionAuditor {
    api: Arc<dyn OperationalApi>,
    concurrency: usize,
}

impl VersionAuditor {
    pub fn new(api: Arc<dyn OperationalApi>, concurrency: usize) -> Self {
        Self { api, concurrency }
    }

    /// Checks the controller for the newest version of each content package.
    pub async fn latest_versions(&self, session: &Session) -> LatestVersions {
        let mut content = HashMap::new();
        for package in ContentPackage::ALL {
            let command = OperationalCommand::ContentUpgradeCheck(package);
            let Some(response) = execute(self.api.as_ref(), session, command, None).await else {
                continue;
            };
            match extract::latest_version(&response) {
                Some(version) => {
                    content.insert(package, version);
                }
                None => debug!(command = %command, "No latest version reported"),
            }
        }
        info!(packages = content.len(), "Fetched latest content versions");
        LatestVersions { content }
    }

    /// Version records for every device, keyed by serial number, in `PackageName::ALL` order.
    pub async fn audit_versions(
        &self,
        session: &Arc<Session>,
        devices: &[Device],
    ) -> DeviceRecords<VersionRecord> {
        let latest = Arc::new(self.latest_versions(session).await);

        let results = run_bounded(devices.to_vec(), self.concurrency, |device| {
            let api = Arc::clone(&self.api);
            let session = Arc::clone(session);
            let latest = Arc::clone(&latest);
            async move { audit_device(api.as_ref(), &session, &device, &latest).await }
        })
        .await;

        devices
            .iter()
            .zip(results)
            .map(|(device, records)| {
                let records = records.unwrap_or_else(|| {
                    warn!(serial = %device.serial_number, "Version audit aborted, reporting unknown");
                    unavailable_versions()
                });
                (device.serial_number.clone(), records)
            })
            .collect()
    }
}

/// All packages with both versions unavailable.
pub fn unavailable_versions() -> Vec<VersionRecord> {
    PackageName::ALL
        .iter()
        .map(|package| VersionRecord::unavailable(*package))
        .collect()
}

async fn audit_device(
    api: &dyn OperationalApi,
    session: &Session,
    device: &Device,
    latest: &LatestVersions,
) -> Vec<VersionRecord> {
    let serial = device.serial_number.as_str();
    let system_info = execute(api, session, OperationalCommand::SystemInfo, Some(serial)).await;
    let from_system = |package: PackageName| {
        system_info
            .as_ref()
            .and_then(|node| extract::field(node, system_info_field(package)))
    };

    let mut records = Vec::with_capacity(PackageName::ALL.len());
    for package in PackageName::ALL {
        let (current, available) = match ContentPackage::for_package(package) {
            Some(content) => {
                let command = OperationalCommand::ContentUpgradeInfo(content);
                let installed = execute(api, session, command, Some(serial))
                    .await
                    .and_then(|node| extract::current_version(&node))
                    .or_else(|| from_system(package));
                (installed, latest.get(content).map(str::to_string))
            }
            None if package == PackageName::Firmware => {
                let available =
                    execute(api, session, OperationalCommand::SoftwareCheck, Some(serial))
                        .await
                        .and_then(|node| extract::latest_version(&node));
                (from_system(package), available)
            }
            // URL Filtering has no latest-version check.
            None => (from_system(package), None),
        };

        records.push(VersionRecord::evaluate(
            package,
            current.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            available.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ));
    }

    let outdated = records
        .iter()
        .filter(|r| r.status == VersionStatus::Outdated)
        .count();
    info!(serial = %serial, hostname = %device.hostname, outdated, "Audited versions");
    records
}

/// Runs one command, logging and absorbing its failure.
async fn execute(
    api: &dyn OperationalApi,
    session: &Session,
    command: OperationalCommand,
    target: Option<&str>,
) -> Option<XmlNode> {
    match api.execute(session, command, target).await {
        Ok(node) => Some(node),
        Err(e) => {
            warn!(
                serial = target.unwrap_or("controller"),
                command = %command,
                cause = %e.cause(),
                error = %e,
                "Version lookup failed, treating as N/A"
            );
            None
        }
    }
}
