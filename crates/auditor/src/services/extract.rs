//! Field extraction from controller responses.
//!
//! Every lookup is by element name, never by position, and an absent or blank field is `None`.

use controller::XmlNode;
use domain::models::{Device, JobDeviceEntry, JobRecord, LicenseEntry};

/// Text of the first descendant named `name`, if non-blank.
pub fn field(node: &XmlNode, name: &str) -> Option<String> {
    node.find_text(name).map(str::to_string)
}

fn child_field(node: &XmlNode, name: &str) -> Option<String> {
    node.child_text(name).map(str::to_string)
}

/// Version reported by an upgrade info/check response.
///
/// Prefers the summary field (`current-version` / `latest-version`). Otherwise takes the
/// first `entry` flagged `yes` under `flag` (`current` / `latest`).
pub fn flagged_version(node: &XmlNode, summary: &str, flag: &str) -> Option<String> {
    if let Some(version) = field(node, summary) {
        return Some(version);
    }
    node.find_all("entry")
        .into_iter()
        .find(|entry| {
            entry
                .child_text(flag)
                .is_some_and(|v| v.eq_ignore_ascii_case("yes"))
        })
        .and_then(|entry| child_field(entry, "version"))
}

pub fn current_version(node: &XmlNode) -> Option<String> {
    flagged_version(node, "current-version", "current")
}

pub fn latest_version(node: &XmlNode) -> Option<String> {
    flagged_version(node, "latest-version", "latest")
}

/// Managed devices in a list-devices response, first occurrence of each serial wins.
pub fn devices(node: &XmlNode) -> Vec<Device> {
    let mut devices: Vec<Device> = Vec::new();
    for entry in node.find_all("entry") {
        let Some(serial) = child_field(entry, "serial") else {
            continue;
        };
        if devices.iter().any(|d| d.serial_number == serial) {
            continue;
        }
        let hostname = child_field(entry, "hostname").unwrap_or_default();
        devices.push(
            Device::new(serial, hostname)
                .with_model(child_field(entry, "model"))
                .with_ip_address(child_field(entry, "ip-address")),
        );
    }
    devices
}

/// License entries in a license-info response. Entries without a feature name are dropped.
pub fn license_entries(node: &XmlNode) -> Vec<LicenseEntry> {
    node.find_all("entry")
        .into_iter()
        .filter_map(|entry| {
            Some(LicenseEntry {
                feature: child_field(entry, "feature")?,
                description: child_field(entry, "description"),
                expires: child_field(entry, "expires"),
            })
        })
        .collect()
}

/// Job records in a job-list response.
pub fn job_records(node: &XmlNode) -> Vec<JobRecord> {
    node.find_all("job")
        .into_iter()
        .map(|job| JobRecord {
            id: child_field(job, "id"),
            job_type: child_field(job, "type"),
            status: child_field(job, "status"),
            result: child_field(job, "result"),
            finished_at: child_field(job, "tfin"),
            entries: job
                .find_all("entry")
                .into_iter()
                .map(|entry| JobDeviceEntry {
                    device_name: child_field(entry, "devicename"),
                    serial_number: child_field(entry, "serial-no"),
                    status: child_field(entry, "status"),
                    result: child_field(entry, "result"),
                })
                .collect(),
        })
        .collect()
}
