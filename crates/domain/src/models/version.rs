//! Package version domain models.

use serde::{Deserialize, Serialize};

use crate::services::version_status::classify_version;

/// Placeholder recorded when a version could not be read from the controller.
pub const NOT_AVAILABLE: &str = "N/A";

/// Dynamic content package or firmware tracked per device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageName {
    AppThreat,
    Antivirus,
    Wildfire,
    UrlFiltering,
    Firmware,
}

impl PackageName {
    /// All packages in report order.
    pub const ALL: [PackageName; 5] = [
        PackageName::AppThreat,
        PackageName::Antivirus,
        PackageName::Wildfire,
        PackageName::UrlFiltering,
        PackageName::Firmware,
    ];

    /// Human-readable label used in console output.
    pub fn label(&self) -> &'static str {
        match self {
            PackageName::AppThreat => "App/Threat",
            PackageName::Antivirus => "Antivirus",
            PackageName::Wildfire => "Wildfire",
            PackageName::UrlFiltering => "URL Filtering",
            PackageName::Firmware => "Firmware",
        }
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of comparing an installed version against the latest available one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    UpToDate,
    Outdated,
    Unknown,
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionStatus::UpToDate => write!(f, "Up to date"),
            VersionStatus::Outdated => write!(f, "Outdated"),
            VersionStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Current vs. latest version of one package on one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub package: PackageName,
    pub current_version: String,
    pub latest_version: String,
    pub status: VersionStatus,
}

impl VersionRecord {
    /// Builds a record whose status is derived from the two versions.
    ///
    /// Blank inputs are stored as [`NOT_AVAILABLE`].
    pub fn evaluate(
        package: PackageName,
        current_version: impl Into<String>,
        latest_version: impl Into<String>,
    ) -> Self {
        let current_version = or_not_available(current_version.into());
        let latest_version = or_not_available(latest_version.into());
        let status = classify_version(package, &current_version, &latest_version);
        Self {
            package,
            current_version,
            latest_version,
            status,
        }
    }

    /// Record for a package that could not be read at all.
    pub fn unavailable(package: PackageName) -> Self {
        Self::evaluate(package, NOT_AVAILABLE, NOT_AVAILABLE)
    }
}

fn or_not_available(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        trimmed.to_string()
    }
}
