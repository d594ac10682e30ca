//! Version comparison rules.

use crate::models::version::{PackageName, VersionStatus, NOT_AVAILABLE};

/// Classifies an installed version against the latest available one.
///
/// - URL Filtering has no latest-version check on the controller, so it is always `Unknown`.
/// - Either side missing (`"N/A"`) is `Unknown`.
/// - Otherwise exact string equality decides between `UpToDate` and `Outdated`.
pub fn classify_version(package: PackageName, current: &str, latest: &str) -> VersionStatus {
    if package == PackageName::UrlFiltering {
        return VersionStatus::Unknown;
    }
    if current == NOT_AVAILABLE || latest == NOT_AVAILABLE {
        return VersionStatus::Unknown;
    }
    if current == latest {
        VersionStatus::UpToDate
    } else {
        VersionStatus::Outdated
    }
}
