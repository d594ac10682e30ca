//! License domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Subscription feature tracked by the license audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseFeature {
    AppThreat,
    Antivirus,
    Wildfire,
    UrlFiltering,
}

impl LicenseFeature {
    /// All tracked features in report order.
    pub const ALL: [LicenseFeature; 4] = [
        LicenseFeature::AppThreat,
        LicenseFeature::Antivirus,
        LicenseFeature::Wildfire,
        LicenseFeature::UrlFiltering,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LicenseFeature::AppThreat => "App Threat",
            LicenseFeature::Antivirus => "Antivirus",
            LicenseFeature::Wildfire => "Wildfire",
            LicenseFeature::UrlFiltering => "URL Filtering",
        }
    }
}

impl std::fmt::Display for LicenseFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// License state relative to today and the expiry warning window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    NotInstalled,
    Expired,
    ExpiringSoon,
    Valid,
    UnknownExpiry,
}

impl std::fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseStatus::NotInstalled => write!(f, "not_installed"),
            LicenseStatus::Expired => write!(f, "expired"),
            LicenseStatus::ExpiringSoon => write!(f, "expiring_soon"),
            LicenseStatus::Valid => write!(f, "valid"),
            LicenseStatus::UnknownExpiry => write!(f, "unknown_expiry"),
        }
    }
}

/// A raw license entry as reported by the controller for one device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseEntry {
    pub feature: String,
    pub description: Option<String>,
    pub expires: Option<String>,
}

/// Classified license state of one feature on one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRecord {
    pub feature: LicenseFeature,
    pub status: LicenseStatus,
    pub expiry_date: Option<NaiveDate>,
    /// Expiry text exactly as the controller reported it.
    pub raw_expiry: Option<String>,
    pub description: Option<String>,
    /// Days from today until expiry; negative once expired.
    pub days_remaining: Option<i64>,
    pub message: String,
}

impl LicenseRecord {
    pub fn is_attention_needed(&self) -> bool {
        !matches!(self.status, LicenseStatus::Valid)
    }
}
