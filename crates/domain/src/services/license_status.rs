//! License expiry classification.
//!
//! Controller feature names are matched against an explicit alias table, and expiry dates are
//! classified against a fixed warning window:
//! 1. Feature absent → `NotInstalled`
//! 2. Expiry not a calendar date → `UnknownExpiry`
//! 3. Expiry before today → `Expired`
//! 4. Expiry within `[today, today + 180 days]` → `ExpiringSoon`
//! 5. Later → `Valid`

use chrono::{Duration, NaiveDate};
use shared::text::normalize;

use crate::models::license::{LicenseEntry, LicenseFeature, LicenseRecord, LicenseStatus};
use crate::models::version::NOT_AVAILABLE;

/// Licenses expiring within this many days (inclusive) are reported as expiring soon.
pub const EXPIRY_WARNING_DAYS: i64 = 180;

/// Normalized controller feature names accepted for each tracked feature.
pub const FEATURE_ALIASES: &[(LicenseFeature, &[&str])] = &[
    (LicenseFeature::AppThreat, &["app threat", "app/threat", "threat prevention"]),
    (LicenseFeature::Antivirus, &["antivirus", "anti-virus"]),
    (LicenseFeature::Wildfire, &["wildfire", "wildfire license"]),
    (
        LicenseFeature::UrlFiltering,
        &["url filtering", "pan-db url filtering", "advanced url filtering"],
    ),
];

/// Accepted expiry formats, tried in order.
const EXPIRY_FORMATS: &[&str] = &["%Y/%m/%d", "%B %d, %Y"];

/// Maps a controller feature name to a tracked feature, ignoring case and spacing.
pub fn match_feature(name: &str) -> Option<LicenseFeature> {
    let normalized = normalize(name);
    FEATURE_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&normalized.as_str()))
        .map(|(feature, _)| *feature)
}

/// Parses an expiry string as a calendar date, or `None` if it is not one.
pub fn parse_expiry(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    EXPIRY_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Classifies one feature given its controller entry, if any.
pub fn classify_license(
    feature: LicenseFeature,
    entry: Option<&LicenseEntry>,
    today: NaiveDate,
) -> LicenseRecord {
    let Some(entry) = entry else {
        return LicenseRecord {
            feature,
            status: LicenseStatus::NotInstalled,
            expiry_date: None,
            raw_expiry: None,
            description: None,
            days_remaining: None,
            message: "Not Installed".to_string(),
        };
    };

    let raw = entry
        .expires
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let description = entry.description.clone();

    let Some(expiry) = raw.and_then(parse_expiry) else {
        let shown = raw.unwrap_or(NOT_AVAILABLE);
        return LicenseRecord {
            feature,
            status: LicenseStatus::UnknownExpiry,
            expiry_date: None,
            raw_expiry: raw.map(str::to_string),
            description,
            days_remaining: None,
            message: format!("Unknown Expiry: {}", shown),
        };
    };

    // `raw` is always present once a date was parsed from it.
    let shown = raw.unwrap_or_default();
    let cutoff = today + Duration::days(EXPIRY_WARNING_DAYS);
    let (status, message) = if expiry < today {
        (LicenseStatus::Expired, format!("Expired on {}", shown))
    } else if expiry <= cutoff {
        (LicenseStatus::ExpiringSoon, format!("Expiring on {}", shown))
    } else {
        (LicenseStatus::Valid, format!("Valid until {}", shown))
    };

    LicenseRecord {
        feature,
        status,
        expiry_date: Some(expiry),
        raw_expiry: Some(shown.to_string()),
        description,
        days_remaining: Some((expiry - today).num_days()),
        message,
    }
}

/// Classifies every tracked feature against a device's license entries.
///
/// When a feature is listed more than once, the last entry wins, so a renewal listed after
/// its expired predecessor is what gets reported.
pub fn classify_licenses(entries: &[LicenseEntry], today: NaiveDate) -> Vec<LicenseRecord> {
    LicenseFeature::ALL
        .iter()
        .map(|feature| {
            let entry = entries
                .iter()
                .rev()
                .find(|e| match_feature(&e.feature) == Some(*feature));
            classify_license(*feature, entry, today)
        })
        .collect()
}

/// Records used when a device's license data could not be read.
pub fn unreadable_licenses() -> Vec<LicenseRecord> {
    LicenseFeature::ALL
        .iter()
        .map(|feature| LicenseRecord {
            feature: *feature,
            status: LicenseStatus::UnknownExpiry,
            expiry_date: None,
            raw_expiry: None,
            description: None,
            days_remaining: None,
            message: format!("Unknown Expiry: {}", NOT_AVAILABLE),
        })
        .collect()
}
