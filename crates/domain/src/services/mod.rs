//! Domain services for the fleet audit.
//!
//! Services hold the classification rules that operate on domain models. Each one is a pure
//! function of its inputs so the rules can be tested without a controller.

pub mod job_outcome;
pub mod license_status;
pub mod version_status;

pub use job_outcome::{
    classify_push_result, is_finished, outcomes_for_job, FINISHED_STATUS, OUTCOME_RULES,
};
pub use license_status::{
    classify_license, classify_licenses, match_feature, parse_expiry, unreadable_licenses,
    EXPIRY_WARNING_DAYS, FEATURE_ALIASES,
};
pub use version_status::classify_version;
