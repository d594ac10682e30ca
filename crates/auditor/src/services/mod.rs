//! Audit services built on the controller's operational API.
//!
//! Every auditor absorbs per-command failures: an unreadable field becomes "N/A"/Unknown and the
//! audit moves on to the next device.

pub mod devices;
pub mod extract;
pub mod jobs;
pub mod licenses;
pub mod pool;
pub mod versions;

pub use devices::DeviceEnumerator;
pub use jobs::JobAuditor;
pub use licenses::LicenseAuditor;
pub use pool::run_bounded;
pub use versions::{LatestVersions, VersionAuditor};
