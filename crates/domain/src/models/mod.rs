//! Domain models for the fleet audit.

pub mod device;
pub mod job;
pub mod license;
pub mod report;
pub mod version;

pub use device::Device;
pub use job::{JobDeviceEntry, JobOutcome, JobRecord, JobType, PushOutcome};
pub use license::{LicenseEntry, LicenseFeature, LicenseRecord, LicenseStatus};
pub use report::{AuditReport, ReportSummary};
pub use version::{PackageName, VersionRecord, VersionStatus, NOT_AVAILABLE};
