//! Domain layer for the fleet audit.
//!
//! This crate contains:
//! - Domain models (Device, VersionRecord, LicenseRecord, JobOutcome, AuditReport)
//! - Classification services that turn raw controller values into bounded statuses
//! - Domain error types

pub mod models;
pub mod services;

pub use models::report::AggregationError;
