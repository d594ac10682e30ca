//! Shared utilities and common helpers for the fleet audit workspace.
//!
//! This crate provides small, dependency-light functionality used across the other crates:
//! - Credential fingerprinting for log output
//! - Free-text normalization helpers

pub mod crypto;
pub mod text;
