//! Hashing helpers for keeping credentials out of log output.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest when fingerprinting a secret.
const FINGERPRINT_LEN: usize = 12;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Short, stable, non-reversible identifier for a secret such as an API key.
///
/// Two sessions holding the same key log the same fingerprint, which is enough to correlate
/// log lines without ever writing the key itself.
pub fn key_fingerprint(secret: &str) -> String {
    let mut digest = sha256_hex(secret);
    digest.truncate(FINGERPRINT_LEN);
    digest
}
