//! Checksum calculation for dataset fingerprinting.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of raw file content.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let result = hasher.finalize();
    hex::encode(result)
}
