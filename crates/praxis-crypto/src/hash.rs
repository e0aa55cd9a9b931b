//! Hashing utilities for Praxis

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute SHA-256 hash and return as hex string
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// First `len` hex chars of the SHA-256 of `data`
///
/// Used for plan ids and node ids where a full digest is overkill.
pub fn short_digest(data: &[u8], len: usize) -> String {
    let mut digest = sha256_hex(data);
    digest.truncate(len);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_width() {
        let hash = sha256_hex(b"Hello, Praxis!");
        assert_eq!(hash.len(), 64); // 32 bytes = 64 hex chars
    }

    #[test]
    fn test_sha256_is_deterministic() {
        assert_eq!(sha256_hex(b"mandate"), sha256_hex(b"mandate"));
        assert_ne!(sha256_hex(b"mandate"), sha256_hex(b"mandates"));
    }

    #[test]
    fn test_short_digest_is_a_prefix() {
        let full = sha256_hex(b"plan");
        let short = short_digest(b"plan", 8);
        assert_eq!(short.len(), 8);
        assert!(full.starts_with(&short));
    }
}
