//! Canonical, versioned, length-prefixed encoding
//!
//! The audit chain hashes a byte encoding of each entry's fields. The
//! encoding must be unambiguous: two distinct field tuples must never
//! produce the same byte stream, so field boundaries are length-prefixed
//! rather than delimited (or worse, absent). A leading version byte keeps
//! the format evolvable without silently re-interpreting old chains.

use crate::hash::sha256_hex;

/// Version byte prepended to every canonical encoding
pub const ENCODING_VERSION: u8 = 1;

/// Builder for the canonical byte encoding of a field tuple
///
/// Each field is written as a 4-byte big-endian length followed by the
/// field's bytes. `None` payloads are distinguished from empty ones by a
/// presence byte.
#[derive(Debug)]
pub struct CanonicalEncoder {
    buf: Vec<u8>,
}

impl CanonicalEncoder {
    pub fn new() -> Self {
        Self {
            buf: vec![ENCODING_VERSION],
        }
    }

    fn push_field(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        self.buf.extend_from_slice(bytes);
    }

    /// Append a byte-string field
    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.push_field(bytes);
        self
    }

    /// Append a UTF-8 text field
    pub fn text(self, s: &str) -> Self {
        self.bytes(s.as_bytes())
    }

    /// Append an unsigned integer field (8-byte big-endian)
    pub fn u64(self, v: u64) -> Self {
        self.bytes(&v.to_be_bytes())
    }

    /// Append a signed integer field (8-byte big-endian two's complement)
    pub fn i64(self, v: i64) -> Self {
        self.bytes(&v.to_be_bytes())
    }

    /// Append an optional byte-string field with an explicit presence byte
    pub fn optional(mut self, bytes: Option<&[u8]>) -> Self {
        match bytes {
            Some(b) => {
                self.buf.push(1);
                self.push_field(b);
            }
            None => self.buf.push(0),
        }
        self
    }

    /// The finished encoding
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// SHA-256 of the finished encoding, as hex
    pub fn digest_hex(self) -> String {
        sha256_hex(&self.finish())
    }
}

impl Default for CanonicalEncoder {
    fn default() -> Self {
        Self::new()
    }
}
