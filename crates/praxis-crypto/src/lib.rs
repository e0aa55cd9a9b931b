//! Praxis Crypto - digest and canonical encoding primitives
//!
//! Single-node, in-process, deterministic-hash constructs. Nothing in this
//! crate is a cryptographic proof system; the digests exist for
//! tamper-evidence and reproducibility of the audit chain.

pub mod encode;
pub mod hash;

pub use encode::{CanonicalEncoder, ENCODING_VERSION};
pub use hash::{sha256, sha256_hex, short_digest};
