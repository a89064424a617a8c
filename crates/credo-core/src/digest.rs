//! # Document Fingerprinting
//!
//! SHA-256 fingerprint computation for credential documents. The
//! fingerprint of the document bytes is the [`DocumentHash`] under which
//! the ledger records issuance, and the key every later verification and
//! revocation event joins against.
//!
//! Institutions compute this hash client-side before submitting an
//! issuance transaction; verifiers recompute it from a presented document
//! to look up the ledger record.

use sha2::{Digest, Sha256};

use crate::identity::DocumentHash;

/// Compute the SHA-256 fingerprint of raw document bytes.
pub fn fingerprint_document(bytes: &[u8]) -> DocumentHash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest: [u8; 32] = hasher.finalize().into();
    DocumentHash::from_bytes(digest)
}
