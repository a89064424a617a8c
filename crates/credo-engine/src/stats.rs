//! # Aggregate Statistics
//!
//! Per-issuer and global document counts, computed with set algebra over
//! the event index. All sets are hash sets keyed by [`DocumentHash`], so
//! the arithmetic is independent of event arrival order.
//!
//! ## Counting rules
//!
//! - A hash in both the verified and revoked sets counts only as revoked.
//! - `total_documents = pending + verified` — revoked documents are
//!   excluded from the total. This is an explicit business rule.
//! - `total_verifications` credits one verification per distinct verified
//!   document, however many verification events it accumulated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use credo_core::{AccountAddress, DocumentHash};

use crate::index::EventIndex;

/// Aggregate counts for an issuer, or globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    /// Pending plus verified documents. Excludes revoked.
    pub total_documents: u64,
    /// Verified documents, excluding any that were later revoked.
    pub verified_documents: u64,
    /// Issued documents with no verification and no revocation.
    pub pending_documents: u64,
    /// Revoked documents.
    pub revoked_documents: u64,
    /// Verification credits: one per distinct verified document.
    pub total_verifications: u64,
}

impl DocumentStats {
    /// The all-zero stats returned when the event source is unreachable.
    ///
    /// Callers must treat an all-zero result as possibly degraded, not as
    /// ground truth of zero activity.
    pub fn zeroed() -> Self {
        Self::default()
    }
}

/// Compute aggregate statistics for one issuer.
pub fn compute_stats(index: &EventIndex, issuer: &AccountAddress) -> DocumentStats {
    let issued = index.issued_hashes(Some(issuer));
    let revoked_scope = index.revoked_by_issuer(issuer);
    stats_over(index, issued, &revoked_scope)
}

/// Compute aggregate statistics across all issuers.
pub fn compute_global_stats(index: &EventIndex) -> DocumentStats {
    let issued = index.issued_hashes(None);
    let revoked_scope = index.revoked_any().clone();
    stats_over(index, issued, &revoked_scope)
}

fn stats_over(
    index: &EventIndex,
    issued: HashSet<DocumentHash>,
    revoked_scope: &HashSet<DocumentHash>,
) -> DocumentStats {
    let verified = index.verified_within(&issued);
    // Revocation events already carry the issuer; the intersection keeps a
    // stray revocation for a never-issued hash out of the counts anyway.
    let revoked: HashSet<&DocumentHash> = revoked_scope.intersection(&issued).collect();

    let pending_documents = issued
        .iter()
        .filter(|h| !verified.contains(*h) && !revoked.contains(*h))
        .count() as u64;
    // A verified-then-revoked document must not inflate the verified count.
    let verified_documents = verified.iter().filter(|h| !revoked.contains(*h)).count() as u64;
    let revoked_documents = revoked.len() as u64;

    DocumentStats {
        // Revoked documents are excluded from the total. Business rule.
        total_documents: pending_documents + verified_documents,
        verified_documents,
        pending_documents,
        revoked_documents,
        total_verifications: verified_documents,
    }
}
