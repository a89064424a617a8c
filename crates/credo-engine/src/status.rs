//! # Status Resolution
//!
//! The pure function at the center of reconciliation: given the immutable
//! record, the revoked and verified flags derived from events, and an
//! injected `now`, produce the document's current status.
//!
//! Precedence, first match wins:
//!
//! 1. revoked — terminal, overrides everything including prior verification
//! 2. expired — an expiration date at or before `now`, even if verified
//! 3. verified
//! 4. pending
//!
//! `now` is a parameter, never read from the wall clock here, so callers
//! and tests control time explicitly.

use serde::{Deserialize, Serialize};

use credo_core::Timestamp;
use credo_ledger::DocumentRecord;

/// The derived status of a credential document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Issued, not verified, not revoked, not expired.
    Pending,
    /// At least one verification event exists.
    Verified,
    /// A revocation event exists. Terminal.
    Revoked,
    /// The record's expiration date has passed.
    Expired,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Revoked => "revoked",
            Self::Expired => "expired",
        };
        write!(f, "{s}")
    }
}

/// Resolve the current status of a document.
pub fn resolve_status(
    record: &DocumentRecord,
    is_revoked: bool,
    is_verified: bool,
    now: Timestamp,
) -> DocumentStatus {
    if is_revoked {
        return DocumentStatus::Revoked;
    }
    if let Some(expiration) = record.expiration_date {
        if expiration <= now {
            return DocumentStatus::Expired;
        }
    }
    if is_verified {
        return DocumentStatus::Verified;
    }
    DocumentStatus::Pending
}
