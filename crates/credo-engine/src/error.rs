//! # Engine Errors
//!
//! The engine's error surface is deliberately small: an unreachable event
//! source, a failed per-hash record fetch, and invalid pagination
//! arguments. The first two are degrade-gracefully conditions handled by
//! the service facade; only pagination mistakes surface to callers as
//! hard errors.

use thiserror::Error;

use credo_core::{DocumentHash, PaginationError};
use credo_ledger::LedgerError;

/// Errors raised by the reconciliation engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The event source could not be reached; no index can be built.
    #[error("event index unavailable: {source}")]
    IndexUnavailable {
        /// The underlying ledger failure.
        #[source]
        source: LedgerError,
    },

    /// A per-hash record fetch failed.
    #[error("record fetch failed for {hash}: {source}")]
    RecordFetchFailed {
        /// The hash whose record could not be fetched.
        hash: DocumentHash,
        /// The underlying ledger failure.
        #[source]
        source: LedgerError,
    },

    /// Pagination arguments were invalid. Surfaced to the caller.
    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

impl EngineError {
    /// Wrap a ledger failure as an unavailable index.
    pub fn index_unavailable(source: LedgerError) -> Self {
        Self::IndexUnavailable { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_unavailable_display_includes_source() {
        let err = EngineError::index_unavailable(LedgerError::Unavailable {
            endpoint: "events/issued".to_string(),
            detail: "connection refused".to_string(),
        });
        let msg = format!("{err}");
        assert!(msg.contains("event index unavailable"));
        assert!(msg.contains("events/issued"));
    }

    #[test]
    fn record_fetch_failed_display_includes_hash() {
        let hash = DocumentHash::from_bytes([7; 32]);
        let err = EngineError::RecordFetchFailed {
            hash: hash.clone(),
            source: LedgerError::Unavailable {
                endpoint: "records".to_string(),
                detail: "timeout".to_string(),
            },
        };
        assert!(format!("{err}").contains(hash.as_str()));
    }

    #[test]
    fn pagination_error_converts() {
        let err: EngineError = PaginationError::NegativeLimit(-3).into();
        assert!(matches!(err, EngineError::Pagination(_)));
    }
}
