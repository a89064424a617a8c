//! # The LedgerReader Boundary
//!
//! The single seam between the reconciliation engine and the external
//! ledger. Everything the engine knows about the outside world arrives
//! through this trait; constructing the engine with an injected reader is
//! what keeps reconciliation testable against an in-memory ledger and
//! deployable against a gateway.

use async_trait::async_trait;
use thiserror::Error;

use credo_core::{AccountAddress, DocumentHash};

use crate::event::{IssuedEvent, RevokedEvent, VerifiedEvent};
use crate::record::DocumentRecord;

/// Errors surfaced by a [`LedgerReader`] implementation.
///
/// Each variant is tagged with the endpoint (or logical operation) that
/// failed so operators can tell a dead indexer from a malformed response
/// without reproducing the call.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The ledger (or its indexer) could not be reached at all.
    #[error("ledger unavailable at {endpoint}: {detail}")]
    Unavailable {
        /// The endpoint or logical operation that failed.
        endpoint: String,
        /// Transport-level detail.
        detail: String,
    },

    /// Transport-level HTTP failure (connect, timeout, TLS).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// The endpoint that failed.
        endpoint: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The ledger answered with a non-success status.
    #[error("ledger API error at {endpoint}: status {status}: {body}")]
    Api {
        /// The endpoint that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response arrived but did not match the expected schema.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// The endpoint whose response was malformed.
        endpoint: String,
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },
}

/// Read-only access to the external credential ledger.
///
/// Implementations must be safe to share across tasks (`Send + Sync`) and
/// must not cache across calls in ways that violate the watermark
/// contract: two calls at the same [`watermark`](Self::watermark) must
/// observe the same event set.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Query issuance events, optionally scoped to one issuer.
    async fn query_issued_events(
        &self,
        issuer: Option<&AccountAddress>,
    ) -> Result<Vec<IssuedEvent>, LedgerError>;

    /// Query all verification events.
    ///
    /// Verification events carry no issuer; scoping them to an issuer is
    /// the engine's join, not a ledger query.
    async fn query_verified_events(&self) -> Result<Vec<VerifiedEvent>, LedgerError>;

    /// Query revocation events, optionally scoped to one issuer.
    async fn query_revoked_events(
        &self,
        issuer: Option<&AccountAddress>,
    ) -> Result<Vec<RevokedEvent>, LedgerError>;

    /// Fetch the immutable per-hash record, `None` if the ledger holds no
    /// record for this hash.
    async fn fetch_record(
        &self,
        hash: &DocumentHash,
    ) -> Result<Option<DocumentRecord>, LedgerError>;

    /// Fetch the ledger-side revocation flag for one hash.
    async fn fetch_revoked_flag(&self, hash: &DocumentHash) -> Result<bool, LedgerError>;

    /// The highest ledger position this reader has incorporated.
    ///
    /// The engine serves a cached snapshot only while its watermark equals
    /// the reader's current watermark.
    async fn watermark(&self) -> Result<u64, LedgerError>;
}
