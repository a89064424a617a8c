//! # Reconciliation Service Facade
//!
//! The surface the rest of the application consumes. Owns the injected
//! [`LedgerReader`] and the snapshot cache, and applies the degrade
//! policies: an unreachable ledger yields zeroed stats or an empty page
//! (logged, never raised), while pagination mistakes and single-document
//! lookups surface typed errors.
//!
//! All methods are safe to call repeatedly and concurrently; there is no
//! mutable state beyond the snapshot cache slot.

use std::sync::Arc;
use std::time::Duration;

use credo_core::{AccountAddress, DocumentHash, Timestamp};
use credo_ledger::LedgerReader;

use crate::error::EngineError;
use crate::listing::{self, DocumentPage, DocumentView, PageRequest};
use crate::snapshot::{LedgerSnapshot, SnapshotCache};
use crate::stats::{compute_global_stats, compute_stats, DocumentStats};

/// Tuning knobs for per-hash record fetches.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Per-fetch timeout; a timed-out fetch is skipped like a failed one.
    pub fetch_timeout: Duration,
    /// Maximum in-flight record fetches per listing call.
    pub fetch_concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            fetch_concurrency: 8,
        }
    }
}

/// The reconciliation engine.
///
/// Constructed with an explicitly injected ledger reader; holds no
/// global state.
pub struct ReconciliationEngine {
    ledger: Arc<dyn LedgerReader>,
    cache: SnapshotCache,
    config: EngineConfig,
}

impl ReconciliationEngine {
    /// Create an engine with default fetch tuning.
    pub fn new(ledger: Arc<dyn LedgerReader>) -> Self {
        Self::with_config(ledger, EngineConfig::default())
    }

    /// Create an engine with explicit fetch tuning.
    pub fn with_config(ledger: Arc<dyn LedgerReader>, config: EngineConfig) -> Self {
        Self {
            ledger,
            cache: SnapshotCache::new(),
            config,
        }
    }

    /// The current watermark-gated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IndexUnavailable`] if the ledger cannot be
    /// queried.
    pub async fn snapshot(&self) -> Result<Arc<LedgerSnapshot>, EngineError> {
        self.cache.current(self.ledger.as_ref()).await
    }

    /// Aggregate statistics for one issuer.
    ///
    /// Degrades to zeroed stats if the event source is unreachable;
    /// callers must treat an all-zero result as possibly degraded.
    pub async fn stats_for_issuer(&self, issuer: &AccountAddress) -> DocumentStats {
        match self.snapshot().await {
            Ok(snapshot) => compute_stats(&snapshot.index, issuer),
            Err(error) => {
                tracing::warn!(%error, %issuer, "serving zeroed stats: event index unavailable");
                DocumentStats::zeroed()
            }
        }
    }

    /// Aggregate statistics across all issuers.
    ///
    /// Same degrade policy as [`stats_for_issuer`](Self::stats_for_issuer).
    pub async fn global_stats(&self) -> DocumentStats {
        match self.snapshot().await {
            Ok(snapshot) => compute_global_stats(&snapshot.index),
            Err(error) => {
                tracing::warn!(%error, "serving zeroed global stats: event index unavailable");
                DocumentStats::zeroed()
            }
        }
    }

    /// A page of documents for one issuer, or globally.
    ///
    /// Degrades to an empty page if the event source is unreachable.
    /// Per-hash fetch failures inside a healthy page appear in the
    /// page's `skipped` list.
    pub async fn list_documents(
        &self,
        issuer: Option<&AccountAddress>,
        page: PageRequest,
    ) -> DocumentPage {
        let snapshot = match self.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(%error, "serving empty page: event index unavailable");
                return DocumentPage::empty();
            }
        };
        listing::list_documents(
            Arc::clone(&self.ledger),
            &snapshot.index,
            issuer,
            page,
            Timestamp::now(),
            self.config.fetch_timeout,
            self.config.fetch_concurrency,
        )
        .await
    }

    /// The current view of one document, `None` if the ledger holds no
    /// record for the hash.
    ///
    /// This is the single-document verification lookup: record and
    /// revocation flag come from per-hash fetches, verification state
    /// from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RecordFetchFailed`] if either per-hash
    /// fetch fails, or [`EngineError::IndexUnavailable`] if the snapshot
    /// cannot be built.
    pub async fn document_by_hash(
        &self,
        hash: &DocumentHash,
    ) -> Result<Option<DocumentView>, EngineError> {
        let record = self
            .ledger
            .fetch_record(hash)
            .await
            .map_err(|source| EngineError::RecordFetchFailed {
                hash: hash.clone(),
                source,
            })?;
        let Some(record) = record else {
            return Ok(None);
        };

        let is_revoked = self
            .ledger
            .fetch_revoked_flag(hash)
            .await
            .map_err(|source| EngineError::RecordFetchFailed {
                hash: hash.clone(),
                source,
            })?;

        let snapshot = self.snapshot().await?;
        let is_verified = snapshot.index.is_verified(hash);
        let verified_by = snapshot
            .index
            .latest_verification(hash)
            .map(|e| e.verifier.clone());
        let issuance = snapshot.index.issuance_for(hash);

        Ok(Some(listing::assemble_view(
            &record,
            issuance,
            is_verified,
            is_revoked,
            verified_by,
            Timestamp::now(),
        )))
    }
}
