//! # Watermark-Gated Snapshots
//!
//! A [`LedgerSnapshot`] is the immutable unit of reconciliation: the
//! event index plus the ledger watermark it was built at. Consumers only
//! ever see a snapshot, never the live ledger, so every derived answer is
//! computed against one consistent event set.
//!
//! [`SnapshotCache`] avoids re-scanning the full event log on every call:
//! a cached snapshot is served while its watermark equals the ledger's
//! current watermark and rebuilt otherwise. The watermark is read before
//! the event queries, so an append racing the rebuild lands the snapshot
//! on the older watermark and forces a rebuild on the next call — the
//! cache can be conservative, never stale.

use std::sync::Arc;

use parking_lot::RwLock;

use credo_ledger::LedgerReader;

use crate::error::EngineError;
use crate::index::EventIndex;

/// An immutable view of the ledger's event set at one watermark.
#[derive(Debug)]
pub struct LedgerSnapshot {
    /// The ledger position this snapshot incorporates.
    pub watermark: u64,
    /// The index over the snapshot's events.
    pub index: EventIndex,
}

impl LedgerSnapshot {
    /// Build a snapshot from the live ledger.
    ///
    /// The three event queries are independent and fan out concurrently;
    /// all downstream joins use set semantics, so completion order does
    /// not matter.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IndexUnavailable`] if any query fails.
    pub async fn load(reader: &dyn LedgerReader) -> Result<Self, EngineError> {
        let watermark = reader
            .watermark()
            .await
            .map_err(EngineError::index_unavailable)?;
        let (issued, verified, revoked) = tokio::try_join!(
            reader.query_issued_events(None),
            reader.query_verified_events(),
            reader.query_revoked_events(None),
        )
        .map_err(EngineError::index_unavailable)?;

        Ok(Self {
            watermark,
            index: EventIndex::from_parts(issued, verified, revoked),
        })
    }
}

/// A single-slot cache of the latest [`LedgerSnapshot`].
#[derive(Debug, Default)]
pub struct SnapshotCache {
    slot: RwLock<Option<Arc<LedgerSnapshot>>>,
}

impl SnapshotCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the current snapshot, rebuilding if the ledger has moved
    /// past the cached watermark.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IndexUnavailable`] if the ledger cannot be
    /// queried.
    pub async fn current(
        &self,
        reader: &dyn LedgerReader,
    ) -> Result<Arc<LedgerSnapshot>, EngineError> {
        let live = reader
            .watermark()
            .await
            .map_err(EngineError::index_unavailable)?;

        {
            let guard = self.slot.read();
            if let Some(snapshot) = guard.as_ref() {
                if snapshot.watermark == live {
                    return Ok(Arc::clone(snapshot));
                }
            }
        }

        let fresh = Arc::new(LedgerSnapshot::load(reader).await?);
        *self.slot.write() = Some(Arc::clone(&fresh));
        Ok(fresh)
    }

    /// The cached snapshot, if any, without touching the ledger.
    pub fn cached(&self) -> Option<Arc<LedgerSnapshot>> {
        self.slot.read().clone()
    }

    /// Drop the cached snapshot; the next call rebuilds unconditionally.
    pub fn invalidate(&self) {
        *self.slot.write() = None;
    }
}
