//! # In-Memory Ledger
//!
//! A [`LedgerReader`] backed by process memory, for tests and local
//! development. Events receive ordinals and block numbers in append
//! order, mirroring the emission-order guarantees of a real ledger.
//!
//! Failure injection: [`set_offline`](InMemoryLedger::set_offline) makes
//! every query fail (the engine's degrade paths), and
//! [`poison_record`](InMemoryLedger::poison_record) fails the record
//! fetch for a single hash (the skip-and-continue path) while leaving
//! event queries healthy.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;

use credo_core::{AccountAddress, DocumentHash, Timestamp, TxRef};

use crate::event::{IssuedEvent, RevokedEvent, SequenceOrdinal, VerifiedEvent};
use crate::reader::{LedgerError, LedgerReader};
use crate::record::DocumentRecord;

#[derive(Debug, Default)]
struct MemoryState {
    issued: Vec<IssuedEvent>,
    verified: Vec<VerifiedEvent>,
    revoked: Vec<RevokedEvent>,
    records: HashMap<DocumentHash, DocumentRecord>,
    poisoned: HashSet<DocumentHash>,
    offline: bool,
    next_ordinal: u64,
    next_block: u64,
}

impl MemoryState {
    fn next_position(&mut self) -> (SequenceOrdinal, u64, TxRef) {
        let ordinal = SequenceOrdinal(self.next_ordinal);
        let block = self.next_block;
        self.next_ordinal += 1;
        self.next_block += 1;
        let tx = TxRef::new(format!("0x{:064x}", ordinal.0))
            .expect("formatted ordinal is always 64 hex digits");
        (ordinal, block, tx)
    }

    fn check_online(&self, endpoint: &str) -> Result<(), LedgerError> {
        if self.offline {
            return Err(LedgerError::Unavailable {
                endpoint: endpoint.to_string(),
                detail: "in-memory ledger is offline".to_string(),
            });
        }
        Ok(())
    }
}

/// An in-memory [`LedgerReader`] with failure injection.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: RwLock<MemoryState>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issuance: stores the per-hash record and appends the
    /// derived issuance event. Returns the event as emitted.
    pub fn issue(&self, record: DocumentRecord) -> IssuedEvent {
        let mut state = self.inner.write();
        let (ordinal, block_number, tx_ref) = state.next_position();
        let event = IssuedEvent {
            document_hash: record.document_hash.clone(),
            issuer: record.issuer.clone(),
            recipient_name: record.recipient_name.clone().unwrap_or_default(),
            document_type: record.document_type.clone().unwrap_or_default(),
            title: record.title.clone().unwrap_or_default(),
            issuance_date: record.issuance_date,
            tx_ref,
            block_number,
            ordinal,
        };
        state.records.insert(record.document_hash.clone(), record);
        state.issued.push(event.clone());
        event
    }

    /// Append a verification event for a hash.
    pub fn verify(&self, hash: &DocumentHash, verifier: &AccountAddress) -> VerifiedEvent {
        let mut state = self.inner.write();
        let (ordinal, block_number, tx_ref) = state.next_position();
        let event = VerifiedEvent {
            document_hash: hash.clone(),
            verifier: verifier.clone(),
            verification_date: Timestamp::now(),
            tx_ref,
            block_number,
            ordinal,
        };
        state.verified.push(event.clone());
        event
    }

    /// Append a revocation event for a hash.
    pub fn revoke(&self, hash: &DocumentHash, issuer: &AccountAddress) -> RevokedEvent {
        let mut state = self.inner.write();
        let (ordinal, block_number, tx_ref) = state.next_position();
        let event = RevokedEvent {
            document_hash: hash.clone(),
            issuer: issuer.clone(),
            revocation_date: Timestamp::now(),
            tx_ref,
            block_number,
            ordinal,
        };
        state.revoked.push(event.clone());
        event
    }

    /// Make every subsequent query fail with [`LedgerError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.inner.write().offline = offline;
    }

    /// Make record fetches for `hash` fail while event queries stay healthy.
    pub fn poison_record(&self, hash: &DocumentHash) {
        self.inner.write().poisoned.insert(hash.clone());
    }
}

#[async_trait]
impl LedgerReader for InMemoryLedger {
    async fn query_issued_events(
        &self,
        issuer: Option<&AccountAddress>,
    ) -> Result<Vec<IssuedEvent>, LedgerError> {
        let state = self.inner.read();
        state.check_online("events/issued")?;
        Ok(state
            .issued
            .iter()
            .filter(|e| issuer.map_or(true, |i| &e.issuer == i))
            .cloned()
            .collect())
    }

    async fn query_verified_events(&self) -> Result<Vec<VerifiedEvent>, LedgerError> {
        let state = self.inner.read();
        state.check_online("events/verified")?;
        Ok(state.verified.clone())
    }

    async fn query_revoked_events(
        &self,
        issuer: Option<&AccountAddress>,
    ) -> Result<Vec<RevokedEvent>, LedgerError> {
        let state = self.inner.read();
        state.check_online("events/revoked")?;
        Ok(state
            .revoked
            .iter()
            .filter(|e| issuer.map_or(true, |i| &e.issuer == i))
            .cloned()
            .collect())
    }

    async fn fetch_record(
        &self,
        hash: &DocumentHash,
    ) -> Result<Option<DocumentRecord>, LedgerError> {
        let state = self.inner.read();
        let endpoint = format!("records/{hash}");
        state.check_online(&endpoint)?;
        if state.poisoned.contains(hash) {
            return Err(LedgerError::Unavailable {
                endpoint,
                detail: "record fetch poisoned for test".to_string(),
            });
        }
        Ok(state.records.get(hash).cloned())
    }

    async fn fetch_revoked_flag(&self, hash: &DocumentHash) -> Result<bool, LedgerError> {
        let state = self.inner.read();
        state.check_online("records/revoked")?;
        Ok(state.revoked.iter().any(|e| &e.document_hash == hash))
    }

    async fn watermark(&self) -> Result<u64, LedgerError> {
        let state = self.inner.read();
        state.check_online("watermark")?;
        Ok(state.next_ordinal)
    }
}
