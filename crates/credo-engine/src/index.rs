//! # Event Index
//!
//! Single-pass index over the three event kinds, queried by scope. Built
//! once per ledger snapshot and shared immutably by every consumer.
//!
//! ## The verification join
//!
//! Verification events carry no issuer field, so "documents of issuer X
//! that were verified" cannot be answered from verification events alone.
//! [`EventIndex::verified_within`] is the single factored join: the
//! caller supplies the issued-hash set that defines the scope, and the
//! index intersects it with the set of hashes that have at least one
//! verification event. A verification for a hash outside the supplied
//! scope never counts.
//!
//! Build is O(events); `verified_within` is O(|scope|) thanks to the
//! hash-keyed verification map.

use std::collections::{HashMap, HashSet};

use credo_core::{AccountAddress, DocumentHash};
use credo_ledger::{IssuedEvent, LedgerEvent, RevokedEvent, VerifiedEvent};

/// Immutable per-scope index over a ledger event set.
#[derive(Debug, Default, Clone)]
pub struct EventIndex {
    /// Authoritative issuance per hash. On duplicate issuance events the
    /// lowest ordinal wins; later duplicates are ignored.
    issued_by_hash: HashMap<DocumentHash, IssuedEvent>,
    /// Hashes issued per issuer, derived from the authoritative issuances.
    issued_by_issuer: HashMap<AccountAddress, HashSet<DocumentHash>>,
    /// All verification events per hash, in emission order.
    verifications: HashMap<DocumentHash, Vec<VerifiedEvent>>,
    /// Revoked hashes per issuer.
    revoked_by_issuer: HashMap<AccountAddress, HashSet<DocumentHash>>,
    /// All revoked hashes, regardless of issuer.
    revoked_all: HashSet<DocumentHash>,
}

impl EventIndex {
    /// Build an index from a merged event stream.
    pub fn from_events(events: impl IntoIterator<Item = LedgerEvent>) -> Self {
        let mut issued = Vec::new();
        let mut verified = Vec::new();
        let mut revoked = Vec::new();
        for event in events {
            match event {
                LedgerEvent::Issued(e) => issued.push(e),
                LedgerEvent::Verified(e) => verified.push(e),
                LedgerEvent::Revoked(e) => revoked.push(e),
            }
        }
        Self::from_parts(issued, verified, revoked)
    }

    /// Build an index from per-kind event streams, as the ledger queries
    /// return them.
    pub fn from_parts(
        issued: Vec<IssuedEvent>,
        verified: Vec<VerifiedEvent>,
        revoked: Vec<RevokedEvent>,
    ) -> Self {
        let mut issued_by_hash: HashMap<DocumentHash, IssuedEvent> = HashMap::new();
        for event in issued {
            match issued_by_hash.entry(event.document_hash.clone()) {
                std::collections::hash_map::Entry::Vacant(slot) => {
                    slot.insert(event);
                }
                std::collections::hash_map::Entry::Occupied(mut slot) => {
                    // Lowest ordinal is authoritative for a duplicated hash.
                    if event.ordinal < slot.get().ordinal {
                        slot.insert(event);
                    }
                }
            }
        }

        let mut issued_by_issuer: HashMap<AccountAddress, HashSet<DocumentHash>> = HashMap::new();
        for event in issued_by_hash.values() {
            issued_by_issuer
                .entry(event.issuer.clone())
                .or_default()
                .insert(event.document_hash.clone());
        }

        let mut verifications: HashMap<DocumentHash, Vec<VerifiedEvent>> = HashMap::new();
        for event in verified {
            verifications
                .entry(event.document_hash.clone())
                .or_default()
                .push(event);
        }
        for events in verifications.values_mut() {
            events.sort_by_key(|e| e.ordinal);
        }

        let mut revoked_by_issuer: HashMap<AccountAddress, HashSet<DocumentHash>> = HashMap::new();
        let mut revoked_all = HashSet::new();
        for event in revoked {
            revoked_by_issuer
                .entry(event.issuer.clone())
                .or_default()
                .insert(event.document_hash.clone());
            revoked_all.insert(event.document_hash);
        }

        Self {
            issued_by_hash,
            issued_by_issuer,
            verifications,
            revoked_by_issuer,
            revoked_all,
        }
    }

    /// All authoritative issuance events for one issuer.
    pub fn issued_by_issuer(&self, issuer: &AccountAddress) -> Vec<&IssuedEvent> {
        self.issued_by_issuer
            .get(issuer)
            .map(|hashes| {
                hashes
                    .iter()
                    .filter_map(|h| self.issued_by_hash.get(h))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All authoritative issuance events, every issuer.
    pub fn all_issued(&self) -> Vec<&IssuedEvent> {
        self.issued_by_hash.values().collect()
    }

    /// The issued-hash set for a scope: one issuer, or global.
    pub fn issued_hashes(&self, scope: Option<&AccountAddress>) -> HashSet<DocumentHash> {
        match scope {
            Some(issuer) => self
                .issued_by_issuer
                .get(issuer)
                .cloned()
                .unwrap_or_default(),
            None => self.issued_by_hash.keys().cloned().collect(),
        }
    }

    /// The authoritative issuance event for one hash.
    pub fn issuance_for(&self, hash: &DocumentHash) -> Option<&IssuedEvent> {
        self.issued_by_hash.get(hash)
    }

    /// Hashes within `scope` that have at least one verification event.
    ///
    /// The supplied set defines the scope; a verification event for a
    /// hash not in `scope` does not count. This is the only place
    /// verification events are related to issuers.
    pub fn verified_within(&self, scope: &HashSet<DocumentHash>) -> HashSet<DocumentHash> {
        scope
            .iter()
            .filter(|h| self.verifications.contains_key(*h))
            .cloned()
            .collect()
    }

    /// All verification events for one hash, in emission order.
    pub fn verifications_for(&self, hash: &DocumentHash) -> &[VerifiedEvent] {
        self.verifications
            .get(hash)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The most recent verification event for one hash, by ordinal.
    pub fn latest_verification(&self, hash: &DocumentHash) -> Option<&VerifiedEvent> {
        self.verifications_for(hash).last()
    }

    /// Hashes revoked by one issuer.
    pub fn revoked_by_issuer(&self, issuer: &AccountAddress) -> HashSet<DocumentHash> {
        self.revoked_by_issuer
            .get(issuer)
            .cloned()
            .unwrap_or_default()
    }

    /// All revoked hashes, regardless of issuer.
    pub fn revoked_any(&self) -> &HashSet<DocumentHash> {
        &self.revoked_all
    }

    /// Whether any verification event exists for this hash.
    pub fn is_verified(&self, hash: &DocumentHash) -> bool {
        self.verifications.contains_key(hash)
    }

    /// Whether any revocation event exists for this hash.
    pub fn is_revoked(&self, hash: &DocumentHash) -> bool {
        self.revoked_all.contains(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credo_core::{Timestamp, TxRef};
    use credo_ledger::SequenceOrdinal;

    fn hash(n: u8) -> DocumentHash {
        DocumentHash::from_bytes([n; 32])
    }

    fn address(n: u8) -> AccountAddress {
        AccountAddress::new(format!("0x{}", format!("{n:02x}").repeat(20))).unwrap()
    }

    fn tx(ordinal: u64) -> TxRef {
        TxRef::new(format!("0x{ordinal:064x}")).unwrap()
    }

    fn issued(n: u8, issuer: &AccountAddress, ordinal: u64) -> IssuedEvent {
        IssuedEvent {
            document_hash: hash(n),
            issuer: issuer.clone(),
            recipient_name: "Recipient".to_string(),
            document_type: "degree".to_string(),
            title: "Title".to_string(),
            issuance_date: Timestamp::from_unix_seconds(1_700_000_000).unwrap(),
            tx_ref: tx(ordinal),
            block_number: ordinal,
            ordinal: SequenceOrdinal(ordinal),
        }
    }

    fn verified(n: u8, verifier: &AccountAddress, ordinal: u64) -> VerifiedEvent {
        VerifiedEvent {
            document_hash: hash(n),
            verifier: verifier.clone(),
            verification_date: Timestamp::from_unix_seconds(1_700_100_000).unwrap(),
            tx_ref: tx(ordinal),
            block_number: ordinal,
            ordinal: SequenceOrdinal(ordinal),
        }
    }

    fn revoked(n: u8, issuer: &AccountAddress, ordinal: u64) -> RevokedEvent {
        RevokedEvent {
            document_hash: hash(n),
            issuer: issuer.clone(),
            revocation_date: Timestamp::from_unix_seconds(1_700_200_000).unwrap(),
            tx_ref: tx(ordinal),
            block_number: ordinal,
            ordinal: SequenceOrdinal(ordinal),
        }
    }

    #[test]
    fn issued_events_group_by_issuer() {
        let a = address(0x11);
        let b = address(0x22);
        let index = EventIndex::from_parts(
            vec![issued(1, &a, 0), issued(2, &a, 1), issued(3, &b, 2)],
            vec![],
            vec![],
        );

        assert_eq!(index.issued_by_issuer(&a).len(), 2);
        assert_eq!(index.issued_by_issuer(&b).len(), 1);
        assert_eq!(index.all_issued().len(), 3);
        assert_eq!(index.issued_hashes(Some(&a)).len(), 2);
        assert_eq!(index.issued_hashes(None).len(), 3);
    }

    #[test]
    fn unknown_issuer_has_empty_scope() {
        let a = address(0x11);
        let index = EventIndex::from_parts(vec![issued(1, &a, 0)], vec![], vec![]);
        assert!(index.issued_by_issuer(&address(0x99)).is_empty());
        assert!(index.issued_hashes(Some(&address(0x99))).is_empty());
    }

    #[test]
    fn verified_within_ignores_out_of_scope_hashes() {
        let a = address(0x11);
        let b = address(0x22);
        let verifier = address(0x33);
        // Issuer a issued h1; issuer b issued h2. Both hashes verified.
        let index = EventIndex::from_parts(
            vec![issued(1, &a, 0), issued(2, &b, 1)],
            vec![verified(1, &verifier, 2), verified(2, &verifier, 3)],
            vec![],
        );

        let scope_a = index.issued_hashes(Some(&a));
        let within = index.verified_within(&scope_a);
        assert_eq!(within.len(), 1);
        assert!(within.contains(&hash(1)));
        assert!(!within.contains(&hash(2)));
    }

    #[test]
    fn verification_for_unknown_hash_never_counts_in_scope() {
        let a = address(0x11);
        let verifier = address(0x33);
        // h9 was never issued; its verification must not leak into any scope.
        let index = EventIndex::from_parts(
            vec![issued(1, &a, 0)],
            vec![verified(9, &verifier, 1)],
            vec![],
        );

        let scope = index.issued_hashes(Some(&a));
        assert!(index.verified_within(&scope).is_empty());
        // The raw event is still reachable by hash for diagnostics.
        assert!(index.is_verified(&hash(9)));
    }

    #[test]
    fn duplicate_issuance_lowest_ordinal_wins() {
        let a = address(0x11);
        let b = address(0x22);
        // Same hash issued twice, later event from a different issuer.
        let index = EventIndex::from_parts(
            vec![issued(1, &b, 5), issued(1, &a, 2)],
            vec![],
            vec![],
        );

        let authoritative = index.issuance_for(&hash(1)).unwrap();
        assert_eq!(authoritative.ordinal, SequenceOrdinal(2));
        assert_eq!(authoritative.issuer, a);
        // Issuer scopes reflect only the authoritative issuance.
        assert_eq!(index.issued_by_issuer(&a).len(), 1);
        assert!(index.issued_by_issuer(&b).is_empty());
    }

    #[test]
    fn verifications_kept_in_emission_order() {
        let a = address(0x11);
        let v1 = address(0x31);
        let v2 = address(0x32);
        let index = EventIndex::from_parts(
            vec![issued(1, &a, 0)],
            vec![verified(1, &v2, 7), verified(1, &v1, 3)],
            vec![],
        );

        let events = index.verifications_for(&hash(1));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].ordinal, SequenceOrdinal(3));
        assert_eq!(events[1].ordinal, SequenceOrdinal(7));
        assert_eq!(index.latest_verification(&hash(1)).unwrap().verifier, v2);
    }

    #[test]
    fn revocations_index_by_issuer_and_globally() {
        let a = address(0x11);
        let b = address(0x22);
        let index = EventIndex::from_parts(
            vec![issued(1, &a, 0), issued(2, &b, 1)],
            vec![],
            vec![revoked(1, &a, 2)],
        );

        assert!(index.revoked_by_issuer(&a).contains(&hash(1)));
        assert!(index.revoked_by_issuer(&b).is_empty());
        assert!(index.revoked_any().contains(&hash(1)));
        assert!(index.is_revoked(&hash(1)));
        assert!(!index.is_revoked(&hash(2)));
    }

    #[test]
    fn from_events_merged_stream_matches_from_parts() {
        let a = address(0x11);
        let verifier = address(0x33);
        let merged = EventIndex::from_events(vec![
            LedgerEvent::Issued(issued(1, &a, 0)),
            LedgerEvent::Verified(verified(1, &verifier, 1)),
            LedgerEvent::Revoked(revoked(1, &a, 2)),
        ]);

        let scope = merged.issued_hashes(Some(&a));
        assert_eq!(merged.verified_within(&scope).len(), 1);
        assert!(merged.is_revoked(&hash(1)));
    }

    #[test]
    fn empty_index_answers_every_query() {
        let index = EventIndex::default();
        let a = address(0x11);
        assert!(index.all_issued().is_empty());
        assert!(index.issued_by_issuer(&a).is_empty());
        assert!(index.verified_within(&HashSet::new()).is_empty());
        assert!(index.revoked_any().is_empty());
        assert!(index.latest_verification(&hash(1)).is_none());
    }
}
