//! # Reconciliation Invariant Properties
//!
//! Property-based verification of the counting rules, status precedence,
//! and pagination tiling, over generated event histories.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use credo_core::{AccountAddress, DocumentHash, Timestamp, TxRef};
use credo_engine::{
    compute_stats, listing, resolve_status, DocumentStatus, EventIndex, PageRequest,
};
use credo_ledger::{
    DocumentRecord, InMemoryLedger, IssuedEvent, LedgerReader, RevokedEvent, SequenceOrdinal,
    VerifiedEvent,
};

fn hash(n: usize) -> DocumentHash {
    let mut bytes = [0u8; 32];
    bytes[0] = (n & 0xff) as u8;
    bytes[1] = ((n >> 8) & 0xff) as u8;
    DocumentHash::from_bytes(bytes)
}

fn issuer() -> AccountAddress {
    AccountAddress::new(format!("0x{}", "11".repeat(20))).unwrap()
}

fn verifier() -> AccountAddress {
    AccountAddress::new(format!("0x{}", "55".repeat(20))).unwrap()
}

fn tx(ordinal: u64) -> TxRef {
    TxRef::new(format!("0x{ordinal:064x}")).unwrap()
}

/// Build an index for one issuer from per-document (verified, revoked) flags.
fn index_from_flags(flags: &[(bool, bool)]) -> EventIndex {
    let issuer = issuer();
    let verifier = verifier();
    let date = Timestamp::from_unix_seconds(1_700_000_000).unwrap();

    let issued: Vec<IssuedEvent> = flags
        .iter()
        .enumerate()
        .map(|(i, _)| IssuedEvent {
            document_hash: hash(i),
            issuer: issuer.clone(),
            recipient_name: "R".to_string(),
            document_type: "degree".to_string(),
            title: "T".to_string(),
            issuance_date: date,
            tx_ref: tx(i as u64),
            block_number: i as u64,
            ordinal: SequenceOrdinal(i as u64),
        })
        .collect();

    let verified: Vec<VerifiedEvent> = flags
        .iter()
        .enumerate()
        .filter(|(_, (v, _))| *v)
        .map(|(i, _)| VerifiedEvent {
            document_hash: hash(i),
            verifier: verifier.clone(),
            verification_date: date,
            tx_ref: tx(1_000 + i as u64),
            block_number: 1_000 + i as u64,
            ordinal: SequenceOrdinal(1_000 + i as u64),
        })
        .collect();

    let revoked: Vec<RevokedEvent> = flags
        .iter()
        .enumerate()
        .filter(|(_, (_, r))| *r)
        .map(|(i, _)| RevokedEvent {
            document_hash: hash(i),
            issuer: issuer.clone(),
            revocation_date: date,
            tx_ref: tx(2_000 + i as u64),
            block_number: 2_000 + i as u64,
            ordinal: SequenceOrdinal(2_000 + i as u64),
        })
        .collect();

    EventIndex::from_parts(issued, verified, revoked)
}

proptest! {
    /// total == pending + verified, revoked always excluded; and the three
    /// buckets partition the issued set.
    #[test]
    fn stats_buckets_partition_the_issued_set(
        flags in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..=16)
    ) {
        let index = index_from_flags(&flags);
        let scope = issuer();
        let stats = compute_stats(&index, &scope);

        prop_assert_eq!(
            stats.total_documents,
            stats.pending_documents + stats.verified_documents
        );
        prop_assert_eq!(
            stats.pending_documents + stats.verified_documents + stats.revoked_documents,
            flags.len() as u64
        );
        prop_assert_eq!(stats.total_verifications, stats.verified_documents);
    }

    /// The pending, verified-minus-revoked, and revoked hash sets are
    /// pairwise disjoint for any issuer.
    #[test]
    fn derived_hash_sets_are_pairwise_disjoint(
        flags in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..=16)
    ) {
        let index = index_from_flags(&flags);
        let scope = issuer();

        let issued = index.issued_hashes(Some(&scope));
        let verified_raw = index.verified_within(&issued);
        let revoked: HashSet<DocumentHash> = index
            .revoked_by_issuer(&scope)
            .intersection(&issued)
            .cloned()
            .collect();
        let verified: HashSet<DocumentHash> =
            verified_raw.difference(&revoked).cloned().collect();
        let pending: HashSet<DocumentHash> = issued
            .iter()
            .filter(|h| !verified_raw.contains(*h) && !revoked.contains(*h))
            .cloned()
            .collect();

        prop_assert!(pending.is_disjoint(&verified));
        prop_assert!(pending.is_disjoint(&revoked));
        prop_assert!(verified.is_disjoint(&revoked));
    }

    /// Recomputation against an unchanged event set is idempotent.
    #[test]
    fn stats_recomputation_is_idempotent(
        flags in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..=16)
    ) {
        let index = index_from_flags(&flags);
        let scope = issuer();
        prop_assert_eq!(compute_stats(&index, &scope), compute_stats(&index, &scope));
    }

    /// Exactly one status holds, and the precedence chain is total:
    /// revoked beats expiration beats verification beats pending.
    #[test]
    fn status_precedence_is_total(
        is_revoked in any::<bool>(),
        is_verified in any::<bool>(),
        expiry_delta in proptest::option::of(-500i64..=500),
    ) {
        let now = Timestamp::from_unix_seconds(10_000).unwrap();
        let record = DocumentRecord {
            document_hash: hash(0),
            issuer: issuer(),
            issuer_name: None,
            document_type: None,
            title: None,
            recipient_name: None,
            recipient_id: None,
            issuance_date: Timestamp::from_unix_seconds(1_000).unwrap(),
            expiration_date: expiry_delta
                .map(|d| Timestamp::from_unix_seconds(10_000 + d).unwrap()),
            metadata_uri: None,
            is_active: true,
        };

        let status = resolve_status(&record, is_revoked, is_verified, now);
        let expired = expiry_delta.map_or(false, |d| d <= 0);

        let expected = if is_revoked {
            DocumentStatus::Revoked
        } else if expired {
            DocumentStatus::Expired
        } else if is_verified {
            DocumentStatus::Verified
        } else {
            DocumentStatus::Pending
        };
        prop_assert_eq!(status, expected);
    }

    /// Tiling a listing with any page size k >= 1 reconstructs the full
    /// reverse-emission-order list with no duplicates and no gaps.
    #[test]
    fn pagination_tiling_is_lossless(n in 1usize..=10, k in 1i64..=12) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("build runtime");
        rt.block_on(async {
            let ledger = Arc::new(InMemoryLedger::new());
            let scope = issuer();
            for i in 0..n {
                ledger.issue(DocumentRecord {
                    document_hash: hash(i),
                    issuer: scope.clone(),
                    issuer_name: None,
                    document_type: None,
                    title: None,
                    recipient_name: None,
                    recipient_id: None,
                    issuance_date: Timestamp::from_unix_seconds(1_700_000_000).unwrap(),
                    expiration_date: None,
                    metadata_uri: None,
                    is_active: true,
                });
            }

            let index = EventIndex::from_parts(
                ledger.query_issued_events(None).await.unwrap(),
                ledger.query_verified_events().await.unwrap(),
                ledger.query_revoked_events(None).await.unwrap(),
            );
            let now = Timestamp::from_unix_seconds(1_800_000_000).unwrap();
            let reader = Arc::clone(&ledger) as Arc<dyn LedgerReader>;

            let full = listing::list_documents(
                Arc::clone(&reader),
                &index,
                Some(&scope),
                PageRequest::new(i64::from(u32::MAX), 0).unwrap(),
                now,
                Duration::from_secs(5),
                4,
            )
            .await;
            assert_eq!(full.items.len(), n);

            let mut tiled = Vec::new();
            let mut offset = 0i64;
            loop {
                let page = listing::list_documents(
                    Arc::clone(&reader),
                    &index,
                    Some(&scope),
                    PageRequest::new(k, offset).unwrap(),
                    now,
                    Duration::from_secs(5),
                    4,
                )
                .await;
                if page.items.is_empty() {
                    break;
                }
                tiled.extend(page.items);
                offset += k;
            }

            assert_eq!(tiled, full.items);
            let distinct: HashSet<DocumentHash> =
                tiled.iter().map(|v| v.document_hash.clone()).collect();
            assert_eq!(distinct.len(), n);
        });
    }
}
