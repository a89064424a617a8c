//! # Paginated Document Listings
//!
//! Joins the event index with per-hash record fetches and status
//! resolution to produce ordered, paginated views.
//!
//! Ordering is by sequence ordinal descending — ledger-emission order,
//! not issuance date, because concurrent issuances may share a timestamp
//! but never share an ordinal. The page window is sliced before any
//! record fetch, so pagination cost is bounded by the page size, not the
//! issuer's history.
//!
//! Per-hash record fetches run in a bounded worker pool with a per-fetch
//! timeout. A failed, timed-out, or missing record skips that one hash
//! into the page's `skipped` list; it never fails the page, and the
//! surviving items keep their positions (no re-sort after filtering).

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use credo_core::{AccountAddress, DocumentHash, PaginationError, Timestamp, TxRef};
use credo_ledger::{DocumentRecord, IssuedEvent, LedgerReader};

use crate::index::EventIndex;
use crate::status::{resolve_status, DocumentStatus};

/// Placeholder rendered for a string field the record does not carry.
///
/// Only fields absent from the record fall back; a present-but-empty
/// field stays empty.
const UNKNOWN_FIELD: &str = "unknown";

/// A derived, never-stored projection of one document's current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    /// The document's identity key.
    pub document_hash: DocumentHash,
    /// The issuing institution's ledger account.
    pub issuer: AccountAddress,
    /// Issuer display name, or `"unknown"`.
    pub issuer_name: String,
    /// Document type label, or `"unknown"`.
    pub document_type: String,
    /// Document title, or `"unknown"`.
    pub title: String,
    /// Recipient display name, or `"unknown"`.
    pub recipient_name: String,
    /// Recipient identifier, or `"unknown"`.
    pub recipient_id: String,
    /// Issuance date from the record.
    pub issuance_date: Timestamp,
    /// Expiration date, if the document expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Timestamp>,
    /// The resolved current status.
    pub status: DocumentStatus,
    /// Ledger-side soft-delete bit, unrelated to revocation.
    pub is_active: bool,
    /// Whether at least one verification event exists in scope.
    pub is_verified: bool,
    /// Whether a revocation event exists in scope.
    pub is_revoked: bool,
    /// The issuance transaction, when the issuance event is indexed.
    pub transaction_hash: Option<TxRef>,
    /// The issuance block, when the issuance event is indexed.
    pub block_number: Option<u64>,
    /// The most recent verifier, if any verification event exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<AccountAddress>,
}

/// One hash skipped while assembling a page, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedDocument {
    /// The hash that was skipped.
    pub document_hash: DocumentHash,
    /// Why it was skipped.
    pub reason: String,
}

/// The result of one listing call: assembled views plus observable skips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPage {
    /// Assembled views, most recently issued first.
    pub items: Vec<DocumentView>,
    /// Hashes in the page window that could not be assembled.
    pub skipped: Vec<SkippedDocument>,
}

impl DocumentPage {
    /// An empty page — also the degraded result for an unreachable ledger.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Validated pagination arguments.
///
/// Negative values are rejected at construction; they indicate an
/// integration mistake and are never silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: usize,
    offset: usize,
}

impl PageRequest {
    /// Validate raw pagination arguments from the caller boundary.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError`] if either value is negative.
    pub fn new(limit: i64, offset: i64) -> Result<Self, PaginationError> {
        if limit < 0 {
            return Err(PaginationError::NegativeLimit(limit));
        }
        if offset < 0 {
            return Err(PaginationError::NegativeOffset(offset));
        }
        Ok(Self {
            limit: limit as usize,
            offset: offset as usize,
        })
    }

    /// The page size. Zero yields an empty page.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The number of documents to skip, in ordinal-descending order.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// List documents for one issuer or globally, most recently emitted first.
///
/// The `now` parameter feeds status resolution and is injected by the
/// caller. Record fetches are parallelized up to `fetch_concurrency`
/// in-flight, each bounded by `fetch_timeout`; a timed-out fetch is
/// treated identically to a failed one.
pub async fn list_documents(
    ledger: Arc<dyn LedgerReader>,
    index: &EventIndex,
    issuer: Option<&AccountAddress>,
    page: PageRequest,
    now: Timestamp,
    fetch_timeout: Duration,
    fetch_concurrency: usize,
) -> DocumentPage {
    let mut issuances: Vec<IssuedEvent> = match issuer {
        Some(scope) => index.issued_by_issuer(scope).into_iter().cloned().collect(),
        None => index.all_issued().into_iter().cloned().collect(),
    };
    // Ordinals are unique, so this order is total and stable across calls.
    issuances.sort_by(|a, b| b.ordinal.cmp(&a.ordinal));

    if page.limit() == 0 || page.offset() >= issuances.len() {
        return DocumentPage::empty();
    }

    let issued_hashes: HashSet<DocumentHash> = issuances
        .iter()
        .map(|e| e.document_hash.clone())
        .collect();
    let verified = index.verified_within(&issued_hashes);
    let revoked_scope = match issuer {
        Some(scope) => index.revoked_by_issuer(scope),
        None => index.revoked_any().clone(),
    };
    // Verified and revoked stay independent flags here; status resolution
    // reconciles them per document.
    let revoked: HashSet<DocumentHash> = revoked_scope
        .intersection(&issued_hashes)
        .cloned()
        .collect();

    let window: Vec<IssuedEvent> = issuances
        .into_iter()
        .skip(page.offset())
        .take(page.limit())
        .collect();

    let slots = fetch_window(ledger, &window, fetch_timeout, fetch_concurrency).await;

    let mut items = Vec::new();
    let mut skipped = Vec::new();
    for (position, event) in window.iter().enumerate() {
        let hash = &event.document_hash;
        let outcome = slots
            .get(position)
            .and_then(|s| s.clone())
            .unwrap_or_else(|| Err("record fetch task failed".to_string()));
        match outcome {
            Ok(Some(record)) => {
                let is_verified = verified.contains(hash);
                let is_revoked = revoked.contains(hash);
                let verified_by = index.latest_verification(hash).map(|e| e.verifier.clone());
                items.push(assemble_view(
                    &record,
                    Some(event),
                    is_verified,
                    is_revoked,
                    verified_by,
                    now,
                ));
            }
            Ok(None) => {
                tracing::debug!(document_hash = %hash, "no record on ledger; skipping");
                skipped.push(SkippedDocument {
                    document_hash: hash.clone(),
                    reason: "no record on ledger".to_string(),
                });
            }
            Err(reason) => {
                tracing::debug!(document_hash = %hash, %reason, "skipping document in page");
                skipped.push(SkippedDocument {
                    document_hash: hash.clone(),
                    reason,
                });
            }
        }
    }

    DocumentPage { items, skipped }
}

/// Fetch the window's records with bounded concurrency, preserving the
/// window's positions in the returned slots.
async fn fetch_window(
    ledger: Arc<dyn LedgerReader>,
    window: &[IssuedEvent],
    fetch_timeout: Duration,
    fetch_concurrency: usize,
) -> Vec<Option<Result<Option<DocumentRecord>, String>>> {
    let concurrency = fetch_concurrency.max(1);
    let mut slots: Vec<Option<Result<Option<DocumentRecord>, String>>> =
        vec![None; window.len()];
    let mut join_set = tokio::task::JoinSet::new();
    let mut next = 0;

    while next < window.len() || !join_set.is_empty() {
        while next < window.len() && join_set.len() < concurrency {
            let ledger = Arc::clone(&ledger);
            let hash = window[next].document_hash.clone();
            let position = next;
            join_set.spawn(async move {
                let outcome =
                    match tokio::time::timeout(fetch_timeout, ledger.fetch_record(&hash)).await {
                        Ok(Ok(record)) => Ok(record),
                        Ok(Err(err)) => Err(format!("record fetch failed: {err}")),
                        Err(_) => Err(format!(
                            "record fetch timed out after {}ms",
                            fetch_timeout.as_millis()
                        )),
                    };
                (position, outcome)
            });
            next += 1;
        }
        if let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((position, outcome)) => slots[position] = Some(outcome),
                // The slot stays None and is reported as a skip.
                Err(err) => tracing::error!(error = %err, "record fetch task panicked"),
            }
        }
    }

    slots
}

/// Assemble a view from a fetched record and its event-derived flags.
pub(crate) fn assemble_view(
    record: &DocumentRecord,
    issuance: Option<&IssuedEvent>,
    is_verified: bool,
    is_revoked: bool,
    verified_by: Option<AccountAddress>,
    now: Timestamp,
) -> DocumentView {
    let status = resolve_status(record, is_revoked, is_verified, now);
    DocumentView {
        document_hash: record.document_hash.clone(),
        issuer: record.issuer.clone(),
        issuer_name: field_or_unknown(&record.issuer_name),
        document_type: field_or_unknown(&record.document_type),
        title: field_or_unknown(&record.title),
        recipient_name: field_or_unknown(&record.recipient_name),
        recipient_id: field_or_unknown(&record.recipient_id),
        issuance_date: record.issuance_date,
        expiration_date: record.expiration_date,
        status,
        is_active: record.is_active,
        is_verified,
        is_revoked,
        transaction_hash: issuance.map(|e| e.tx_ref.clone()),
        block_number: issuance.map(|e| e.block_number),
        verified_by,
    }
}

fn field_or_unknown(field: &Option<String>) -> String {
    field
        .clone()
        .unwrap_or_else(|| UNKNOWN_FIELD.to_string())
}
