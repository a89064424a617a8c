//! # Append-Only Event Model
//!
//! The three event kinds the ledger emits for a credential document:
//! issuance, verification, revocation. Events are keyed by
//! [`DocumentHash`] and ordered by [`SequenceOrdinal`] — the stable
//! emission-order index assigned by the ledger. Concurrent events may
//! share a wall-clock timestamp but never share an ordinal, so all
//! "most recent first" ordering in the engine is by ordinal, never by
//! date.
//!
//! Verification events carry no issuer field. Relating a verification to
//! an issuer is only possible through the document hash, which is why the
//! engine joins verified hashes against an issued-hash set instead of
//! indexing verifications by issuer.

use serde::{Deserialize, Serialize};

use credo_core::{AccountAddress, DocumentHash, Timestamp, TxRef};

/// The stable emission-order index of an event on the ledger.
///
/// Total order, unique per event. Survives re-queries of an unchanged
/// ledger unchanged.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct SequenceOrdinal(
    /// The raw emission-order value.
    pub u64,
);

impl std::fmt::Display for SequenceOrdinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document issuance event.
///
/// The creation record for a document hash. One issuance per hash is
/// assumed; if a misbehaving writer emits duplicates, the lowest ordinal
/// is authoritative and the index ignores the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedEvent {
    /// The document's identity key.
    pub document_hash: DocumentHash,
    /// The issuing institution's ledger account.
    pub issuer: AccountAddress,
    /// Recipient display name as recorded at issuance.
    pub recipient_name: String,
    /// Document type label (e.g., "degree", "certificate").
    pub document_type: String,
    /// Document title.
    pub title: String,
    /// Issuance date recorded by the institution.
    pub issuance_date: Timestamp,
    /// The transaction that emitted this event.
    pub tx_ref: TxRef,
    /// The ledger block that included the transaction.
    pub block_number: u64,
    /// Stable emission-order index.
    pub ordinal: SequenceOrdinal,
}

/// A document verification event.
///
/// Emitted when any party verifies a document against the ledger. Carries
/// the verifier's account but no issuer — scoping a verification to an
/// issuer requires joining on the document hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedEvent {
    /// The document's identity key.
    pub document_hash: DocumentHash,
    /// The account that performed the verification.
    pub verifier: AccountAddress,
    /// When the verification was recorded.
    pub verification_date: Timestamp,
    /// The transaction that emitted this event.
    pub tx_ref: TxRef,
    /// The ledger block that included the transaction.
    pub block_number: u64,
    /// Stable emission-order index.
    pub ordinal: SequenceOrdinal,
}

/// A document revocation event.
///
/// Revocation is terminal: once revoked, a document's status is Revoked
/// regardless of verification or expiration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokedEvent {
    /// The document's identity key.
    pub document_hash: DocumentHash,
    /// The issuing institution's ledger account.
    pub issuer: AccountAddress,
    /// When the revocation was recorded.
    pub revocation_date: Timestamp,
    /// The transaction that emitted this event.
    pub tx_ref: TxRef,
    /// The ledger block that included the transaction.
    pub block_number: u64,
    /// Stable emission-order index.
    pub ordinal: SequenceOrdinal,
}

/// Any ledger event, for callers that consume the merged stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LedgerEvent {
    /// An issuance event.
    Issued(IssuedEvent),
    /// A verification event.
    Verified(VerifiedEvent),
    /// A revocation event.
    Revoked(RevokedEvent),
}

impl LedgerEvent {
    /// The document hash this event is keyed by.
    pub fn document_hash(&self) -> &DocumentHash {
        match self {
            Self::Issued(e) => &e.document_hash,
            Self::Verified(e) => &e.document_hash,
            Self::Revoked(e) => &e.document_hash,
        }
    }

    /// The event's emission-order index.
    pub fn ordinal(&self) -> SequenceOrdinal {
        match self {
            Self::Issued(e) => e.ordinal,
            Self::Verified(e) => e.ordinal,
            Self::Revoked(e) => e.ordinal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(n: u8) -> DocumentHash {
        DocumentHash::from_bytes([n; 32])
    }

    fn address() -> AccountAddress {
        AccountAddress::new(format!("0x{}", "11".repeat(20))).unwrap()
    }

    fn tx() -> TxRef {
        TxRef::new(format!("0x{}", "22".repeat(32))).unwrap()
    }

    fn issued(n: u8, ordinal: u64) -> IssuedEvent {
        IssuedEvent {
            document_hash: hash(n),
            issuer: address(),
            recipient_name: "Amina Khan".to_string(),
            document_type: "degree".to_string(),
            title: "BSc Computer Science".to_string(),
            issuance_date: Timestamp::from_unix_seconds(1_700_000_000).unwrap(),
            tx_ref: tx(),
            block_number: 41,
            ordinal: SequenceOrdinal(ordinal),
        }
    }

    #[test]
    fn ordinals_order_events() {
        assert!(SequenceOrdinal(1) < SequenceOrdinal(2));
        assert!(SequenceOrdinal(2) > SequenceOrdinal(1));
    }

    #[test]
    fn ledger_event_exposes_hash_and_ordinal() {
        let e = LedgerEvent::Issued(issued(1, 7));
        assert_eq!(e.document_hash(), &hash(1));
        assert_eq!(e.ordinal(), SequenceOrdinal(7));
    }

    #[test]
    fn issued_event_serializes_camel_case() {
        let json = serde_json::to_value(issued(1, 7)).unwrap();
        assert!(json.get("documentHash").is_some());
        assert!(json.get("recipientName").is_some());
        assert!(json.get("blockNumber").is_some());
        assert!(json.get("document_hash").is_none());
    }

    #[test]
    fn ledger_event_round_trips_with_kind_tag() {
        let e = LedgerEvent::Issued(issued(3, 9));
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json.get("kind").and_then(|v| v.as_str()), Some("issued"));
        let back: LedgerEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, e);
    }
}
