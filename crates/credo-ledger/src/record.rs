//! # Per-Hash Document Records
//!
//! The immutable record the ledger stores for each document hash. Fetched
//! per hash when assembling views; never needed for aggregate statistics,
//! which run entirely off the event stream.
//!
//! Every string field the ledger can omit is an `Option` — "record
//! missing" (the fetch returned nothing) stays distinguishable from
//! "record present but field empty". View assembly decides how absent
//! fields render; this type does not.

use serde::{Deserialize, Serialize};

use credo_core::{AccountAddress, DocumentHash, Timestamp};

/// The immutable per-hash record stored on the ledger.
///
/// Deserialization is lenient for schema evolution: optional fields use
/// `#[serde(default)]` and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// The document's identity key.
    pub document_hash: DocumentHash,
    /// The issuing institution's ledger account.
    pub issuer: AccountAddress,
    /// Issuer display name registered on the ledger.
    #[serde(default)]
    pub issuer_name: Option<String>,
    /// Document type label.
    #[serde(default)]
    pub document_type: Option<String>,
    /// Document title.
    #[serde(default)]
    pub title: Option<String>,
    /// Recipient display name.
    #[serde(default)]
    pub recipient_name: Option<String>,
    /// Recipient identifier (institution-scoped, e.g. a student number).
    #[serde(default)]
    pub recipient_id: Option<String>,
    /// Issuance date recorded by the institution.
    pub issuance_date: Timestamp,
    /// Expiration date, if the document expires.
    #[serde(default)]
    pub expiration_date: Option<Timestamp>,
    /// URI of off-ledger document metadata.
    #[serde(default)]
    pub metadata_uri: Option<String>,
    /// Ledger-side soft-delete bit. Unrelated to revocation; carried
    /// through to views unchanged.
    pub is_active: bool,
}
