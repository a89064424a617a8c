//! # Ledger Identifier Newtypes
//!
//! Domain-primitive newtypes for the identifiers that flow through the
//! reconciliation engine. Each identifier is a distinct type — you cannot
//! pass an [`AccountAddress`] where a [`DocumentHash`] is expected.
//!
//! ## Validation
//!
//! All three identifiers are 0x-prefixed lowercase hex strings, validated
//! at construction:
//!
//! - [`DocumentHash`]: 64 hex digits (a 32-byte digest, the identity key
//!   joining every event kind)
//! - [`AccountAddress`]: 40 hex digits (a 20-byte ledger account)
//! - [`TxRef`]: 64 hex digits (a ledger transaction reference)
//!
//! Mixed-case input is accepted and normalized to lowercase so that
//! addresses compare equal regardless of checksum casing on the wire.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Check a 0x-prefixed hex string of exactly `digits` hex characters.
fn is_prefixed_hex(s: &str, digits: usize) -> bool {
    let Some(rest) = s.strip_prefix("0x") else {
        return false;
    };
    rest.len() == digits && rest.chars().all(|c| c.is_ascii_hexdigit())
}

/// The unique identity of a credential document on the ledger.
///
/// A 32-byte digest rendered as `0x` + 64 lowercase hex digits. The hash
/// is the join key across issuance, verification, and revocation events;
/// no other identifier relates the three event kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentHash(String);

impl DocumentHash {
    /// Create a document hash from a string, validating format and
    /// normalizing to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDocumentHash`] if the string is
    /// not `0x` followed by exactly 64 hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !is_prefixed_hex(&s, 64) {
            return Err(ValidationError::InvalidDocumentHash(s));
        }
        Ok(Self(s.to_lowercase()))
    }

    /// Create a document hash from a raw 32-byte digest.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        Self(format!("0x{hex}"))
    }

    /// Access the canonical lowercase string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A ledger account address — an issuer, verifier, or recipient wallet.
///
/// A 20-byte account rendered as `0x` + 40 hex digits. Stored lowercase
/// so that scoped queries match regardless of checksum casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Create an account address from a string, validating format and
    /// normalizing to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAccountAddress`] if the string is
    /// not `0x` followed by exactly 40 hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !is_prefixed_hex(&s, 40) {
            return Err(ValidationError::InvalidAccountAddress(s));
        }
        Ok(Self(s.to_lowercase()))
    }

    /// Access the canonical lowercase string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A ledger transaction reference.
///
/// The transaction that emitted an event. Views surface it so a reader
/// can locate the authoritative record in a ledger explorer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxRef(String);

impl TxRef {
    /// Create a transaction reference from a string, validating format
    /// and normalizing to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTxRef`] if the string is not
    /// `0x` followed by exactly 64 hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !is_prefixed_hex(&s, 64) {
            return Err(ValidationError::InvalidTxRef(s));
        }
        Ok(Self(s.to_lowercase()))
    }

    /// Access the canonical lowercase string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
