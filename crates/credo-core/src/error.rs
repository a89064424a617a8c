//! # Error Hierarchy
//!
//! Structured error types shared across the Credo workspace, built with
//! `thiserror`. Each variant carries the rejected input and the expected
//! format so that operators can diagnose misconfiguration without guesswork.
//!
//! Subsystem-specific errors (ledger transport, engine degrade paths) live
//! in their own crates and convert from these at the seams.

use thiserror::Error;

/// Validation errors for ledger identifier newtypes.
///
/// Each identifier type enforces format constraints at construction time.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Document hash does not conform to the 0x-prefixed 64-hex-digit form.
    #[error("invalid document hash: \"{0}\" (expected 0x followed by 64 hex digits)")]
    InvalidDocumentHash(String),

    /// Account address does not conform to the 0x-prefixed 40-hex-digit form.
    #[error("invalid account address: \"{0}\" (expected 0x followed by 40 hex digits)")]
    InvalidAccountAddress(String),

    /// Transaction reference does not conform to the 0x-prefixed 64-hex-digit form.
    #[error("invalid transaction reference: \"{0}\" (expected 0x followed by 64 hex digits)")]
    InvalidTxRef(String),

    /// Timestamp string is not valid UTC ISO 8601.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Pagination argument errors.
///
/// Negative limits and offsets indicate a programming or integration
/// mistake rather than ledger unavailability, so they surface as hard
/// errors at the boundary instead of being clamped.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaginationError {
    /// The supplied limit was negative.
    #[error("negative page limit: {0}")]
    NegativeLimit(i64),

    /// The supplied offset was negative.
    #[error("negative page offset: {0}")]
    NegativeOffset(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_document_hash_display() {
        let err = ValidationError::InvalidDocumentHash("0x12".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("0x12"));
        assert!(msg.contains("64 hex digits"));
    }

    #[test]
    fn validation_error_account_address_display() {
        let err = ValidationError::InvalidAccountAddress("bogus".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("bogus"));
        assert!(msg.contains("40 hex digits"));
    }

    #[test]
    fn validation_error_tx_ref_display() {
        let err = ValidationError::InvalidTxRef("".to_string());
        assert!(format!("{err}").contains("transaction reference"));
    }

    #[test]
    fn validation_error_timestamp_display() {
        let err = ValidationError::InvalidTimestamp {
            value: "not-a-date".to_string(),
            reason: "parse failed".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("not-a-date"));
        assert!(msg.contains("parse failed"));
    }

    #[test]
    fn pagination_error_negative_limit_display() {
        let err = PaginationError::NegativeLimit(-5);
        assert!(format!("{err}").contains("-5"));
    }

    #[test]
    fn pagination_error_negative_offset_display() {
        let err = PaginationError::NegativeOffset(-1);
        assert!(format!("{err}").contains("-1"));
    }
}
