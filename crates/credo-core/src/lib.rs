#![deny(missing_docs)]

//! # credo-core — Foundational Types for the Credo Reconciliation Stack
//!
//! This crate defines the foundational types that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only `serde`,
//! `serde_json`, `thiserror`, `chrono`, and `sha2` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for ledger primitives.** Every identifier is a
//!    distinct type. You cannot pass an [`AccountAddress`] where a
//!    [`DocumentHash`] is expected, even though both are hex strings on
//!    the wire.
//!
//! 2. **Validate at construction.** A [`DocumentHash`], [`AccountAddress`],
//!    or [`TxRef`] that exists is well-formed. Downstream code never
//!    re-checks hex formats.
//!
//! 3. **UTC only.** All timestamps are [`Timestamp`] — UTC, second
//!    precision, `Z`-suffixed in serialized form. Local time is a
//!    presentation concern that lives outside this workspace.
//!
//! 4. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use digest::fingerprint_document;
pub use error::{PaginationError, ValidationError};
pub use identity::{AccountAddress, DocumentHash, TxRef};
pub use temporal::Timestamp;
