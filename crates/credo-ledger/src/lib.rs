#![deny(missing_docs)]

//! # credo-ledger — Read-Only Ledger Boundary
//!
//! The reconciliation engine never writes to the ledger; this crate is the
//! whole of its read surface. It defines:
//!
//! - The append-only event model ([`IssuedEvent`], [`VerifiedEvent`],
//!   [`RevokedEvent`]) and the per-hash [`DocumentRecord`].
//! - The [`LedgerReader`] trait — the one seam between the engine and the
//!   external ledger. Everything downstream is generic over it.
//! - [`InMemoryLedger`], a failure-injectable implementation for tests
//!   and local development.
//! - [`LedgerGateway`], a typed HTTP client against a ledger indexer
//!   service, for deployments where event queries are served off-chain.
//!
//! ## Immutability Contract
//!
//! Events are created exactly once by the external ledger and never
//! mutated or deleted. A [`LedgerReader`] implementation must return
//! events in a stable order for an unchanged ledger; the engine's
//! idempotence guarantees build on that.

pub mod event;
pub mod gateway;
pub mod memory;
pub mod reader;
pub mod record;
pub(crate) mod retry;

pub use event::{IssuedEvent, LedgerEvent, RevokedEvent, SequenceOrdinal, VerifiedEvent};
pub use gateway::{GatewayConfig, GatewayConfigError, LedgerGateway};
pub use memory::InMemoryLedger;
pub use reader::{LedgerError, LedgerReader};
pub use record::DocumentRecord;
