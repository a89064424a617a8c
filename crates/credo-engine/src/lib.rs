#![deny(missing_docs)]

//! # credo-engine — Event-to-State Reconciliation
//!
//! Given the append-only event stream of an external credential ledger,
//! derive — for any issuer or globally — a consistent current status per
//! document, aggregate statistics, and stable paginated listings. No
//! mutable status field exists anywhere: every answer is recomputed from
//! an immutable event-set snapshot plus the current time.
//!
//! ## Pipeline
//!
//! ```text
//! LedgerReader ──▶ LedgerSnapshot (watermark-gated) ──▶ EventIndex
//!                                                          │
//!                                   ┌──────────────────────┤
//!                                   ▼                      ▼
//!                             compute_stats          list_documents
//!                                   │                      │
//!                                   └──── resolve_status ──┘
//! ```
//!
//! The crux join lives in [`EventIndex::verified_within`]: verification
//! events carry no issuer, so an issuer's verified set is discovered by
//! intersecting verified hashes with that issuer's issued hashes — never
//! by trusting an issuer field on the verification side.
//!
//! [`ReconciliationEngine`] is the facade the rest of the application
//! consumes; it owns the injected [`LedgerReader`](credo_ledger::LedgerReader)
//! and the snapshot cache, and applies the degrade policies: zeroed stats
//! and empty pages on an unreachable ledger, typed per-hash skips inside
//! an otherwise healthy page.

pub mod error;
pub mod index;
pub mod listing;
pub mod service;
pub mod snapshot;
pub mod stats;
pub mod status;

pub use error::EngineError;
pub use index::EventIndex;
pub use listing::{DocumentPage, DocumentView, PageRequest, SkippedDocument};
pub use service::{EngineConfig, ReconciliationEngine};
pub use snapshot::{LedgerSnapshot, SnapshotCache};
pub use stats::{compute_global_stats, compute_stats, DocumentStats};
pub use status::{resolve_status, DocumentStatus};
