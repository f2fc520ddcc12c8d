//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable key-value slot contract consumed by the store.
//! - Isolate SQLite and JSON details from store orchestration.
//!
//! # Invariants
//! - Snapshot decoding enforces `Todo::validate()` on every record.
//! - Repository APIs return semantic errors (`QuotaExceeded`,
//!   `InvalidData`) in addition to DB transport errors.

pub mod kv_repo;
pub mod snapshot;
