//! Domain model for the todo collection.
//!
//! # Responsibility
//! - Define canonical data structures used by store and view logic.
//! - Own the wire shape of persisted and exported records.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId`.
//! - Deletion is a hard removal; records are never resurrected.

pub(crate) mod due_date_serde;
pub mod todo;
