//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate collection mutations, derived views and persistence.
//! - Keep front ends decoupled from storage details.

pub mod export;
pub mod todo_store;
