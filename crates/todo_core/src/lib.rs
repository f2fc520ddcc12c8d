//! Core domain logic for the todo engine.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{Category, NewTodo, Todo, TodoId, TodoPatch, TodoValidationError};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use service::export::{parse_json_export, ExportError, ExportFormat};
pub use service::todo_store::TodoStore;
pub use view::{
    CategoryFilter, DueDateFilter, FilterState, ParseViewError, SortOption, StatusFilter,
    TodoStats,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
