//! SQLite backing for the durable slot store.
//!
//! The database holds one `kv_store` table; the todo snapshot lives in a
//! single row of it. Connections returned from here already carry the
//! current table layout.

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory, DbError, DbResult};
