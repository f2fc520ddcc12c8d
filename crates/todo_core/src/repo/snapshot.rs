//! Persisted snapshot codec for the todo collection.
//!
//! # Responsibility
//! - Encode the full collection into the single-slot document.
//! - Decode and validate a stored document back into records.
//!
//! # Invariants
//! - Document shape is `{ "todos": [...], "lastId": N }`.
//! - `lastId` is written for compatibility only and ignored on decode.
//! - Decoding rejects records that fail `Todo::validate()` or repeat an id.

use crate::model::todo::Todo;
use crate::repo::kv_repo::{RepoError, RepoResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotOut<'a> {
    todos: &'a [Todo],
    last_id: u64,
}

#[derive(Deserialize)]
struct SnapshotIn {
    todos: Vec<Todo>,
}

/// Serializes the collection, enforcing an optional byte capacity.
pub fn encode_snapshot(todos: &[Todo], key: &str, limit: Option<usize>) -> RepoResult<String> {
    let encoded = serde_json::to_string(&SnapshotOut {
        todos,
        last_id: last_id_watermark(todos),
    })?;

    if let Some(limit) = limit {
        if encoded.len() > limit {
            return Err(RepoError::QuotaExceeded {
                key: key.to_string(),
                size: encoded.len(),
                limit,
            });
        }
    }

    Ok(encoded)
}

/// Parses a stored document and validates every record.
pub fn decode_snapshot(raw: &str) -> RepoResult<Vec<Todo>> {
    let snapshot: SnapshotIn = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(snapshot.todos.len());
    for todo in &snapshot.todos {
        todo.validate()
            .map_err(|err| RepoError::InvalidData(format!("todo `{}`: {err}", todo.id)))?;
        if !seen.insert(todo.id.as_str()) {
            return Err(RepoError::InvalidData(format!(
                "duplicate todo id `{}`",
                todo.id
            )));
        }
    }

    Ok(snapshot.todos)
}

/// Highest leading-decimal prefix among ids, 0 when none has one.
pub fn last_id_watermark(todos: &[Todo]) -> u64 {
    todos
        .iter()
        .filter_map(|todo| {
            let digits: String = todo
                .id
                .trim_start()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse::<u64>().ok()
        })
        .max()
        .unwrap_or(0)
}
