//! Todo collection store.
//!
//! # Responsibility
//! - Own the authoritative ordered collection of todos.
//! - Apply create/update/delete/toggle/reorder/clear mutations.
//! - Persist the whole collection to one durable slot after each mutation.
//!
//! # Invariants
//! - Blank titles and unknown ids are silent no-ops.
//! - Every applied mutation stamps `updated_at` on the records it touches.
//! - Persistence failures are logged and never roll back in-memory state.

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::model::todo::{NewTodo, Todo, TodoPatch};
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use crate::repo::snapshot::{decode_snapshot, encode_snapshot};
use crate::service::export::{render_export, ExportError, ExportFormat};
use crate::view::{derive_view, FilterState, SortOption, TodoStats};
use chrono::NaiveDate;
use log::{debug, error, info, warn};

/// Explicitly owned todo collection bound to a slot store and a clock.
pub struct TodoStore<S: KeyValueStore, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    config: StoreConfig,
    todos: Vec<Todo>,
}

impl<S: KeyValueStore> TodoStore<S, SystemClock> {
    /// Opens a store on `storage` with the system clock and default config.
    pub fn open_default(storage: S) -> Self {
        Self::open(storage, SystemClock, StoreConfig::default())
    }
}

impl<S: KeyValueStore, C: Clock> TodoStore<S, C> {
    /// Opens a store and restores the persisted collection.
    ///
    /// A missing slot yields an empty collection. A corrupt or unreadable
    /// slot also yields an empty collection and emits an error event.
    pub fn open(storage: S, clock: C, config: StoreConfig) -> Self {
        let todos = match load_todos(&storage, &config.storage_key) {
            Ok(Some(todos)) => {
                info!(
                    "event=store_load module=store status=ok count={}",
                    todos.len()
                );
                todos
            }
            Ok(None) => {
                info!("event=store_load module=store status=ok count=0 reason=empty_slot");
                Vec::new()
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error error_code=load_failed error={err}"
                );
                Vec::new()
            }
        };

        Self {
            storage,
            clock,
            config,
            todos,
        }
    }

    /// All records in collection order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Calendar day the views and due buckets are evaluated against.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Appends a new pending todo at the end of manual order.
    ///
    /// Returns `None` without touching state when the title is blank.
    pub fn create(&mut self, request: NewTodo) -> Option<Todo> {
        let Some(todo) = Todo::from_request(request, self.todos.len(), self.clock.now()) else {
            debug!("event=todo_create module=store status=skip reason=empty_title");
            return None;
        };

        info!(
            "event=todo_create module=store status=ok id={} order={}",
            todo.id, todo.order
        );
        self.todos.push(todo.clone());
        self.persist();
        Some(todo)
    }

    /// Merges `patch` into the matching todo and stamps `updated_at`.
    ///
    /// Returns `false` for unknown ids and for patches with a blank title.
    pub fn update(&mut self, id: &str, patch: TodoPatch) -> bool {
        let patch = match patch.normalized() {
            Ok(patch) => patch,
            Err(err) => {
                debug!("event=todo_update module=store status=skip id={id} reason={err}");
                return false;
            }
        };

        let now = self.clock.now();
        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            warn!("event=todo_update module=store status=skip id={id} reason=not_found");
            return false;
        };
        patch.apply_to(todo);
        todo.touch(now);

        info!("event=todo_update module=store status=ok id={id}");
        self.persist();
        true
    }

    /// Removes the matching todo; remaining `order` values are kept as-is.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        if self.todos.len() == before {
            warn!("event=todo_delete module=store status=skip id={id} reason=not_found");
            return false;
        }

        info!("event=todo_delete module=store status=ok id={id}");
        self.persist();
        true
    }

    /// Flips completion and stamps `updated_at`.
    pub fn toggle_completed(&mut self, id: &str) -> bool {
        let now = self.clock.now();
        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            warn!("event=todo_toggle module=store status=skip id={id} reason=not_found");
            return false;
        };
        todo.completed = !todo.completed;
        todo.touch(now);

        info!(
            "event=todo_toggle module=store status=ok id={id} completed={}",
            todo.completed
        );
        self.persist();
        true
    }

    /// Moves one todo within manual order and re-densifies `order`.
    ///
    /// Indices address the manual view (collection sorted by `order`).
    /// Equal or out-of-range indices are a no-op.
    pub fn reorder(&mut self, from_index: usize, to_index: usize) -> bool {
        let len = self.todos.len();
        if from_index == to_index || from_index >= len || to_index >= len {
            debug!(
                "event=todo_reorder module=store status=skip from={from_index} to={to_index} len={len}"
            );
            return false;
        }

        self.todos.sort_by_key(|todo| todo.order);
        let moved = self.todos.remove(from_index);
        self.todos.insert(to_index, moved);

        let now = self.clock.now();
        for (index, todo) in self.todos.iter_mut().enumerate() {
            todo.order = index;
            todo.touch(now);
        }

        info!("event=todo_reorder module=store status=ok from={from_index} to={to_index}");
        self.persist();
        true
    }

    /// Applies a drag result; a drop with no destination is ignored.
    pub fn reorder_drop(&mut self, from_index: usize, destination: Option<usize>) -> bool {
        match destination {
            Some(to_index) => self.reorder(from_index, to_index),
            None => false,
        }
    }

    /// Removes every completed todo in one batch; returns the removed count.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.todos.len();
        self.todos.retain(|todo| !todo.completed);
        let removed = before - self.todos.len();
        if removed == 0 {
            return 0;
        }

        info!("event=todo_clear_completed module=store status=ok removed={removed}");
        self.persist();
        removed
    }

    /// Filtered and sorted projection for list rendering.
    pub fn filtered_view(&self, filter: &FilterState, sort: SortOption) -> Vec<&Todo> {
        derive_view(&self.todos, filter, sort, self.today())
    }

    pub fn statistics(&self) -> TodoStats {
        TodoStats::compute(&self.todos, self.today())
    }

    /// Renders the whole collection for download.
    pub fn export_snapshot(&self, format: ExportFormat) -> Result<String, ExportError> {
        render_export(&self.todos, format)
    }

    /// Writes the collection now, surfacing storage failures.
    pub fn flush(&self) -> RepoResult<()> {
        let encoded = encode_snapshot(
            &self.todos,
            &self.config.storage_key,
            self.config.max_snapshot_bytes,
        )?;
        self.storage.set(&self.config.storage_key, &encoded)
    }

    fn persist(&self) {
        match self.flush() {
            Ok(()) => debug!(
                "event=store_save module=store status=ok count={}",
                self.todos.len()
            ),
            Err(err) => error!(
                "event=store_save module=store status=error error_code=save_failed count={} error={err}",
                self.todos.len()
            ),
        }
    }
}

fn load_todos<S: KeyValueStore>(storage: &S, key: &str) -> RepoResult<Option<Vec<Todo>>> {
    storage
        .get(key)?
        .map(|raw| decode_snapshot(&raw))
        .transpose()
}
