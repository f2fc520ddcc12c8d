//! Store configuration.

/// Key of the single durable slot holding the collection snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "todos-app-data";
/// Snapshot capacity mirroring the browser local-storage budget.
pub const DEFAULT_MAX_SNAPSHOT_BYTES: usize = 5 * 1024 * 1024;

/// Configuration for one `TodoStore` instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Slot key used for both load and save.
    pub storage_key: String,
    /// Upper bound for one serialized snapshot; `None` disables the check.
    pub max_snapshot_bytes: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_snapshot_bytes: Some(DEFAULT_MAX_SNAPSHOT_BYTES),
        }
    }
}

impl StoreConfig {
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    pub fn with_max_snapshot_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_snapshot_bytes = limit;
        self
    }
}
