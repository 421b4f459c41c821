use crate::error::Result;
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// String-keyed slot storage, the shape of browser local storage.
///
/// Values are opaque text; callers own the encoding.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads the value stored under `key`, `None` if the slot is empty
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Empties the slot; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;

    /// Lists the keys that currently hold a value, sorted
    async fn keys(&self) -> Result<Vec<String>>;
}
