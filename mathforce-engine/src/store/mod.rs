//! Key-value persistence boundary.
//!
//! Values are raw JSON text, one per key. Reads that find nothing return
//! `None`; decoding is left to callers so corrupt values can fall back to
//! an empty default instead of failing.

mod file;
mod memory;

use async_trait::async_trait;

use crate::error::Result;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

/// Base key of the last finished session aggregate.
pub const LAST_SESSION_KEY: &str = "mathforce_train_stats";
/// Base key of the history ledger.
pub const HISTORY_KEY: &str = "mathforce_training_history";
/// Base key of the weak-topic marker.
pub const WEAK_TOPIC_KEY: &str = "mathforce_weak_topic";

/// Storage for scoped records.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Delete `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
