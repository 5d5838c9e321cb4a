use async_trait::async_trait;

use crate::errors::StoreError;

/// String values under string keys, like the browser/device local storage the screens were built on
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `None` when nothing was ever stored under `key`
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Overwrites any previous value
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing a missing key is not an error
    async fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}
