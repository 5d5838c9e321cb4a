use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::errors::{StoreError, check_key};
use crate::traits::KeyValueStore;

/// One `<key>.json` file per key under `storage_dir`
pub struct LocalStore {
    storage_dir: PathBuf,
}

impl LocalStore {
    #[must_use]
    pub fn new<P: AsRef<Path>>(storage_dir: P) -> Self {
        let storage_dir = storage_dir.as_ref();
        tracing::debug!("Creating local storage object in {}", storage_dir.display());

        Self {
            storage_dir: storage_dir.to_path_buf(),
        }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StoreError> {
        check_key(key)?;
        Ok(self.storage_dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        key: key.to_string(),
        source,
    }
}

#[async_trait]
impl KeyValueStore for LocalStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.resolve(key)?;
        tracing::debug!("Calling 'get_item' on path: `{}`", path.display());

        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.resolve(key)?;
        tracing::debug!(
            "Calling 'set_item' with {} bytes to path: `{}`",
            value.len(),
            path.display()
        );

        fs::create_dir_all(&self.storage_dir)
            .await
            .map_err(io_error(key))?;
        fs::write(&path, value).await.map_err(io_error(key))
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let path = self.resolve(key)?;
        tracing::debug!("Calling 'remove_item' on path: `{}`", path.display());

        match fs::remove_file(&path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(io_error(key)(e)),
            _ => Ok(()),
        }
    }
}
