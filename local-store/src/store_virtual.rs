use async_trait::async_trait;
use std::io::Write;

use crate::errors::{StoreError, check_key};
use crate::traits::KeyValueStore;

pub struct InMemoryStore {
    root: vfs::VfsPath,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        let fs = vfs::MemoryFS::default();
        Self {
            root: vfs::VfsPath::new(fs),
        }
    }

    fn resolve(&self, key: &str) -> Result<vfs::VfsPath, StoreError> {
        check_key(key)?;
        self.root
            .join(format!("{key}.json"))
            .map_err(vfs_error(key))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn vfs_error(key: &str) -> impl FnOnce(vfs::VfsError) -> StoreError + '_ {
    move |source| StoreError::Vfs {
        key: key.to_string(),
        source,
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.resolve(key)?;
        if !path.exists().map_err(vfs_error(key))? {
            return Ok(None);
        }
        path.read_to_string().map(Some).map_err(vfs_error(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.resolve(key)?;
        let mut file = path.create_file().map_err(vfs_error(key))?;
        file.write_all(value.as_bytes())
            .map_err(|source| StoreError::Io {
                key: key.to_string(),
                source,
            })
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let path = self.resolve(key)?;
        if path.exists().map_err(vfs_error(key))? {
            path.remove_file().map_err(vfs_error(key))?;
        }
        Ok(())
    }
}
