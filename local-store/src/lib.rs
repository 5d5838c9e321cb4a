use std::path::Path;

use store_local::LocalStore;
use store_virtual::InMemoryStore;
use traits::KeyValueStore;

pub mod errors;
pub mod json;
mod store_local;
mod store_virtual;
pub mod traits;

/// Last known roster, used when the roster cannot be fetched
pub const ROSTER_CACHE_KEY: &str = "trashcans";
/// User-created cards
pub const CARDS_KEY: &str = "cards";
/// Notification switches
pub const SETTINGS_KEY: &str = "settings";

#[must_use]
pub fn make_local_store(storage_dir: impl AsRef<Path>) -> Box<dyn KeyValueStore> {
    Box::new(LocalStore::new(storage_dir))
}

#[must_use]
pub fn make_inmemory_store() -> Box<dyn KeyValueStore> {
    Box::new(InMemoryStore::new())
}
