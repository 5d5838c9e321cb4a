use async_trait::async_trait;
use local_store::errors::StoreError;
use local_store::traits::KeyValueStore;

#[must_use]
pub fn make_store_mock() -> MockKeyValueStore {
    MockKeyValueStore::new()
}

mockall::mock! {
    pub KeyValueStore {}

    #[async_trait]
    impl KeyValueStore for KeyValueStore {
        async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
        async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
        async fn remove_item(&self, key: &str) -> Result<(), StoreError>;
    }
}
