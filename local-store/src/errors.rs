#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Invalid storage key `{0}`: only letters, digits, `-` and `_` are allowed")]
    InvalidKey(String),
    #[error("Storage I/O for key `{key}` failed: {source}")]
    Io {
        key: String,
        source: std::io::Error,
    },
    #[error("In-memory storage for key `{key}` failed: {source}")]
    Vfs {
        key: String,
        source: vfs::VfsError,
    },
    #[error("Stored value for key `{key}` is not valid JSON of the expected shape: {source}")]
    Json {
        key: String,
        source: serde_json::Error,
    },
}

pub(crate) fn check_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
