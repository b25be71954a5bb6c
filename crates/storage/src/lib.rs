#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use fitlog_domain as domain;

pub mod backup;
pub mod config;
pub mod file_store;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod log;
pub mod memory_store;
pub mod record;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use file_store::FileStore;
pub use local_storage::LocalStorage;
pub use memory_store::MemoryStore;

/// Persistent string-keyed store holding one string value per key.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store unavailable")]
    Unavailable,
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for domain::StorageError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable => domain::StorageError::Unavailable,
            err => domain::StorageError::Other(Box::new(err)),
        }
    }
}
