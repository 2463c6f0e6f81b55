//! Key-value persistence for the session.
//!
//! Values are opaque strings; the session decides how they are serialized.
//! Removing a key that does not exist is not an error.

use thiserror::Error;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::sql::SqlStore;

mod file;
mod memory;
mod sql;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&mut self, key: &str) -> StoreResult<Option<String>>;
    async fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    async fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// Store selected at startup from the configuration.
pub enum Backend {
    File(FileStore),
    Sql(SqlStore),
    Memory(MemoryStore),
}

impl KeyValueStore for Backend {
    async fn get(&mut self, key: &str) -> StoreResult<Option<String>> {
        match self {
            Backend::File(store) => store.get(key).await,
            Backend::Sql(store) => store.get(key).await,
            Backend::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        match self {
            Backend::File(store) => store.set(key, value).await,
            Backend::Sql(store) => store.set(key, value).await,
            Backend::Memory(store) => store.set(key, value).await,
        }
    }

    async fn remove(&mut self, key: &str) -> StoreResult<()> {
        match self {
            Backend::File(store) => store.remove(key).await,
            Backend::Sql(store) => store.remove(key).await,
            Backend::Memory(store) => store.remove(key).await,
        }
    }
}
