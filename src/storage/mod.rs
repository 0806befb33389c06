//! Item storage dependency.
//!
//! The items reducer only sees the [`ItemDatabase`] trait; which
//! implementation backs it is decided at composition time:
//!
//! - [`NoopItemDatabase`]: placeholder used when nothing is injected
//! - [`InMemoryItemDatabase`]: process-local store, also the test double
//! - [`SqliteItemDatabase`]: the live on-disk store

mod memory;
mod noop;
mod sqlite;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::items::Item;

pub use memory::InMemoryItemDatabase;
pub use noop::NoopItemDatabase;
pub use sqlite::SqliteItemDatabase;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure of any storage operation.
///
/// Callers treat every variant the same way; the variants only carry the
/// cause for logs.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to prepare database directory '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid persisted item: {message}")]
    Corrupt { message: String },

    #[error("storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Fetch/add/delete capability consumed by the items reducer.
#[async_trait]
pub trait ItemDatabase: Send + Sync {
    /// All persisted items. Ordering is up to the implementation.
    async fn fetch_all(&self) -> StorageResult<Vec<Item>>;

    async fn add(&self, item: &Item) -> StorageResult<()>;

    /// Remove a persisted item. Deleting an absent item is not an error.
    async fn delete(&self, item: &Item) -> StorageResult<()>;
}
