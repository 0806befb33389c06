//! SQLite-backed item store.
//!
//! # Invariants
//! - Returned stores have the `items` schema applied.
//! - `fetch_all` returns items sorted by timestamp ascending, ties in
//!   insertion order.
//! - Timestamps are stored as UTC microseconds.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::DateTime;
use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use super::{ItemDatabase, StorageError, StorageResult};
use crate::items::{Item, ItemId};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS items (
    id TEXT PRIMARY KEY NOT NULL,
    timestamp_us INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS items_timestamp ON items (timestamp_us);";

const ITEM_SELECT_SQL: &str = "SELECT id, timestamp_us
FROM items
ORDER BY timestamp_us ASC, rowid ASC;";

pub struct SqliteItemDatabase {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteItemDatabase {
    /// Open (or create) the database file at `path`, creating parent
    /// directories as needed.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        tracing::info!(path = %path.display(), "opening item database");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let result = Connection::open(path)
            .map_err(StorageError::from)
            .and_then(Self::bootstrap);
        match &result {
            Ok(_) => tracing::info!(
                duration_ms = started_at.elapsed().as_millis() as u64,
                "item database ready"
            ),
            Err(err) => tracing::error!(
                duration_ms = started_at.elapsed().as_millis() as u64,
                error = %err,
                "item database open failed"
            ),
        }
        result
    }

    /// Open a private in-memory database. Contents vanish on drop.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking SQLite call off the async executor.
    async fn with_conn<T, F>(&self, work: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StorageResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock();
            work(&guard)
        })
        .await?
    }
}

fn parse_item_row(row: &Row<'_>) -> StorageResult<Item> {
    let id: String = row.get(0)?;
    let micros: i64 = row.get(1)?;

    let id = Uuid::parse_str(&id).map_err(|err| StorageError::Corrupt {
        message: format!("invalid id '{id}': {err}"),
    })?;
    let timestamp = DateTime::from_timestamp_micros(micros).ok_or_else(|| StorageError::Corrupt {
        message: format!("timestamp out of range: {micros}"),
    })?;

    Ok(Item::from_parts(ItemId::from_uuid(id), timestamp))
}

#[async_trait]
impl ItemDatabase for SqliteItemDatabase {
    async fn fetch_all(&self) -> StorageResult<Vec<Item>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(ITEM_SELECT_SQL)?;
            let mut rows = stmt.query([])?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(parse_item_row(row)?);
            }
            tracing::debug!(count = items.len(), "fetched items");
            Ok(items)
        })
        .await
    }

    async fn add(&self, item: &Item) -> StorageResult<()> {
        let id = item.id().to_string();
        let micros = item.timestamp().timestamp_micros();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO items (id, timestamp_us) VALUES (?1, ?2)",
                params![id, micros],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, item: &Item) -> StorageResult<()> {
        let id = item.id().to_string();
        self.with_conn(move |conn| {
            let removed = conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;
            if removed == 0 {
                tracing::debug!(id = %id, "delete of absent item");
            }
            Ok(())
        })
        .await
    }
}
