use async_trait::async_trait;

use super::{ItemDatabase, StorageResult};
use crate::items::Item;

/// Placeholder database: always empty, ignores writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopItemDatabase;

#[async_trait]
impl ItemDatabase for NoopItemDatabase {
    async fn fetch_all(&self) -> StorageResult<Vec<Item>> {
        Ok(Vec::new())
    }

    async fn add(&self, _item: &Item) -> StorageResult<()> {
        Ok(())
    }

    async fn delete(&self, _item: &Item) -> StorageResult<()> {
        Ok(())
    }
}
