//! Process-local item store.
//!
//! Backs `--in-memory` runs and doubles as the test dependency: failures and
//! fetch suspension can be injected so effect semantics are observable.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::{ItemDatabase, StorageError, StorageResult};
use crate::items::{Item, ItemId};

#[derive(Default)]
pub struct InMemoryItemDatabase {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    items: Vec<Item>,
    failing_fetches: usize,
    failing_adds: usize,
    failing_deletes: HashSet<ItemId>,
    delete_attempts: Vec<ItemId>,
    fetch_gate: Option<Arc<Notify>>,
}

impl InMemoryItemDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `items` already persisted, in the given order.
    pub fn with_items(items: Vec<Item>) -> Self {
        let db = Self::default();
        db.inner.lock().items = items;
        db
    }

    /// Currently persisted items, in insertion order.
    pub fn items(&self) -> Vec<Item> {
        self.inner.lock().items.clone()
    }

    /// Make the next `fetch_all` fail.
    pub fn fail_next_fetch(&self) {
        self.inner.lock().failing_fetches += 1;
    }

    /// Make the next `add` fail.
    pub fn fail_next_add(&self) {
        self.inner.lock().failing_adds += 1;
    }

    /// Make every `delete` of `id` fail.
    pub fn fail_delete_of(&self, id: ItemId) {
        self.inner.lock().failing_deletes.insert(id);
    }

    /// Ids passed to `delete`, in call order, including failed attempts.
    pub fn delete_attempts(&self) -> Vec<ItemId> {
        self.inner.lock().delete_attempts.clone()
    }

    /// Suspend every following `fetch_all` after it has read the items and
    /// until the returned gate is notified, once per fetch.
    pub fn gate_fetches(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.inner.lock().fetch_gate = Some(Arc::clone(&gate));
        gate
    }
}

fn injected(operation: &str) -> StorageError {
    StorageError::Unavailable {
        message: format!("injected {operation} failure"),
    }
}

#[async_trait]
impl ItemDatabase for InMemoryItemDatabase {
    async fn fetch_all(&self) -> StorageResult<Vec<Item>> {
        let (result, gate) = {
            let mut inner = self.inner.lock();
            let result = if inner.failing_fetches > 0 {
                inner.failing_fetches -= 1;
                Err(injected("fetch"))
            } else {
                Ok(inner.items.clone())
            };
            (result, inner.fetch_gate.clone())
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }

    async fn add(&self, item: &Item) -> StorageResult<()> {
        let mut inner = self.inner.lock();
        if inner.failing_adds > 0 {
            inner.failing_adds -= 1;
            return Err(injected("add"));
        }
        inner.items.push(item.clone());
        Ok(())
    }

    async fn delete(&self, item: &Item) -> StorageResult<()> {
        let mut inner = self.inner.lock();
        inner.delete_attempts.push(item.id());
        if inner.failing_deletes.contains(&item.id()) {
            return Err(injected("delete"));
        }
        inner.items.retain(|stored| stored.id() != item.id());
        Ok(())
    }
}
