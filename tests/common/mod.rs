//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use itemkeeper::items::{Clock, Item, ItemsReducer, ItemsState};
use itemkeeper::mvi::Store;
use itemkeeper::storage::InMemoryItemDatabase;
use parking_lot::Mutex;
use tempfile::TempDir;

/// Item stamped `secs` seconds after the epoch.
pub fn item_at(secs: i64) -> Item {
    Item::new(Utc.timestamp_opt(secs, 0).unwrap())
}

/// Clock that starts at a fixed instant and advances one second per reading.
pub struct StepClock {
    next: Mutex<DateTime<Utc>>,
}

impl StepClock {
    pub fn starting_at(secs: i64) -> Self {
        Self {
            next: Mutex::new(Utc.timestamp_opt(secs, 0).unwrap()),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock();
        let now = *next;
        *next = now + Duration::seconds(1);
        now
    }
}

/// Store over an in-memory database, using the system clock.
pub fn store_over(database: &Arc<InMemoryItemDatabase>) -> Store<ItemsReducer> {
    Store::new(
        ItemsState::default(),
        ItemsReducer::new(database.clone()),
    )
}

/// Create a temporary config file with the given contents.
pub fn temp_config(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, contents).expect("Failed to write config");
    (temp_dir, config_path)
}
