use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A record carrying only its creation time.
///
/// Two items are equal when id and timestamp match, so items created in the
/// same instant stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    timestamp: DateTime<Utc>,
}

impl Item {
    /// New item with a fresh id.
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self::from_parts(ItemId::new(), timestamp)
    }

    /// Rebuild an item read back from storage.
    pub fn from_parts(id: ItemId, timestamp: DateTime<Utc>) -> Self {
        Self { id, timestamp }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Numeric date and time in local time, e.g. `2024-05-03 14:07:31`.
    pub fn display_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    /// Label for the detail view of this item.
    pub fn detail_label(&self) -> String {
        format!("Item at {}", self.display_timestamp())
    }
}
