//! Reducer for the item list.

use std::sync::Arc;

use super::action::ItemsAction;
use super::clock::{Clock, SystemClock};
use super::item::Item;
use super::state::ItemsState;
use crate::mvi::{Effect, EffectError, Reducer, Sender};
use crate::storage::{ItemDatabase, NoopItemDatabase};

/// Applies item actions and runs storage work through the injected
/// [`ItemDatabase`].
pub struct ItemsReducer {
    database: Arc<dyn ItemDatabase>,
    clock: Arc<dyn Clock>,
}

impl ItemsReducer {
    pub fn new(database: Arc<dyn ItemDatabase>) -> Self {
        Self::with_clock(database, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(database: Arc<dyn ItemDatabase>, clock: Arc<dyn Clock>) -> Self {
        Self { database, clock }
    }
}

impl Default for ItemsReducer {
    fn default() -> Self {
        Self::new(Arc::new(NoopItemDatabase))
    }
}

impl Reducer for ItemsReducer {
    type State = ItemsState;
    type Action = ItemsAction;

    fn reduce(
        &self,
        mut state: ItemsState,
        action: ItemsAction,
    ) -> (ItemsState, Effect<ItemsAction>) {
        match action {
            ItemsAction::FetchAll => {
                let database = Arc::clone(&self.database);
                (state, Effect::run(move |send| fetch_all(database, send)))
            }

            ItemsAction::AddItem => {
                let database = Arc::clone(&self.database);
                let clock = Arc::clone(&self.clock);
                (state, Effect::run(move |send| add_item(database, clock, send)))
            }

            ItemsAction::DeleteItems(offsets) => {
                // Resolved now: later actions may shift the list before the
                // effect runs.
                let mut targets = Vec::with_capacity(offsets.len());
                for offset in offsets {
                    match state.get(offset) {
                        Some(item) => targets.push(item.clone()),
                        None => tracing::warn!(
                            offset,
                            len = state.items.len(),
                            "delete offset out of range, skipped"
                        ),
                    }
                }
                if targets.is_empty() {
                    return (state, Effect::none());
                }

                let database = Arc::clone(&self.database);
                (
                    state,
                    Effect::run(move |send| delete_items(database, targets, send)),
                )
            }

            ItemsAction::Add(item) => {
                state.items.push(item);
                (state, Effect::none())
            }

            ItemsAction::Delete(item) => {
                if let Some(index) = state.items.iter().position(|existing| *existing == item) {
                    state.items.remove(index);
                }
                (state, Effect::none())
            }
        }
    }
}

async fn fetch_all(
    database: Arc<dyn ItemDatabase>,
    send: Sender<ItemsAction>,
) -> Result<(), EffectError> {
    let items = database.fetch_all().await?;
    tracing::debug!(count = items.len(), "fetch_all loaded items");
    for item in items {
        send.send(ItemsAction::Add(item)).await?;
    }
    Ok(())
}

async fn add_item(
    database: Arc<dyn ItemDatabase>,
    clock: Arc<dyn Clock>,
    send: Sender<ItemsAction>,
) -> Result<(), EffectError> {
    let item = Item::new(clock.now());
    database.add(&item).await?;
    tracing::debug!(id = %item.id(), "item added");
    send.send(ItemsAction::Add(item)).await?;
    Ok(())
}

/// Deletes sequentially; the first failure abandons the rest of the batch.
async fn delete_items(
    database: Arc<dyn ItemDatabase>,
    targets: Vec<Item>,
    send: Sender<ItemsAction>,
) -> Result<(), EffectError> {
    for item in targets {
        database.delete(&item).await?;
        tracing::debug!(id = %item.id(), "item deleted");
        send.send(ItemsAction::Delete(item)).await?;
    }
    Ok(())
}
