//! Composition root: wires storage into the items store and renders results.

use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::cli::Command;
use crate::config::StorageConfig;
use crate::items::{Item, ItemsAction, ItemsReducer, ItemsState};
use crate::mvi::{EffectReport, Store, StoreError};
use crate::storage::{InMemoryItemDatabase, ItemDatabase, SqliteItemDatabase, StorageError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to encode items: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Open the configured item database.
///
/// Failing here is fatal for the process: nothing can run without storage.
pub fn open_database(storage: &StorageConfig) -> Result<Arc<dyn ItemDatabase>, StorageError> {
    if storage.in_memory {
        tracing::info!("using in-memory item database");
        return Ok(Arc::new(InMemoryItemDatabase::new()));
    }
    let database = SqliteItemDatabase::open(storage.resolved_database_path())?;
    Ok(Arc::new(database))
}

/// Run one command against `database` and render the resulting list.
///
/// Items are always fetched first, mirroring a screen that loads on appear.
/// Storage failures inside effects do not fail the command; they come back
/// in the returned report.
pub async fn execute(
    command: &Command,
    database: Arc<dyn ItemDatabase>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<EffectReport, AppError> {
    let store = Store::new(ItemsState::default(), ItemsReducer::new(database));

    store.send(ItemsAction::FetchAll).await?.finish().await;

    match command {
        Command::List | Command::Show { .. } => {}
        Command::Add => {
            store.send(ItemsAction::AddItem).await?.finish().await;
        }
        Command::Delete { indices } => {
            let offsets: BTreeSet<usize> = indices.iter().copied().collect();
            store
                .send(ItemsAction::DeleteItems(offsets))
                .await?
                .finish()
                .await;
        }
    }
    store.settle().await;

    let state = store.state();
    match command {
        Command::Show { index } => render_detail(state.get(*index), format, out)?,
        _ => render_list(&state, format, out)?,
    }

    Ok(store.report())
}

#[derive(Serialize)]
struct ListedItem<'a> {
    index: usize,
    #[serde(flatten)]
    item: &'a Item,
}

pub fn render_list(
    state: &ItemsState,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => {
            let listed: Vec<ListedItem<'_>> = state
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| ListedItem { index, item })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &listed)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            if state.is_empty() {
                writeln!(out, "No items")?;
            }
            for (index, item) in state.items.iter().enumerate() {
                writeln!(out, "{:>3}  {}", index, item.display_timestamp())?;
            }
        }
    }
    Ok(())
}

pub fn render_detail(
    item: Option<&Item>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    match (format, item) {
        (OutputFormat::Json, item) => {
            serde_json::to_writer_pretty(&mut *out, &item)?;
            writeln!(out)?;
        }
        (OutputFormat::Text, Some(item)) => writeln!(out, "{}", item.detail_label())?,
        (OutputFormat::Text, None) => writeln!(out, "Select an item")?,
    }
    Ok(())
}
