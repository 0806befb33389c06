use std::collections::BTreeSet;

use super::item::Item;
use crate::mvi::Action;

/// Actions accepted by the items reducer.
///
/// `FetchAll`, `AddItem` and `DeleteItems` only run storage effects; state
/// changes arrive through the `Add` and `Delete` follow-ups they emit.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemsAction {
    /// Load every persisted item, emitting `Add` for each in fetch order.
    FetchAll,
    /// Persist a new item stamped with the current time, then emit `Add`.
    AddItem,
    /// Delete the items at these offsets of the current list.
    ///
    /// Offsets are resolved to items when the action is reduced, before any
    /// storage call runs. One `Delete` is emitted per successful delete.
    DeleteItems(BTreeSet<usize>),
    /// Append an item to the list.
    Add(Item),
    /// Remove the first occurrence of an item from the list, if present.
    Delete(Item),
}

impl Action for ItemsAction {}
