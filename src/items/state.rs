use super::item::Item;
use crate::mvi::FeatureState;

/// In-memory item list, in the order `Add` actions were applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemsState {
    pub items: Vec<Item>,
}

impl FeatureState for ItemsState {}

impl ItemsState {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, offset: usize) -> Option<&Item> {
        self.items.get(offset)
    }
}
