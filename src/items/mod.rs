//! Item list feature.
//!
//! Uses the MVI pattern:
//! - `state.rs` - The in-memory item list
//! - `action.rs` - Requests (fetch, add, delete) and their follow-ups
//! - `reducer.rs` - State transitions and storage effects
//! - `item.rs` - The item record itself
//! - `clock.rs` - Time source for new items

mod action;
mod clock;
mod item;
mod reducer;
mod state;

pub use action::ItemsAction;
pub use clock::{Clock, SystemClock};
pub use item::{Item, ItemId};
pub use reducer::ItemsReducer;
pub use state::ItemsState;
