//! Model-View-Intent (MVI) store primitives.
//!
//! This module provides the unidirectional data flow used by features:
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ View
//!    ↑          │
//!    │          ↓
//!    └─────── Effect (storage work, follow-up actions)
//! ```
//!
//! - **State**: Snapshot-able representation of feature state
//! - **Action**: Requests and follow-ups processed by the store
//! - **Reducer**: Function of (State, Action) -> (State, Effect)
//! - **Store**: Single consumer that applies actions in order and runs effects

mod action;
mod effect;
mod reducer;
mod state;
mod store;

pub use action::Action;
pub use effect::{Effect, EffectError, Sender};
pub use reducer::Reducer;
pub use state::FeatureState;
pub use store::{EffectReport, Store, StoreError, StoreTask};
