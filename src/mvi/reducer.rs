//! Reducer trait for the MVI pipeline.

use super::action::Action;
use super::effect::Effect;
use super::state::FeatureState;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen. It never
/// touches the outside world itself: storage work is described by the
/// returned [`Effect`], which the store runs and which re-enters the
/// pipeline through follow-up actions.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: FeatureState;

    /// The action type this reducer handles.
    type Action: Action;

    /// Process an action and return the new state plus any effect to run.
    fn reduce(
        &self,
        state: Self::State,
        action: Self::Action,
    ) -> (Self::State, Effect<Self::Action>);
}
