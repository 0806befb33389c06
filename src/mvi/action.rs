//! Base trait for actions in the MVI pipeline.

/// Marker trait for action objects.
///
/// Actions represent:
/// - Requests from the presentation layer (fetch, add, delete)
/// - Follow-ups emitted by effects once storage work completes
///
/// Actions are processed by reducers to produce new states and effects.
pub trait Action: Send + 'static {}
