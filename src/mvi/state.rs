//! Base trait for feature state in the MVI pipeline.

/// Marker trait for feature state objects.
///
/// States should be:
/// - Cheap to snapshot (Clone, handed to observers)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes)
pub trait FeatureState: Clone + PartialEq + Default + Send + Sync + 'static {}
