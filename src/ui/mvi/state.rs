//! Base trait for UI state in MVI architecture.

/// Marker trait for UI state objects.
///
/// States are cloned to produce new states, compared to detect changes and
/// start from `Default`.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
