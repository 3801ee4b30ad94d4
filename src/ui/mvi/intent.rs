//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (key presses, paste)
/// - Platform answers (permission result, picked image)
/// - Completion of a generation request
pub trait Intent: Send + 'static {}
