//! Screen state: prompt, selected image, permission and notices.
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - screen state
//! - `intent.rs` - user/platform actions
//! - `reducer.rs` - state transitions

mod intent;
mod reducer;
mod state;

pub use intent::{CursorMove, ScreenIntent};
pub use reducer::ScreenReducer;
pub use state::{Notice, PermissionState, ScreenState};
