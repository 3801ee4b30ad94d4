//! Outcome of the last generation request.
//!
//! - `state.rs` - `RequestOutcome` sum type
//! - `intent.rs` - submit / completion intents
//! - `reducer.rs` - transitions, stale completions dropped
//! - `holder.rs` - runs the request and publishes the outcome

mod holder;
mod intent;
mod reducer;
mod state;

pub use holder::{RequestHolder, SubmitError};
pub use intent::RequestIntent;
pub use reducer::RequestReducer;
pub use state::RequestOutcome;
