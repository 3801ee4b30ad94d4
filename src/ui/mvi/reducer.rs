//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::UiState;

/// The only place where state transitions happen.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// Pure transition: `(State, Intent) -> State`.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Apply [`reduce`](Self::reduce) to a state held behind `&mut`,
    /// e.g. inside `watch::Sender::send_modify` or an `App` field.
    fn reduce_in_place(state: &mut Self::State, intent: Self::Intent) {
        *state = Self::reduce(std::mem::take(state), intent);
    }
}
