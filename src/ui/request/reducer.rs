//! Reducer for the request outcome.

use crate::ui::mvi::Reducer;

use super::intent::RequestIntent;
use super::state::RequestOutcome;

pub struct RequestReducer;

impl Reducer for RequestReducer {
    type State = RequestOutcome;
    type Intent = RequestIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            RequestIntent::Submit { request_id } => RequestOutcome::Loading { request_id },

            RequestIntent::Completed { request_id, result } => {
                // Only the submission currently loading may settle the outcome.
                if state.loading_id() != Some(request_id) {
                    return state;
                }
                match result {
                    Ok(text) => RequestOutcome::Success { text },
                    Err(message) => RequestOutcome::Error { message },
                }
            }
        }
    }
}
