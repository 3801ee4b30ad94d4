//! State of the result pane.

use crate::ui::mvi::UiState;

/// Outcome of the most recent submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestOutcome {
    /// Nothing submitted yet.
    #[default]
    Placeholder,

    /// Waiting for the generator.
    Loading {
        /// Identifies the submission this state belongs to.
        request_id: u64,
    },

    /// The generator answered.
    Success { text: String },

    /// The request failed; `message` is shown to the user.
    Error { message: String },
}

impl UiState for RequestOutcome {}

impl RequestOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Success or Error.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Error { .. })
    }

    pub fn loading_id(&self) -> Option<u64> {
        match self {
            Self::Loading { request_id } => Some(*request_id),
            _ => None,
        }
    }
}
