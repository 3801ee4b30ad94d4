//! Intents for the request outcome.

use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum RequestIntent {
    /// A submission was accepted.
    Submit { request_id: u64 },

    /// The generator finished. `Err` carries the display message.
    Completed {
        request_id: u64,
        result: Result<String, String>,
    },
}

impl Intent for RequestIntent {}
