pub mod args;
pub mod config;
pub mod gemini;
pub mod logging;
pub mod media;
pub mod ui;
