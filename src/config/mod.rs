//! Configuration: TOML file under the platform config directory.

mod loader;
mod types;

pub use loader::{ConfigError, MIN_MAX_DIMENSION};
pub use types::{Config, GeminiConfig, LoggingConfig, MediaConfig, UiConfig};
