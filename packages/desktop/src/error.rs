//! Host error definitions.

use rustyline::error::ReadlineError;
use skytalk_core::ConfigError;
use thiserror::Error;

/// Fatal errors that end the desktop session
#[derive(Debug, Error)]
pub enum DesktopError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),

    #[error("Failed to write to the window: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}
