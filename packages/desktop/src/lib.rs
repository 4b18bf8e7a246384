//! Desktop host for the SkyTalk chat shell.
//!
//! Opens the chat window (painted to the terminal), mounts a view binder on a
//! freshly seeded session store and turns typed lines into user intents.

pub mod bridge;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod runner;
pub mod window;

pub use cli::Args;
pub use error::DesktopError;
pub use runner::run;
