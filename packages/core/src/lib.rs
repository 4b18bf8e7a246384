//! Client-side session state for the SkyTalk chat shell.
//!
//! Layers, bottom-up:
//!
//! - [`domain`]: servers, channels, members, messages and the selection rules.
//! - [`store`]: the [`SessionStore`], sole writer of the session, which hands
//!   immutable [`Snapshot`]s to its subscribers after every change.
//! - [`ui`]: typed view models and the [`ViewBinder`] that maps user intents
//!   onto store operations.
//! - [`config`]: seed data the store is built from.

pub mod config;
pub mod domain;
pub mod store;
pub mod ui;

pub use config::{ConfigError, SessionConfig};
pub use domain::SessionError;
pub use store::{SessionStore, Snapshot, Subscription};
pub use ui::{BinderOptions, Intent, IntentOutcome, ShellViewModel, ViewBinder};
