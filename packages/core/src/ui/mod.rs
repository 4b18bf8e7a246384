//! UI layer: view models and the binder that keeps them in sync with the store.

pub mod binder;
pub mod view_model;

pub use binder::{Intent, IntentOutcome, ViewBinder};
pub use view_model::{
    BinderOptions, ChannelEntry, ChannelListViewModel, ComposerViewModel, MemberListViewModel,
    MemberRow, MessageListViewModel, MessageRow, ServerBarViewModel, ServerButton,
    ShellViewModel, TopBarViewModel, active_channel_display_name,
};
