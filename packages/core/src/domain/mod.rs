//! Domain layer for the chat shell.
//!
//! This module contains the chat hierarchy and selection rules, independent
//! of how state is stored, observed or rendered.

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_log;
pub mod session;
pub mod value_object;

pub use entity::{Channel, Member, Message, Selection, Server};
pub use error::{SessionError, ValueObjectError};
pub use factory::MessageIdFactory;
pub use message_log::MessageLog;
pub use session::Session;
pub use value_object::{ChannelId, DisplayTime, MemberId, MessageContent, MessageId, ServerId};
