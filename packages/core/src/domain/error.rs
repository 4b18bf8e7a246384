//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Identifier validation error
    #[error("{kind} cannot be empty")]
    IdEmpty { kind: &'static str },

    /// Identifier too long error
    #[error("{kind} cannot exceed {max} characters (got {actual})")]
    IdTooLong {
        kind: &'static str,
        max: usize,
        actual: usize,
    },

    /// MessageContent validation error (empty after trimming)
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,
}

/// Errors related to Session domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Selection referenced a server id that does not exist
    #[error("Server '{0}' not found")]
    ServerNotFound(String),

    /// Selection referenced a channel id that does not exist in the active server
    #[error("Channel '{0}' not found")]
    ChannelNotFound(String),

    /// A session needs at least one server
    #[error("Session requires at least one server")]
    NoServers,

    /// Duplicate server id in the seed data
    #[error("Duplicate server id '{0}'")]
    DuplicateServerId(String),

    /// Duplicate channel id in the seed data
    #[error("Duplicate channel id '{0}'")]
    DuplicateChannelId(String),

    /// Duplicate member id in the seed data
    #[error("Duplicate member id '{0}'")]
    DuplicateMemberId(String),

    /// Duplicate message id in the seed data
    #[error("Duplicate message id {0}")]
    DuplicateMessageId(u64),

    /// Channel is scoped to a server that does not exist
    #[error("Channel '{channel}' belongs to unknown server '{server}'")]
    UnknownChannelServer { channel: String, server: String },

    /// Server has no channel visible in it
    #[error("Server '{0}' has no channels")]
    ServerWithoutChannels(String),
}
