//! Seed configuration for the session store.
//!
//! Everything the store starts with comes from a [`SessionConfig`]. Missing
//! keys fall back to the built-in sample community, so a config file only
//! needs to list what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{
    Channel, ChannelId, DisplayTime, Member, MemberId, Message, MessageContent, MessageId,
    Server, ServerId, Session, SessionError, ValueObjectError,
};

/// Errors raised while loading or validating seed data
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid value in config: {0}")]
    InvalidValue(#[from] ValueObjectError),

    #[error("Invalid session seed: {0}")]
    InvalidSession(#[from] SessionError),

    #[error("current_user_name cannot be empty")]
    EmptyUserName,
}

/// Seed data recognized at store construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub servers: Vec<ServerSeed>,
    pub channels: Vec<ChannelSeed>,
    pub members: Vec<MemberSeed>,
    pub initial_messages: Vec<MessageSeed>,
    /// Author name for messages sent from this client
    pub current_user_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSeed {
    pub id: String,
    pub name: String,
    /// Button label; defaults to the first letter of `name`
    #[serde(default)]
    pub short: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSeed {
    pub id: String,
    pub name: String,
    /// Owning server id. Channels without one are listed under every server.
    #[serde(default)]
    pub server: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSeed {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSeed {
    pub id: u64,
    pub author: String,
    /// Pre-formatted display time, e.g. `10:01`
    pub time: String,
    pub content: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            servers: vec![
                server_seed("s1", "SkyTalk", "S"),
                server_seed("s2", "Guild", "G"),
                server_seed("s3", "Raids", "R"),
            ],
            channels: vec![
                channel_seed("c1", "general"),
                channel_seed("c2", "announcements"),
                channel_seed("c3", "memes"),
            ],
            members: vec![
                member_seed("m1", "Astra"),
                member_seed("m2", "Nova"),
                member_seed("m3", "Riff"),
            ],
            initial_messages: vec![
                message_seed(1, "Astra", "10:01", "Welcome to SkyTalk!"),
                message_seed(2, "Nova", "10:02", "Who's up for a raid tonight?"),
                message_seed(3, "Astra", "10:04", "Count me in!"),
            ],
            current_user_name: "You".to_string(),
        }
    }
}

impl SessionConfig {
    /// Parse seed data from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load seed data from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!("Loaded session config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Check the seed data without keeping the resulting session
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_session().map(|_| ())
    }

    /// Convert the seeds into a validated [`Session`]
    pub fn build_session(&self) -> Result<Session, ConfigError> {
        if self.current_user_name.trim().is_empty() {
            return Err(ConfigError::EmptyUserName);
        }

        let servers = self
            .servers
            .iter()
            .map(|seed| {
                let short = seed
                    .short
                    .clone()
                    .unwrap_or_else(|| short_label_for(&seed.name));
                Ok(Server::new(
                    ServerId::new(seed.id.clone())?,
                    seed.name.clone(),
                    short,
                ))
            })
            .collect::<Result<Vec<_>, ValueObjectError>>()?;

        let channels = self
            .channels
            .iter()
            .map(|seed| {
                let id = ChannelId::new(seed.id.clone())?;
                Ok(match &seed.server {
                    Some(server) => {
                        Channel::owned_by(id, seed.name.clone(), ServerId::new(server.clone())?)
                    }
                    None => Channel::shared(id, seed.name.clone()),
                })
            })
            .collect::<Result<Vec<_>, ValueObjectError>>()?;

        let members = self
            .members
            .iter()
            .map(|seed| Ok(Member::new(MemberId::new(seed.id.clone())?, seed.name.clone())))
            .collect::<Result<Vec<_>, ValueObjectError>>()?;

        let messages = self
            .initial_messages
            .iter()
            .map(|seed| {
                Ok(Message::new(
                    MessageId::new(seed.id),
                    seed.author.clone(),
                    DisplayTime::new(seed.time.clone()),
                    MessageContent::new(seed.content.clone())?,
                ))
            })
            .collect::<Result<Vec<_>, ValueObjectError>>()?;

        Ok(Session::new(servers, channels, members, messages)?)
    }
}

fn short_label_for(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

fn server_seed(id: &str, name: &str, short: &str) -> ServerSeed {
    ServerSeed {
        id: id.to_string(),
        name: name.to_string(),
        short: Some(short.to_string()),
    }
}

fn channel_seed(id: &str, name: &str) -> ChannelSeed {
    ChannelSeed {
        id: id.to_string(),
        name: name.to_string(),
        server: None,
    }
}

fn member_seed(id: &str, name: &str) -> MemberSeed {
    MemberSeed {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn message_seed(id: u64, author: &str, time: &str, content: &str) -> MessageSeed {
    MessageSeed {
        id,
        author: author.to_string(),
        time: time.to_string(),
        content: content.to_string(),
    }
}
