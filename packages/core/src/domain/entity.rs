//! Core domain models for the chat shell.

use serde::{Deserialize, Serialize};

use super::value_object::{ChannelId, DisplayTime, MemberId, MessageContent, MessageId, ServerId};

/// A top-level chat community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Server identifier
    pub id: ServerId,
    /// Full name, shown as the server button tooltip
    pub display_name: String,
    /// Short label painted inside the server button
    pub short_label: String,
}

impl Server {
    /// Create a new server
    pub fn new(id: ServerId, display_name: String, short_label: String) -> Self {
        Self {
            id,
            display_name,
            short_label,
        }
    }
}

/// A named conversation stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel identifier
    pub id: ChannelId,
    /// Channel name without the leading `#`
    pub name: String,
    /// Owning server. `None` means the channel is listed under every server.
    pub server_id: Option<ServerId>,
}

impl Channel {
    /// Create a channel listed under every server
    pub fn shared(id: ChannelId, name: String) -> Self {
        Self {
            id,
            name,
            server_id: None,
        }
    }

    /// Create a channel owned by a single server
    pub fn owned_by(id: ChannelId, name: String, server_id: ServerId) -> Self {
        Self {
            id,
            name,
            server_id: Some(server_id),
        }
    }

    /// Whether the channel is listed while `server_id` is active
    pub fn is_visible_in(&self, server_id: &ServerId) -> bool {
        self.server_id.as_ref().is_none_or(|owner| owner == server_id)
    }
}

/// A participant listed in the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member identifier
    pub id: MemberId,
    /// Display name
    pub name: String,
}

impl Member {
    /// Create a new member
    pub fn new(id: MemberId, name: String) -> Self {
        Self { id, name }
    }

    /// First character of the name, used as the avatar
    pub fn avatar_initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

/// Represents a chat message in the domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier
    pub id: MessageId,
    /// Author display name
    pub author_name: String,
    /// Clock time the message was sent, already formatted
    pub display_time: DisplayTime,
    /// Message content
    pub content: MessageContent,
}

impl Message {
    /// Create a new chat message
    pub fn new(
        id: MessageId,
        author_name: String,
        display_time: DisplayTime,
        content: MessageContent,
    ) -> Self {
        Self {
            id,
            author_name,
            display_time,
            content,
        }
    }

    /// First character of the author name, uppercased, used as the avatar
    pub fn author_initial(&self) -> Option<char> {
        self.author_name.chars().next().and_then(|c| c.to_uppercase().next())
    }
}

/// Which server and channel are currently open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub active_server_id: ServerId,
    pub active_channel_id: ChannelId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_id(id: &str) -> ServerId {
        ServerId::new(id.to_string()).unwrap()
    }

    fn channel_id(id: &str) -> ChannelId {
        ChannelId::new(id.to_string()).unwrap()
    }

    #[test]
    fn test_shared_channel_is_visible_everywhere() {
        // テスト項目: サーバー指定のないチャンネルは全サーバーで表示される
        // given (前提条件):
        let channel = Channel::shared(channel_id("c1"), "general".to_string());

        // then (期待する結果):
        assert!(channel.is_visible_in(&server_id("s1")));
        assert!(channel.is_visible_in(&server_id("s2")));
    }

    #[test]
    fn test_owned_channel_is_visible_only_in_owner() {
        // テスト項目: サーバーに属するチャンネルはそのサーバーでのみ表示される
        // given (前提条件):
        let channel = Channel::owned_by(channel_id("c9"), "raids".to_string(), server_id("s3"));

        // then (期待する結果):
        assert!(channel.is_visible_in(&server_id("s3")));
        assert!(!channel.is_visible_in(&server_id("s1")));
    }

    #[test]
    fn test_message_author_initial_is_uppercased() {
        // テスト項目: アバターの頭文字は大文字になる
        // given (前提条件):
        let message = Message::new(
            MessageId::new(1),
            "astra".to_string(),
            DisplayTime::new("10:01"),
            MessageContent::new("Welcome".to_string()).unwrap(),
        );

        // then (期待する結果):
        assert_eq!(message.author_initial(), Some('A'));
    }

    #[test]
    fn test_member_avatar_initial_empty_name() {
        // テスト項目: 名前が空のメンバーは頭文字を持たない
        let member = Member::new(MemberId::new("m1".to_string()).unwrap(), String::new());

        assert_eq!(member.avatar_initial(), None);
    }
}
