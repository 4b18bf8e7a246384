//! Immutable point-in-time view of the session.

use std::rc::Rc;

use serde::Serialize;

use crate::domain::{Channel, ChannelId, Member, Message, MessageLog, Server, ServerId, Session};

/// What subscribers render from.
///
/// Collections are reference counted: capturing or cloning a snapshot never
/// copies entities, and nothing reachable from a snapshot can change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub servers: Rc<[Server]>,
    pub channels: Rc<[Channel]>,
    pub messages: MessageLog,
    pub members: Rc<[Member]>,
    pub active_server_id: ServerId,
    pub active_channel_id: ChannelId,
}

impl Snapshot {
    pub(crate) fn capture(session: &Session) -> Self {
        let selection = session.selection();
        Self {
            servers: Rc::clone(session.servers()),
            channels: Rc::clone(session.channels()),
            messages: session.messages().clone(),
            members: Rc::clone(session.members()),
            active_server_id: selection.active_server_id.clone(),
            active_channel_id: selection.active_channel_id.clone(),
        }
    }

    pub fn active_server(&self) -> Option<&Server> {
        self.servers.iter().find(|s| s.id == self.active_server_id)
    }

    pub fn active_channel(&self) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == self.active_channel_id)
    }

    /// Channels listed under the active server
    pub fn visible_channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels
            .iter()
            .filter(|c| c.is_visible_in(&self.active_server_id))
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    #[cfg(test)]
    pub(crate) fn empty_for_tests() -> Self {
        Self {
            servers: Rc::from(Vec::new()),
            channels: Rc::from(Vec::new()),
            messages: MessageLog::new(),
            members: Rc::from(Vec::new()),
            active_server_id: ServerId::new("s0".to_string()).expect("valid id"),
            active_channel_id: ChannelId::new("c0".to_string()).expect("valid id"),
        }
    }
}
