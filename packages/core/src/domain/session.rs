//! Session aggregate: the chat hierarchy plus the current selection.

use std::{collections::HashSet, hash::Hash, rc::Rc};

use super::{
    entity::{Channel, Member, Message, Selection, Server},
    error::SessionError,
    message_log::MessageLog,
    value_object::{ChannelId, ServerId},
};

/// The chat hierarchy seen by one client, and which server/channel is open.
///
/// Servers, channels and members are fixed at construction and shared behind
/// `Rc` so snapshots can hand them out without copying. Messages only grow,
/// and live in a [`MessageLog`] that snapshots share as well.
#[derive(Debug, Clone)]
pub struct Session {
    servers: Rc<[Server]>,
    channels: Rc<[Channel]>,
    members: Rc<[Member]>,
    messages: MessageLog,
    selection: Selection,
}

impl Session {
    /// Build a session from seed collections.
    ///
    /// The first server becomes active, together with the first channel
    /// visible in it.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no servers, if any collection holds a
    /// duplicate id, if a channel names an unknown server, or if a server
    /// would have no channel to show.
    pub fn new(
        servers: Vec<Server>,
        channels: Vec<Channel>,
        members: Vec<Member>,
        messages: Vec<Message>,
    ) -> Result<Self, SessionError> {
        ensure_unique(servers.iter().map(|s| &s.id), |id| {
            SessionError::DuplicateServerId(id.to_string())
        })?;
        ensure_unique(channels.iter().map(|c| &c.id), |id| {
            SessionError::DuplicateChannelId(id.to_string())
        })?;
        ensure_unique(members.iter().map(|m| &m.id), |id| {
            SessionError::DuplicateMemberId(id.to_string())
        })?;
        ensure_unique(messages.iter().map(|m| &m.id), |id| {
            SessionError::DuplicateMessageId(id.value())
        })?;

        for channel in &channels {
            if let Some(owner) = &channel.server_id
                && !servers.iter().any(|s| &s.id == owner)
            {
                return Err(SessionError::UnknownChannelServer {
                    channel: channel.id.to_string(),
                    server: owner.to_string(),
                });
            }
        }

        for server in &servers {
            if !channels.iter().any(|c| c.is_visible_in(&server.id)) {
                return Err(SessionError::ServerWithoutChannels(server.id.to_string()));
            }
        }

        let first_server = servers.first().ok_or(SessionError::NoServers)?;
        let first_channel = channels
            .iter()
            .find(|c| c.is_visible_in(&first_server.id))
            .ok_or_else(|| SessionError::ServerWithoutChannels(first_server.id.to_string()))?;

        let selection = Selection {
            active_server_id: first_server.id.clone(),
            active_channel_id: first_channel.id.clone(),
        };

        Ok(Self {
            servers: servers.into(),
            channels: channels.into(),
            members: members.into(),
            messages: messages.into_iter().collect(),
            selection,
        })
    }

    pub fn servers(&self) -> &Rc<[Server]> {
        &self.servers
    }

    pub fn channels(&self) -> &Rc<[Channel]> {
        &self.channels
    }

    pub fn members(&self) -> &Rc<[Member]> {
        &self.members
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Largest message id present, or 0 when there are no messages
    pub fn last_message_id(&self) -> u64 {
        self.messages
            .iter()
            .map(|m| m.id.value())
            .max()
            .unwrap_or(0)
    }

    /// Channels listed while `server_id` is active, in insertion order
    pub fn channels_in<'a>(
        &'a self,
        server_id: &'a ServerId,
    ) -> impl Iterator<Item = &'a Channel> + 'a {
        self.channels.iter().filter(move |c| c.is_visible_in(server_id))
    }

    /// Make `server_id` the active server.
    ///
    /// The active channel is kept when it is also listed in the new server;
    /// otherwise the first channel of the new server becomes active.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ServerNotFound` for an unknown id; the selection
    /// is left untouched.
    pub fn select_server(&mut self, server_id: &str) -> Result<(), SessionError> {
        let server = self
            .servers
            .iter()
            .find(|s| s.id == *server_id)
            .ok_or_else(|| SessionError::ServerNotFound(server_id.to_string()))?;

        let keeps_channel = self
            .channels
            .iter()
            .any(|c| c.id == self.selection.active_channel_id && c.is_visible_in(&server.id));

        let channel_id = if keeps_channel {
            self.selection.active_channel_id.clone()
        } else {
            self.channels_in(&server.id)
                .next()
                .map(|c| c.id.clone())
                .ok_or_else(|| SessionError::ServerWithoutChannels(server.id.to_string()))?
        };

        self.selection = Selection {
            active_server_id: server.id.clone(),
            active_channel_id: channel_id,
        };
        Ok(())
    }

    /// Make `channel_id` the active channel.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ChannelNotFound` when no channel with that id is
    /// listed in the active server; the selection is left untouched.
    pub fn select_channel(&mut self, channel_id: &str) -> Result<(), SessionError> {
        let active_server = &self.selection.active_server_id;
        let channel: &ChannelId = self
            .channels
            .iter()
            .find(|c| c.id == *channel_id && c.is_visible_in(active_server))
            .map(|c| &c.id)
            .ok_or_else(|| SessionError::ChannelNotFound(channel_id.to_string()))?;

        self.selection.active_channel_id = channel.clone();
        Ok(())
    }

    /// Append a message to the history
    pub fn append_message(&mut self, message: Message) {
        self.messages.push(message);
    }
}

fn ensure_unique<'a, T, F>(ids: impl Iterator<Item = &'a T>, err: F) -> Result<(), SessionError>
where
    T: Eq + Hash + 'a,
    F: Fn(&T) -> SessionError,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(err(id));
        }
    }
    Ok(())
}
