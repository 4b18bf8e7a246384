//! Session Store: the single owner and writer of chat state.
//!
//! Every mutation goes through one of the store's operations. After a
//! mutation commits, the store captures one snapshot and hands it to every
//! listener synchronously, in registration order. Internal borrows are
//! released before listeners run, so a listener may read the store or issue
//! further operations.

use std::{cell::RefCell, fmt, rc::Rc};

use skytalk_shared::{Clock, SystemClock, format_clock_time};
use tracing::{debug, info};

use crate::{
    config::{ConfigError, SessionConfig},
    domain::{
        DisplayTime, Message, MessageContent, MessageIdFactory, Session, SessionError,
    },
};

use super::{
    snapshot::Snapshot,
    subscription::{self, ListenerRegistry, Subscription},
};

/// Owns the session and notifies subscribers of every committed change
pub struct SessionStore {
    session: RefCell<Session>,
    id_factory: RefCell<MessageIdFactory>,
    listeners: Rc<RefCell<ListenerRegistry>>,
    clock: Box<dyn Clock>,
    current_user_name: String,
}

impl SessionStore {
    /// Create a store over `session` using the system clock
    pub fn new(session: Session, current_user_name: impl Into<String>) -> Self {
        Self::with_clock(session, current_user_name, Box::new(SystemClock))
    }

    /// Create a store that reads the current moment from `clock`
    pub fn with_clock(
        session: Session,
        current_user_name: impl Into<String>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let id_factory = MessageIdFactory::starting_after(session.last_message_id());
        let current_user_name = current_user_name.into();
        info!(
            servers = session.servers().len(),
            channels = session.channels().len(),
            members = session.members().len(),
            messages = session.messages().len(),
            user = %current_user_name,
            "Session store created"
        );
        Self {
            session: RefCell::new(session),
            id_factory: RefCell::new(id_factory),
            listeners: Rc::new(RefCell::new(ListenerRegistry::default())),
            clock,
            current_user_name,
        }
    }

    /// Validate `config` and seed a store from it
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the seed data is invalid
    pub fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
        let session = config.build_session()?;
        Ok(Self::new(session, config.current_user_name.clone()))
    }

    /// Name used as author for messages typed by the local user
    pub fn current_user_name(&self) -> &str {
        &self.current_user_name
    }

    /// Make `server_id` the active server.
    ///
    /// Selecting the already active server still notifies.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ServerNotFound` for an unknown id; nothing
    /// changes and nobody is notified.
    pub fn select_server(&self, server_id: &str) -> Result<(), SessionError> {
        self.session.borrow_mut().select_server(server_id)?;
        debug!(server_id, "Active server changed");
        self.notify();
        Ok(())
    }

    /// Make `channel_id` the active channel.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ChannelNotFound` when the channel is not listed
    /// in the active server; nothing changes and nobody is notified.
    pub fn select_channel(&self, channel_id: &str) -> Result<(), SessionError> {
        self.session.borrow_mut().select_channel(channel_id)?;
        debug!(channel_id, "Active channel changed");
        self.notify();
        Ok(())
    }

    /// Append a message typed by `author_name` and return it.
    ///
    /// `content` is trimmed first. Blank input is absorbed: no message, no
    /// notification, `None`.
    pub fn send_message(&self, content: &str, author_name: &str) -> Option<Message> {
        let Ok(content) = MessageContent::new(content.to_string()) else {
            debug!("Ignoring blank message");
            return None;
        };

        let now = self.clock.now();
        let id = self.id_factory.borrow_mut().generate(now.timestamp_millis());
        let message = Message::new(
            id,
            author_name.to_string(),
            DisplayTime::new(format_clock_time(&now)),
            content,
        );

        self.session.borrow_mut().append_message(message.clone());
        debug!(message_id = %id, author = author_name, "Message appended");

        self.notify();
        Some(message)
    }

    /// [`send_message`](Self::send_message) authored by the current user
    pub fn send_as_current_user(&self, content: &str) -> Option<Message> {
        self.send_message(content, &self.current_user_name)
    }

    /// Immutable view of the current state
    pub fn current_snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.session.borrow())
    }

    pub fn message_count(&self) -> usize {
        self.session.borrow().messages().len()
    }

    /// Register `listener` for every committed change.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Snapshot) + 'static,
    {
        subscription::register(&self.listeners, Rc::new(listener))
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn notify(&self) {
        let listeners = self.listeners.borrow().listeners();
        if listeners.is_empty() {
            return;
        }
        let snapshot = self.current_snapshot();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.session)
            .field("listeners", &self.listeners)
            .field("current_user_name", &self.current_user_name)
            .finish_non_exhaustive()
    }
}
