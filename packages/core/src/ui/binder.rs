//! View Binder: turns snapshots into view models and intents into store
//! operations.
//!
//! The binder owns no chat data. It keeps the last built [`ShellViewModel`],
//! the composer draft, and a scroll-to-latest flag raised whenever the number
//! of messages changes.

use std::{cell::RefCell, mem, rc::Rc};

use tracing::{debug, info, warn};

use crate::{
    domain::{Message, MessageId, SessionError},
    store::{SessionStore, Snapshot, Subscription},
};

use super::view_model::{BinderOptions, ShellViewModel};

/// Something the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectServer(String),
    SelectChannel(String),
    /// Raw composer text; the store decides whether it is blank
    Send(String),
}

/// What happened to a dispatched intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// Selection changed (or was re-applied)
    Applied,
    /// A message was appended
    Sent(MessageId),
    /// Blank input, nothing appended
    NothingToSend,
    /// The store refused the intent; state is unchanged
    Rejected(SessionError),
}

struct BinderState {
    options: BinderOptions,
    /// Shared with `with_view` callers so the state borrow can be released
    /// before their closure runs
    view: Rc<ShellViewModel>,
    draft: String,
    message_count: usize,
    scroll_requested: bool,
    revision: u64,
}

impl BinderState {
    fn new(options: BinderOptions, snapshot: &Snapshot) -> Self {
        let view = Rc::new(ShellViewModel::build(snapshot, &options, ""));
        Self {
            options,
            view,
            draft: String::new(),
            message_count: snapshot.message_count(),
            // The message list starts scrolled to the latest message.
            scroll_requested: true,
            revision: 0,
        }
    }

    fn apply(&mut self, snapshot: &Snapshot) {
        let count = snapshot.message_count();
        if count != self.message_count {
            self.message_count = count;
            self.scroll_requested = true;
        }
        Rc::make_mut(&mut self.view).update(snapshot, &self.options, &self.draft);
        self.revision += 1;
    }

    fn set_draft(&mut self, draft: String) {
        Rc::make_mut(&mut self.view).composer.draft.clone_from(&draft);
        self.draft = draft;
        self.revision += 1;
    }
}

/// Binds one chat window to a [`SessionStore`]
pub struct ViewBinder {
    store: Rc<SessionStore>,
    state: Rc<RefCell<BinderState>>,
    subscription: Option<Subscription>,
}

impl ViewBinder {
    /// Render the current state and subscribe to further changes.
    ///
    /// The subscription lives exactly as long as the binder.
    pub fn mount(store: Rc<SessionStore>, options: BinderOptions) -> Self {
        let state = Rc::new(RefCell::new(BinderState::new(
            options,
            &store.current_snapshot(),
        )));

        let weak_state = Rc::downgrade(&state);
        let subscription = store.subscribe(move |snapshot| {
            if let Some(state) = weak_state.upgrade() {
                state.borrow_mut().apply(snapshot);
            }
        });

        info!(subscription = ?subscription.id(), "View binder mounted");
        Self {
            store,
            state,
            subscription: Some(subscription),
        }
    }

    pub fn store(&self) -> &Rc<SessionStore> {
        &self.store
    }

    /// Forward a server selection to the store
    pub fn select_server(&self, server_id: &str) -> Result<(), SessionError> {
        self.store.select_server(server_id)
    }

    /// Forward a channel selection to the store
    pub fn select_channel(&self, channel_id: &str) -> Result<(), SessionError> {
        self.store.select_channel(channel_id)
    }

    /// Forward raw input to the store as the current user.
    ///
    /// No trimming happens here; blank handling belongs to the store.
    pub fn send(&self, raw: &str) -> Option<Message> {
        self.store.send_as_current_user(raw)
    }

    /// Apply an intent.
    ///
    /// Refused intents are logged and reported, never propagated as errors:
    /// the window simply keeps showing the previous state.
    pub fn dispatch(&self, intent: Intent) -> IntentOutcome {
        let result = match &intent {
            Intent::SelectServer(id) => self.select_server(id).map(|()| IntentOutcome::Applied),
            Intent::SelectChannel(id) => {
                self.select_channel(id).map(|()| IntentOutcome::Applied)
            }
            Intent::Send(raw) => Ok(match self.send(raw) {
                Some(message) => IntentOutcome::Sent(message.id),
                None => IntentOutcome::NothingToSend,
            }),
        };

        match result {
            Ok(outcome) => {
                debug!(?intent, ?outcome, "Intent applied");
                outcome
            }
            Err(e) => {
                warn!(?intent, "Intent ignored: {}", e);
                IntentOutcome::Rejected(e)
            }
        }
    }

    /// Replace the composer text
    pub fn set_draft(&self, draft: impl Into<String>) {
        self.state.borrow_mut().set_draft(draft.into());
    }

    pub fn draft(&self) -> String {
        self.state.borrow().draft.clone()
    }

    /// Send the composer text.
    ///
    /// The draft is cleared only when a message was appended; blank or
    /// rejected input stays in the composer.
    pub fn submit_draft(&self) -> IntentOutcome {
        let draft = self.draft();
        let outcome = self.dispatch(Intent::Send(draft));
        if matches!(outcome, IntentOutcome::Sent(_)) {
            self.set_draft(String::new());
        }
        outcome
    }

    /// Copy of the current view model
    pub fn view(&self) -> ShellViewModel {
        ShellViewModel::clone(&self.state.borrow().view)
    }

    /// Run `f` against the current view model.
    ///
    /// `f` sees the view model as it was when called. It may dispatch
    /// intents; the binder's own view moves on without disturbing it.
    pub fn with_view<R>(&self, f: impl FnOnce(&ShellViewModel) -> R) -> R {
        let view = Rc::clone(&self.state.borrow().view);
        f(&view)
    }

    /// `#` + name of the active channel, or the default label
    pub fn active_channel_display_name(&self) -> String {
        self.state.borrow().view.top_bar.channel_name.clone()
    }

    /// Returns whether the message list should scroll to the latest message,
    /// and resets the request.
    pub fn take_scroll_request(&self) -> bool {
        mem::take(&mut self.state.borrow_mut().scroll_requested)
    }

    /// Incremented every time the view model changes
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Release the subscription and drop the binder
    pub fn teardown(self) {
        drop(self);
    }
}

impl Drop for ViewBinder {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            info!("View binder unmounted");
        }
    }
}
