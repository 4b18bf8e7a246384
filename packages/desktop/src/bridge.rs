//! Request/response bridge between the window and the host process.
//!
//! The view can probe the host by invoking a named channel and getting a
//! string back. Only `ping` is registered by default.

use std::{collections::HashMap, fmt};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("No handler registered for channel '{0}'")]
    UnknownChannel(String),
}

type Handler = Box<dyn Fn() -> String>;

#[derive(Default)]
pub struct HostBridge {
    handlers: HashMap<String, Handler>,
}

impl HostBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bridge answering `ping` with `pong`
    pub fn with_default_handlers() -> Self {
        let mut bridge = Self::new();
        bridge.handle("ping", || "pong".to_string());
        bridge
    }

    /// Register (or replace) the handler for `channel`
    pub fn handle<F>(&mut self, channel: &str, handler: F)
    where
        F: Fn() -> String + 'static,
    {
        self.handlers.insert(channel.to_string(), Box::new(handler));
    }

    pub fn invoke(&self, channel: &str) -> Result<String, BridgeError> {
        let handler = self
            .handlers
            .get(channel)
            .ok_or_else(|| BridgeError::UnknownChannel(channel.to_string()))?;
        let reply = handler();
        tracing::debug!(channel, reply = %reply, "Bridge request answered");
        Ok(reply)
    }
}

impl fmt::Debug for HostBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut channels: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        channels.sort_unstable();
        f.debug_struct("HostBridge")
            .field("channels", &channels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_answers_pong() {
        // テスト項目: ping に pong が返る
        let bridge = HostBridge::with_default_handlers();

        assert_eq!(bridge.invoke("ping"), Ok("pong".to_string()));
    }

    #[test]
    fn test_unknown_channel_fails() {
        // テスト項目: 未登録のチャンネルはエラーになる
        let bridge = HostBridge::with_default_handlers();

        assert_eq!(
            bridge.invoke("version"),
            Err(BridgeError::UnknownChannel("version".to_string()))
        );
    }

    #[test]
    fn test_handle_replaces_existing_handler() {
        // テスト項目: 同じチャンネルに登録し直すと新しいハンドラが使われる
        let mut bridge = HostBridge::with_default_handlers();

        bridge.handle("ping", || "still here".to_string());

        assert_eq!(bridge.invoke("ping").unwrap(), "still here");
        assert_eq!(format!("{bridge:?}"), r#"HostBridge { channels: ["ping"] }"#);
    }
}
