//! Mapping typed lines to host commands and user intents.

use skytalk_core::Intent;

/// One line typed into the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Selection intent forwarded to the binder
    Intent(Intent),
    /// Composer text to send
    Submit(String),
    /// Probe the host bridge
    Ping,
    /// Print the current snapshot as JSON
    DumpState,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  /server <id>    switch server
  /channel <id>   switch channel
  /ping           probe the host
  /state          print the session snapshot as JSON
  /help           show this help
  /quit           close the window
Anything else is sent as a message.";

/// Parse a line.
///
/// Only known `/` commands are interpreted; any other text, blank lines
/// included, goes to the composer untouched.
pub fn parse_line(line: &str) -> Command {
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Submit(line.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().unwrap_or_default().trim().to_string();

    match name {
        "server" => Command::Intent(Intent::SelectServer(arg)),
        "channel" => Command::Intent(Intent::SelectChannel(arg)),
        "ping" => Command::Ping,
        "state" => Command::DumpState,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Submit(line.to_string()),
    }
}
