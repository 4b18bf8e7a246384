//! Host event loop: paint, read a line, apply it, repeat.

use std::{io, io::Write, rc::Rc};

use rustyline::{DefaultEditor, error::ReadlineError};
use skytalk_core::{BinderOptions, IntentOutcome, SessionStore, ViewBinder};
use tracing::{debug, info, warn};

use crate::{
    bridge::HostBridge,
    cli::Args,
    command::{Command, HELP, parse_line},
    config::DesktopConfig,
    error::DesktopError,
    window::TerminalWindow,
};

/// Whether the loop keeps going after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run the desktop shell until the window is closed
pub fn run(args: Args) -> Result<(), DesktopError> {
    let config = DesktopConfig::load(args.config.as_deref())?.with_user_override(args.user);

    let store = Rc::new(SessionStore::from_config(&config.session)?);
    let binder = ViewBinder::mount(Rc::clone(&store), BinderOptions::default());
    let bridge = HostBridge::with_default_handlers();

    match bridge.invoke("ping") {
        Ok(reply) => debug!(reply = %reply, "Host bridge is alive"),
        Err(e) => warn!("Host bridge did not answer: {}", e),
    }

    let mut window = TerminalWindow::open(config.window.clone(), io::stdout());
    let mut editor = DefaultEditor::new()?;

    loop {
        window.paint_if_changed(&binder)?;

        let prompt = binder.with_view(|view| format!("{} > ", view.composer.placeholder));
        match editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }
                if handle_line(&line, &binder, &bridge, &mut window)? == Flow::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    info!("Window closed");
    binder.teardown();
    Ok(())
}

/// Apply one typed line
pub fn handle_line<W: Write>(
    line: &str,
    binder: &ViewBinder,
    bridge: &HostBridge,
    window: &mut TerminalWindow<W>,
) -> Result<Flow, DesktopError> {
    match parse_line(line) {
        Command::Intent(intent) => {
            if let IntentOutcome::Rejected(e) = binder.dispatch(intent) {
                window.print_line(&format!("! {e}"))?;
            }
        }
        Command::Submit(text) => {
            binder.set_draft(text);
            if let IntentOutcome::Rejected(e) = binder.submit_draft() {
                window.print_line(&format!("! {e}"))?;
            }
        }
        Command::Ping => match bridge.invoke("ping") {
            Ok(reply) => window.print_line(&reply)?,
            Err(e) => window.print_line(&format!("! {e}"))?,
        },
        Command::DumpState => {
            let snapshot = binder.store().current_snapshot();
            window.print_line(&serde_json::to_string_pretty(&snapshot)?)?;
        }
        Command::Help => window.print_line(HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use skytalk_core::SessionConfig;

    struct Harness {
        store: Rc<SessionStore>,
        binder: ViewBinder,
        bridge: HostBridge,
        window: TerminalWindow<Vec<u8>>,
    }

    impl Harness {
        fn new() -> Self {
            let store = Rc::new(SessionStore::from_config(&SessionConfig::default()).unwrap());
            let binder = ViewBinder::mount(Rc::clone(&store), BinderOptions::default());
            Self {
                store,
                binder,
                bridge: HostBridge::with_default_handlers(),
                window: TerminalWindow::open(HostConfig::default(), Vec::new()),
            }
        }

        fn type_line(&mut self, line: &str) -> Flow {
            handle_line(line, &self.binder, &self.bridge, &mut self.window).unwrap()
        }

        fn output(self) -> String {
            String::from_utf8(self.window.into_inner()).unwrap()
        }
    }

    #[test]
    fn test_typed_message_is_appended() {
        // テスト項目: 入力したテキストがメッセージとして追加され入力欄がクリアされる
        // given (前提条件):
        let mut harness = Harness::new();

        // when (操作):
        let flow = harness.type_line("hello world");

        // then (期待する結果):
        assert_eq!(flow, Flow::Continue);
        let snapshot = harness.store.current_snapshot();
        assert_eq!(snapshot.message_count(), 4);
        assert_eq!(snapshot.last_message().unwrap().content.as_str(), "hello world");
        assert_eq!(harness.binder.draft(), "");
    }

    #[test]
    fn test_blank_line_does_nothing() {
        // テスト項目: 空行は何も追加しない
        let mut harness = Harness::new();

        harness.type_line("   ");

        assert_eq!(harness.store.message_count(), 3);
        assert_eq!(harness.output(), "");
    }

    #[test]
    fn test_unknown_channel_prints_notice() {
        // テスト項目: 存在しないチャンネルへの切り替えは通知が表示され、状態は変わらない
        let mut harness = Harness::new();

        harness.type_line("/channel c404");

        assert_eq!(
            harness.store.current_snapshot().active_channel_id.as_str(),
            "c1"
        );
        assert_eq!(harness.output(), "! Channel 'c404' not found\n");
    }

    #[test]
    fn test_switch_server_and_channel() {
        // テスト項目: コマンドでサーバーとチャンネルを切り替えられる
        let mut harness = Harness::new();

        harness.type_line("/server s3");
        harness.type_line("/channel c2");

        let snapshot = harness.store.current_snapshot();
        assert_eq!(snapshot.active_server_id.as_str(), "s3");
        assert_eq!(harness.binder.active_channel_display_name(), "#announcements");
    }

    #[test]
    fn test_ping_prints_pong() {
        // テスト項目: /ping で pong が表示される
        let mut harness = Harness::new();

        harness.type_line("/ping");

        assert_eq!(harness.output(), "pong\n");
    }

    #[test]
    fn test_state_dumps_snapshot_json() {
        // テスト項目: /state でスナップショットが JSON として表示される
        let mut harness = Harness::new();

        harness.type_line("/state");

        let output = harness.output();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["active_server_id"], "s1");
        assert_eq!(json["active_channel_id"], "c1");
        assert_eq!(json["messages"].as_array().unwrap().len(), 3);
        assert_eq!(json["servers"][0]["display_name"], "SkyTalk");
    }

    #[test]
    fn test_quit_stops_loop() {
        // テスト項目: /quit でループが終了する
        let mut harness = Harness::new();

        assert_eq!(harness.type_line("/quit"), Flow::Quit);
    }
}
