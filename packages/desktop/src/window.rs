//! The chat window, painted as text.

use std::io::{self, Write};

use skytalk_core::{ShellViewModel, ViewBinder};
use tracing::info;

use crate::config::HostConfig;

pub struct TerminalWindow<W: Write> {
    config: HostConfig,
    out: W,
    painted_revision: Option<u64>,
}

impl<W: Write> TerminalWindow<W> {
    pub fn open(config: HostConfig, out: W) -> Self {
        let (width, height) = config.size();
        info!(
            title = %config.title,
            width,
            height,
            background = %config.background,
            "Opening window"
        );
        Self {
            config,
            out,
            painted_revision: None,
        }
    }

    /// Repaint when the binder has a view the window has not shown yet.
    ///
    /// Returns whether a frame was written.
    pub fn paint_if_changed(&mut self, binder: &ViewBinder) -> io::Result<bool> {
        let revision = binder.revision();
        if self.painted_revision == Some(revision) {
            return Ok(false);
        }

        let scroll_to_latest = binder.take_scroll_request();
        let frame = binder.with_view(|view| render_frame(view, &self.config, scroll_to_latest));
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        self.painted_revision = Some(revision);
        Ok(true)
    }

    pub fn print_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn rule(label: &str, fill: char, columns: usize) -> String {
    let used = label.chars().count();
    let mut line = label.to_string();
    line.extend(std::iter::repeat_n(fill, columns.saturating_sub(used)));
    line
}

/// Lay out every component of the window, top to bottom
pub fn render_frame(view: &ShellViewModel, config: &HostConfig, scroll_to_latest: bool) -> String {
    let columns = config.columns();
    let mut lines = Vec::new();

    lines.push(rule(&format!("══ {} ", config.title), '═', columns));

    let servers: Vec<String> = view
        .server_bar
        .servers
        .iter()
        .map(|s| {
            if s.is_active {
                format!("[{}]", s.label)
            } else {
                format!(" {} ", s.label)
            }
        })
        .collect();
    let active_server = view
        .server_bar
        .servers
        .iter()
        .find(|s| s.is_active)
        .map(|s| s.title.as_str())
        .unwrap_or_default();
    lines.push(format!(" {}  {} [+]", active_server, servers.join(" ")));

    lines.push(" TEXT".to_string());
    for channel in &view.channel_list.channels {
        let marker = if channel.is_active { '>' } else { ' ' };
        lines.push(format!(" {marker} # {}  ({})", channel.name, channel.id));
    }
    lines.push(" VOICE CHANNELS".to_string());
    for voice in &view.channel_list.voice_channels {
        lines.push(format!("   🔊 {voice}"));
    }

    lines.push(rule(
        &format!(
            "── {} · {}  [Pinned] [Search] ",
            view.top_bar.channel_name, view.top_bar.subtitle
        ),
        '─',
        columns,
    ));

    for message in &view.message_list.messages {
        lines.push(format!(
            " ({}) {}  {}",
            message.avatar, message.author, message.time
        ));
        lines.push(format!("     {}", message.content));
    }
    if scroll_to_latest {
        lines.push(rule("── latest ", '─', columns));
    }

    let members: Vec<String> = view
        .member_list
        .members
        .iter()
        .map(|m| format!("({}) {}", m.avatar, m.name))
        .collect();
    lines.push(rule("", '─', columns));
    lines.push(format!(" {}: {}", view.member_list.header, members.join(", ")));

    if !view.composer.draft.is_empty() {
        lines.push(format!(" draft: {}", view.composer.draft));
    }

    let mut frame = lines.join("\n");
    frame.push('\n');
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use skytalk_core::{BinderOptions, SessionConfig, SessionStore};
    use std::rc::Rc;

    fn mount() -> ViewBinder {
        let store = Rc::new(SessionStore::from_config(&SessionConfig::default()).unwrap());
        ViewBinder::mount(store, BinderOptions::default())
    }

    #[test]
    fn test_render_frame_contains_every_component() {
        // テスト項目: 全コンポーネントが描画される
        // given (前提条件):
        let binder = mount();

        // when (操作):
        let frame = binder.with_view(|view| render_frame(view, &HostConfig::default(), true));

        // then (期待する結果):
        assert!(frame.starts_with("══ Mon Chat App "));
        assert!(frame.contains(" SkyTalk  [S]  G   R  [+]"));
        assert!(frame.contains(" > # general  (c1)"));
        assert!(frame.contains("   # memes  (c3)"));
        assert!(frame.contains("🔊 Lobby"));
        assert!(frame.contains("#general · Welcome to the channel"));
        assert!(frame.contains(" (N) Nova  10:02\n     Who's up for a raid tonight?"));
        assert!(frame.contains("── latest "));
        assert!(frame.contains(" Members • 3: (A) Astra, (N) Nova, (R) Riff"));
    }

    #[test]
    fn test_paint_only_when_revision_changes() {
        // テスト項目: 表示モデルが変わった時だけ再描画される
        let binder = mount();
        let mut window = TerminalWindow::open(HostConfig::default(), Vec::new());

        assert!(window.paint_if_changed(&binder).unwrap());
        assert!(!window.paint_if_changed(&binder).unwrap());

        binder.select_channel("c2").unwrap();
        assert!(window.paint_if_changed(&binder).unwrap());

        let output = String::from_utf8(window.into_inner()).unwrap();
        assert_eq!(output.matches("══ Mon Chat App").count(), 2);
        assert!(output.contains("#announcements · Welcome to the channel"));
    }

    #[test]
    fn test_latest_marker_follows_scroll_request() {
        // テスト項目: 新しいメッセージが届いた時だけ最新位置マーカーが描画される
        let binder = mount();
        let mut window = TerminalWindow::open(HostConfig::default(), Vec::new());
        window.paint_if_changed(&binder).unwrap();

        binder.select_server("s2").unwrap();
        window.paint_if_changed(&binder).unwrap();
        binder.send("gg").unwrap();
        window.paint_if_changed(&binder).unwrap();

        let output = String::from_utf8(window.into_inner()).unwrap();
        // マウント直後と送信後の 2 回
        assert_eq!(output.matches("── latest ").count(), 2);
    }

    #[test]
    fn test_rule_pads_to_columns() {
        // テスト項目: 罫線は指定された幅まで埋められる
        let line = rule("ab", '-', 5);

        assert_eq!(line, "ab---");
        assert_eq!(rule("toolong", '-', 3), "toolong");
    }
}
