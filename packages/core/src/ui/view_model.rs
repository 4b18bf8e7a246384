//! View models: one typed structure per component of the chat window.
//!
//! Each view model is derived from a [`Snapshot`] and holds exactly what its
//! component paints, so components never depend on the store's own shape.

use std::mem;

use serde::Serialize;

use crate::{
    domain::{Message, MessageLog},
    store::Snapshot,
};

/// Labels and static content that are not part of the chat state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinderOptions {
    /// Shown as `#<label>` when the active channel id matches no channel
    pub default_channel_label: String,
    /// Top bar subtitle
    pub channel_subtitle: String,
    /// Static voice channel entries
    pub voice_channels: Vec<String>,
}

impl Default for BinderOptions {
    fn default() -> Self {
        Self {
            default_channel_label: "general".to_string(),
            channel_subtitle: "Welcome to the channel".to_string(),
            voice_channels: vec!["Lobby".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerButton {
    pub id: String,
    pub label: String,
    /// Full server name, shown on hover
    pub title: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerBarViewModel {
    pub servers: Vec<ServerButton>,
    pub active_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelEntry {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelListViewModel {
    pub channels: Vec<ChannelEntry>,
    pub active_id: String,
    pub voice_channels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopBarViewModel {
    /// `#` + active channel name
    pub channel_name: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRow {
    pub id: u64,
    pub author: String,
    pub avatar: char,
    pub time: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageListViewModel {
    pub messages: Vec<MessageRow>,
}

impl MessageListViewModel {
    /// Bring the rows in line with `messages`.
    ///
    /// History only grows, so rows already built stay valid and only the
    /// newer messages are converted.
    pub fn sync(&mut self, messages: &MessageLog) {
        if messages.len() < self.messages.len() {
            self.messages.clear();
        }
        let start = self.messages.len();
        self.messages.extend(messages.iter_from(start).map(message_row));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberRow {
    pub id: String,
    pub name: String,
    pub avatar: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberListViewModel {
    /// `Members • N`
    pub header: String,
    pub members: Vec<MemberRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposerViewModel {
    pub placeholder: String,
    pub draft: String,
}

/// Everything the chat window paints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellViewModel {
    pub server_bar: ServerBarViewModel,
    pub channel_list: ChannelListViewModel,
    pub top_bar: TopBarViewModel,
    pub message_list: MessageListViewModel,
    pub member_list: MemberListViewModel,
    pub composer: ComposerViewModel,
}

const AVATAR_FALLBACK: char = '?';

/// Name of the active channel with its `#` prefix.
///
/// A dangling active channel id falls back to the default label instead of
/// failing.
pub fn active_channel_display_name(snapshot: &Snapshot, default_label: &str) -> String {
    let name = snapshot
        .active_channel()
        .map(|c| c.name.as_str())
        .unwrap_or(default_label);
    format!("#{name}")
}

fn message_row(message: &Message) -> MessageRow {
    MessageRow {
        id: message.id.value(),
        author: message.author_name.clone(),
        avatar: message.author_initial().unwrap_or(AVATAR_FALLBACK),
        time: message.display_time.to_string(),
        content: message.content.to_string(),
    }
}

impl ShellViewModel {
    pub fn build(snapshot: &Snapshot, options: &BinderOptions, draft: &str) -> Self {
        Self::assemble(snapshot, options, draft, MessageListViewModel::default())
    }

    /// Rebuild from a newer snapshot of the same session, reusing the message
    /// rows already built
    pub fn update(&mut self, snapshot: &Snapshot, options: &BinderOptions, draft: &str) {
        let message_list = mem::take(&mut self.message_list);
        *self = Self::assemble(snapshot, options, draft, message_list);
    }

    fn assemble(
        snapshot: &Snapshot,
        options: &BinderOptions,
        draft: &str,
        mut message_list: MessageListViewModel,
    ) -> Self {
        message_list.sync(&snapshot.messages);
        let channel_name = active_channel_display_name(snapshot, &options.default_channel_label);

        let server_bar = ServerBarViewModel {
            servers: snapshot
                .servers
                .iter()
                .map(|s| ServerButton {
                    id: s.id.to_string(),
                    label: s.short_label.clone(),
                    title: s.display_name.clone(),
                    is_active: s.id == snapshot.active_server_id,
                })
                .collect(),
            active_id: snapshot.active_server_id.to_string(),
        };

        let channel_list = ChannelListViewModel {
            channels: snapshot
                .visible_channels()
                .map(|c| ChannelEntry {
                    id: c.id.to_string(),
                    name: c.name.clone(),
                    is_active: c.id == snapshot.active_channel_id,
                })
                .collect(),
            active_id: snapshot.active_channel_id.to_string(),
            voice_channels: options.voice_channels.clone(),
        };

        let member_list = MemberListViewModel {
            header: format!("Members • {}", snapshot.members.len()),
            members: snapshot
                .members
                .iter()
                .map(|m| MemberRow {
                    id: m.id.to_string(),
                    name: m.name.clone(),
                    avatar: m.avatar_initial().unwrap_or(AVATAR_FALLBACK),
                })
                .collect(),
        };

        let composer = ComposerViewModel {
            placeholder: format!("Message {channel_name}"),
            draft: draft.to_string(),
        };

        let top_bar = TopBarViewModel {
            channel_name,
            subtitle: options.channel_subtitle.clone(),
        };

        Self {
            server_bar,
            channel_list,
            top_bar,
            message_list,
            member_list,
            composer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SessionConfig, domain::ChannelId, store::SessionStore};

    fn default_snapshot() -> Snapshot {
        SessionStore::from_config(&SessionConfig::default())
            .unwrap()
            .current_snapshot()
    }

    #[test]
    fn test_active_channel_display_name_initial() {
        // テスト項目: 初期状態のチャンネル表示名は "#general"
        let snapshot = default_snapshot();

        assert_eq!(active_channel_display_name(&snapshot, "general"), "#general");
    }

    #[test]
    fn test_active_channel_display_name_dangling_id_falls_back() {
        // テスト項目: 存在しないチャンネル ID の場合はデフォルトラベルになる
        // given (前提条件):
        let mut snapshot = default_snapshot();
        snapshot.active_channel_id = ChannelId::new("gone".to_string()).unwrap();

        // when (操作):
        let name = active_channel_display_name(&snapshot, "fallback");

        // then (期待する結果):
        assert_eq!(name, "#fallback");
    }

    #[test]
    fn test_build_shell_view_model() {
        // テスト項目: スナップショットから全コンポーネントの表示モデルを構築できる
        // when (操作):
        let view = ShellViewModel::build(&default_snapshot(), &BinderOptions::default(), "dra");

        // then (期待する結果):
        let labels: Vec<&str> = view
            .server_bar
            .servers
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(labels, vec!["S", "G", "R"]);
        assert!(view.server_bar.servers[0].is_active);
        assert_eq!(view.server_bar.servers[1].title, "Guild");

        assert_eq!(view.channel_list.channels.len(), 3);
        assert!(view.channel_list.channels[0].is_active);
        assert_eq!(view.channel_list.voice_channels, vec!["Lobby".to_string()]);

        assert_eq!(view.top_bar.channel_name, "#general");
        assert_eq!(view.top_bar.subtitle, "Welcome to the channel");

        assert_eq!(view.message_list.messages.len(), 3);
        assert_eq!(view.message_list.messages[1].avatar, 'N');
        assert_eq!(view.message_list.messages[1].time, "10:02");

        assert_eq!(view.member_list.header, "Members • 3");
        assert_eq!(view.member_list.members[2].avatar, 'R');

        assert_eq!(view.composer.placeholder, "Message #general");
        assert_eq!(view.composer.draft, "dra");
    }

    #[test]
    fn test_update_keeps_existing_rows() {
        // テスト項目: 更新時は既存の行を残して新しいメッセージの行だけを追加する
        // given (前提条件):
        let store = SessionStore::from_config(&SessionConfig::default()).unwrap();
        let options = BinderOptions::default();
        let mut view = ShellViewModel::build(&store.current_snapshot(), &options, "");

        // when (操作):
        store.send_message("Hello", "Nova").unwrap();
        store.select_channel("c3").unwrap();
        view.update(&store.current_snapshot(), &options, "x");

        // then (期待する結果):
        assert_eq!(view.message_list.messages.len(), 4);
        assert_eq!(view.message_list.messages[3].author, "Nova");
        assert_eq!(view.message_list.messages[3].avatar, 'N');
        assert_eq!(view.top_bar.channel_name, "#memes");
        assert_eq!(view.composer.draft, "x");
    }

    #[test]
    fn test_sync_rebuilds_when_history_is_shorter() {
        // テスト項目: 行数より短い履歴が来た場合は作り直す
        let mut list = MessageListViewModel {
            messages: vec![
                MessageRow {
                    id: 99,
                    author: "Ghost".to_string(),
                    avatar: 'G',
                    time: "00:00".to_string(),
                    content: "gone".to_string(),
                };
                5
            ],
        };

        list.sync(&default_snapshot().messages);

        assert_eq!(list.messages.len(), 3);
        assert_eq!(list.messages[0].content, "Welcome to SkyTalk!");
    }
}
