//! Host configuration.
//!
//! One TOML file feeds both the session seed (top-level keys, see
//! [`SessionConfig`]) and the window settings (`[window]` table).

use std::path::Path;

use serde::{Deserialize, Serialize};
use skytalk_core::{ConfigError, SessionConfig};
use tracing::info;

/// Window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    /// Background colour as `#rrggbb`
    pub background: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "Mon Chat App".to_string(),
            width: 1200,
            height: 800,
            min_width: 900,
            min_height: 600,
            background: "#1e1f22".to_string(),
        }
    }
}

impl HostConfig {
    /// Text columns available when the window is painted to a terminal
    pub fn columns(&self) -> usize {
        (self.width.max(self.min_width) / 12).clamp(60, 160) as usize
    }

    /// Effective size after applying the minimums
    pub fn size(&self) -> (u32, u32) {
        (
            self.width.max(self.min_width),
            self.height.max(self.min_height),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WindowSection {
    window: HostConfig,
}

/// Everything the host reads at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopConfig {
    pub session: SessionConfig,
    pub window: HostConfig,
}

impl DesktopConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let session = SessionConfig::from_toml_str(contents)?;
        let section: WindowSection =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self {
            session,
            window: section.window,
        })
    }

    /// Load from `path`, or use the built-in sample community when no path
    /// is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            info!("No config file given, using built-in sample data");
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Replace the local user's name when one was given on the command line
    pub fn with_user_override(mut self, user: Option<String>) -> Self {
        if let Some(user) = user {
            self.session.current_user_name = user;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_matches_sample_app() {
        // テスト項目: デフォルトのウィンドウ設定
        let window = HostConfig::default();

        assert_eq!(window.title, "Mon Chat App");
        assert_eq!(window.size(), (1200, 800));
        assert_eq!(window.background, "#1e1f22");
        assert_eq!(window.columns(), 100);
    }

    #[test]
    fn test_size_respects_minimum() {
        // テスト項目: 最小サイズより小さい指定は最小サイズになる
        let window = HostConfig {
            width: 300,
            height: 200,
            ..HostConfig::default()
        };

        assert_eq!(window.size(), (900, 600));
        assert_eq!(window.columns(), 75);
    }

    #[test]
    fn test_from_toml_reads_both_sections() {
        // テスト項目: 同じ TOML からセッション設定とウィンドウ設定を読み込める
        // given (前提条件):
        let toml = r#"
            current_user_name = "Nova"

            [window]
            title = "SkyTalk"
            width = 1600
        "#;

        // when (操作):
        let config = DesktopConfig::from_toml_str(toml).unwrap();

        // then (期待する結果):
        assert_eq!(config.session.current_user_name, "Nova");
        assert_eq!(config.session.servers.len(), 3);
        assert_eq!(config.window.title, "SkyTalk");
        assert_eq!(config.window.width, 1600);
        assert_eq!(config.window.height, 800);
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        // テスト項目: パス指定なしではサンプルデータを使う
        let config = DesktopConfig::load(None).unwrap();

        assert_eq!(config, DesktopConfig::default());
    }

    #[test]
    fn test_user_override() {
        // テスト項目: コマンドラインのユーザー名で上書きできる
        let config = DesktopConfig::default().with_user_override(Some("Riff".to_string()));
        let unchanged = DesktopConfig::default().with_user_override(None);

        assert_eq!(config.session.current_user_name, "Riff");
        assert_eq!(unchanged.session.current_user_name, "You");
    }
}
