//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "skytalk", version, about = "SkyTalk desktop chat shell")]
pub struct Args {
    /// TOML file with seed data and window settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Name shown on messages you send (overrides current_user_name)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
