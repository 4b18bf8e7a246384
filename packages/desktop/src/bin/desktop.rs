//! SkyTalk desktop chat shell.
//!
//! Opens the chat window with the built-in sample community (or the seed data
//! from `--config`). Messages you send stay local.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin skytalk -- --user Astra
//! ```

use clap::Parser;
use skytalk_desktop::{Args, run};
use skytalk_shared::setup_logger;

fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = run(args) {
        tracing::error!("SkyTalk exited with an error: {}", e);
        std::process::exit(1);
    }
}
