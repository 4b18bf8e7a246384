//! Shared utilities for SkyTalk.
//!
//! Logging setup and clock helpers used by both the core library and the
//! desktop host.

pub mod logger;
pub mod time;

pub use logger::setup_logger;
pub use time::{Clock, SystemClock, current_timestamp_millis, format_clock_time};
