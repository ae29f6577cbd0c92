//! slidebar - headless host for the slidebar_ui scrollbar
//!
//! Loads host configuration and replays scripted input sessions against a
//! scrollbar, reporting every renderer call.

pub mod config;
pub mod session;

pub use config::{AppConfig, ConfigError, LogLevel};
pub use session::{Session, SessionError, TimedEvent};
