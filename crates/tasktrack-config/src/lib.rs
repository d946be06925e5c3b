//! TaskTrack Configuration Management
//!
//! Loads display and logging settings from an optional TOML file and
//! `TASKTRACK_*` environment variables, validates them, and installs the
//! tracing subscriber.

pub mod error;
pub mod logging;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use logging::init_tracing;
pub use manager::ConfigManager;
pub use types::{AppConfig, ConfigManager as ConfigManagerTrait, DisplayConfig, LoggingConfig};
