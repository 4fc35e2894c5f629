//! Configuration value objects

mod app_config;
mod key;

pub use app_config::{AppConfig, DEFAULT_BUFFER_FRAMES, DEFAULT_LOG_LEVEL, DEFAULT_USAGE_EXIT_CODE};
pub use key::ConfigKey;
