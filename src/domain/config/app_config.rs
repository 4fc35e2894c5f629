//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Frames requested per capture callback
pub const DEFAULT_BUFFER_FRAMES: u32 = 1024;

/// Exit code when usage is printed for a missing or malformed invocation
pub const DEFAULT_USAGE_EXIT_CODE: u8 = 0;

/// Log filter used when neither RUST_LOG nor a configured level is present
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub usage_exit_code: Option<u8>,
    pub buffer_frames: Option<u32>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            usage_exit_code: Some(DEFAULT_USAGE_EXIT_CODE),
            buffer_frames: Some(DEFAULT_BUFFER_FRAMES),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            usage_exit_code: other.usage_exit_code.or(self.usage_exit_code),
            buffer_frames: other.buffer_frames.or(self.buffer_frames),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Get usage exit code, or 0 if not set
    pub fn usage_exit_code_or_default(&self) -> u8 {
        self.usage_exit_code.unwrap_or(DEFAULT_USAGE_EXIT_CODE)
    }

    /// Get buffer size in frames, or the default if not set or zero
    pub fn buffer_frames_or_default(&self) -> u32 {
        self.buffer_frames
            .filter(|&frames| frames > 0)
            .unwrap_or(DEFAULT_BUFFER_FRAMES)
    }

    /// Get log level, or "warn" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
