//! Configuration keys and per-key validation

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ConfigError;

use super::AppConfig;

/// Level names accepted in a log filter directive
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// A setting that can be stored in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    UsageExitCode,
    BufferFrames,
    LogLevel,
}

impl ConfigKey {
    /// Every key, in file and listing order
    pub const ALL: [ConfigKey; 3] = [Self::UsageExitCode, Self::BufferFrames, Self::LogLevel];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UsageExitCode => "usage_exit_code",
            Self::BufferFrames => "buffer_frames",
            Self::LogLevel => "log_level",
        }
    }

    /// Whether the key is stored as a TOML integer (otherwise a string)
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::UsageExitCode | Self::BufferFrames)
    }

    fn invalid(&self, message: &str) -> ConfigError {
        ConfigError::ValidationError {
            key: self.as_str().to_string(),
            message: message.to_string(),
        }
    }

    /// Validate `raw` and store it in `config`. `config` is untouched on error.
    pub fn apply(&self, config: &mut AppConfig, raw: &str) -> Result<(), ConfigError> {
        let raw = raw.trim();
        match self {
            Self::UsageExitCode => {
                let code = raw
                    .parse::<u8>()
                    .map_err(|_| self.invalid("Value must be an integer between 0 and 255"))?;
                config.usage_exit_code = Some(code);
            }
            Self::BufferFrames => {
                let frames = raw
                    .parse::<u32>()
                    .ok()
                    .filter(|&frames| frames > 0)
                    .ok_or_else(|| self.invalid("Value must be a positive number of frames"))?;
                config.buffer_frames = Some(frames);
            }
            Self::LogLevel => {
                if !is_log_filter(raw) {
                    return Err(self.invalid(
                        "Value must be a log filter such as error, warn, info, debug or trace",
                    ));
                }
                config.log_level = Some(raw.to_string());
            }
        }
        Ok(())
    }

    /// Current value in `config`, if set
    pub fn read(&self, config: &AppConfig) -> Option<String> {
        match self {
            Self::UsageExitCode => config.usage_exit_code.map(|c| c.to_string()),
            Self::BufferFrames => config.buffer_frames.map(|f| f.to_string()),
            Self::LogLevel => config.log_level.clone(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::ValidationError {
                key: s.to_string(),
                message: format!(
                    "Unknown key. Valid keys: {}",
                    Self::ALL.map(|key| key.as_str()).join(", ")
                ),
            })
    }
}

/// Comma-separated `level` or `target=level` directives
fn is_log_filter(value: &str) -> bool {
    let is_level = |level: &str| LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str());
    let is_target = |target: &str| {
        !target.is_empty()
            && target
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
    };

    !value.is_empty()
        && value.split(',').all(|directive| match directive.trim().split_once('=') {
            Some((target, level)) => is_target(target.trim()) && is_level(level.trim()),
            None => is_level(directive.trim()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_by_name() {
        for key in ConfigKey::ALL {
            assert_eq!(key.as_str().parse::<ConfigKey>().unwrap(), key);
        }
    }

    #[test]
    fn unknown_key_lists_valid_ones() {
        let err = "api_key".parse::<ConfigKey>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("api_key"));
        assert!(msg.contains("usage_exit_code, buffer_frames, log_level"));
    }

    #[test]
    fn usage_exit_code_range() {
        let mut config = AppConfig::empty();
        ConfigKey::UsageExitCode.apply(&mut config, "64").unwrap();
        assert_eq!(config.usage_exit_code, Some(64));

        assert!(ConfigKey::UsageExitCode.apply(&mut config, "256").is_err());
        assert!(ConfigKey::UsageExitCode.apply(&mut config, "-1").is_err());
        assert_eq!(config.usage_exit_code, Some(64));
    }

    #[test]
    fn buffer_frames_must_be_positive() {
        let mut config = AppConfig::empty();
        assert!(ConfigKey::BufferFrames.apply(&mut config, "0").is_err());
        assert!(ConfigKey::BufferFrames.apply(&mut config, "many").is_err());
        assert!(config.buffer_frames.is_none());

        ConfigKey::BufferFrames.apply(&mut config, " 256 ").unwrap();
        assert_eq!(ConfigKey::BufferFrames.read(&config), Some("256".to_string()));
    }

    #[test]
    fn log_filters() {
        for value in ["error", "WARN", "info", "debug", "trace", "off", "atunc=debug,warn"] {
            assert!(is_log_filter(value), "{} should be accepted", value);
        }
        for value in ["", "loud", "atunc=loudest", "=debug", "warn,"] {
            assert!(!is_log_filter(value), "{} should be rejected", value);
        }
    }

    #[test]
    fn read_unset_is_none() {
        let config = AppConfig::empty();
        for key in ConfigKey::ALL {
            assert!(key.read(&config).is_none());
        }
    }
}
