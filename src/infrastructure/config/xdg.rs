//! TOML settings file under the XDG config directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use toml::{Table, Value};
use tracing::debug;

use crate::application::ports::{ConfigStore, LoadedConfig};
use crate::domain::config::{AppConfig, ConfigKey};
use crate::domain::error::ConfigError;

const APP_DIR: &str = "atunc";
const FILE_NAME: &str = "config.toml";

/// `$XDG_CONFIG_HOME/atunc/config.toml`, or the platform equivalent
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("~/.config"));
        Self::with_path(base.join(APP_DIR).join(FILE_NAME))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Check every entry of `content` on its own
    fn parse(content: &str) -> Result<LoadedConfig, ConfigError> {
        let table: Table = content
            .parse()
            .map_err(|e: toml::de::Error| ConfigError::ParseError(e.message().to_string()))?;

        let mut loaded = LoadedConfig::default();
        for (name, value) in &table {
            let outcome = name
                .parse::<ConfigKey>()
                .and_then(|key| key.apply(&mut loaded.config, &Self::raw_value(key, value)?));
            if let Err(e) = outcome {
                loaded.rejected.push(e);
            }
        }
        Ok(loaded)
    }

    /// Text form of a TOML value, if it has the type `key` is stored as
    fn raw_value(key: ConfigKey, value: &Value) -> Result<String, ConfigError> {
        match (key.is_numeric(), value) {
            (true, Value::Integer(n)) => Ok(n.to_string()),
            (false, Value::String(s)) => Ok(s.clone()),
            (numeric, other) => Err(ConfigError::ValidationError {
                key: key.to_string(),
                message: format!(
                    "Expected {}, found {}",
                    if numeric { "an integer" } else { "a string" },
                    other.type_str()
                ),
            }),
        }
    }

    fn render(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    async fn ensure_parent(&self) -> Result<(), ConfigError> {
        match self.path.parent() {
            Some(parent) => fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string())),
            None => Ok(()),
        }
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadedConfig::default()),
            Err(e) => return Err(ConfigError::ReadError(e.to_string())),
        };

        let loaded = Self::parse(&content)?;
        debug!(
            "Loaded {} ({} rejected entries)",
            self.path.display(),
            loaded.rejected.len()
        );
        Ok(loaded)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = Self::render(config)?;
        self.ensure_parent().await?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    async fn init(&self) -> Result<(), ConfigError> {
        let content = Self::render(&AppConfig::defaults())?;
        self.ensure_parent().await?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    ConfigError::AlreadyExists(self.path.display().to_string())
                }
                _ => ConfigError::WriteError(e.to_string()),
            })?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
