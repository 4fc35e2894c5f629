//! Settings storage port

use std::path::Path;

use async_trait::async_trait;

use crate::domain::config::{AppConfig, ConfigKey};
use crate::domain::error::ConfigError;

/// Settings read from storage.
///
/// Entries that failed validation are left unset in `config` and reported in
/// `rejected`, so one bad value never hides the others.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub rejected: Vec<ConfigError>,
}

/// Port for the persisted settings file
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read stored settings. A missing file is an empty config; a file that
    /// cannot be read or is not a settings table at all is an error.
    async fn load(&self) -> Result<LoadedConfig, ConfigError>;

    /// Replace stored settings with `config`
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Write the defaults. Fails if settings are already stored.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Location of the settings, for display
    fn location(&self) -> &Path;

    /// Validate `raw` for `key`, store it, and return the updated settings.
    ///
    /// Nothing is written when validation fails.
    async fn update(&self, key: ConfigKey, raw: &str) -> Result<LoadedConfig, ConfigError> {
        let mut loaded = self.load().await?;
        key.apply(&mut loaded.config, raw)?;
        self.save(&loaded.config).await?;
        Ok(loaded)
    }
}
