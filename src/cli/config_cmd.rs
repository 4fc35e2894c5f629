//! Config command handler

use crate::application::ports::{ConfigStore, LoadedConfig};
use crate::domain::config::ConfigKey;
use crate::domain::error::ConfigError;

use super::args::ConfigAction;
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => {
            store.init().await?;
            presenter.success(&format!(
                "Config file created at: {}",
                store.location().display()
            ));
        }
        ConfigAction::Set { key, value } => {
            let key: ConfigKey = key.parse()?;
            let loaded = store.update(key, &value).await?;
            report_rejected(&loaded, presenter);
            presenter.success(&format!("{} = {}", key, value.trim()));
        }
        ConfigAction::Get { key } => {
            let key: ConfigKey = key.parse()?;
            let loaded = store.load().await?;
            report_rejected(&loaded, presenter);
            presenter.output(&display_value(&loaded, key));
        }
        ConfigAction::List => {
            let loaded = store.load().await?;
            report_rejected(&loaded, presenter);
            for key in ConfigKey::ALL {
                presenter.key_value(key.as_str(), &display_value(&loaded, key));
            }
        }
        ConfigAction::Path => presenter.output(&store.location().to_string_lossy()),
    }
    Ok(())
}

fn display_value(loaded: &LoadedConfig, key: ConfigKey) -> String {
    key.read(&loaded.config)
        .unwrap_or_else(|| NOT_SET.to_string())
}

/// Warn about stored entries that were ignored
pub fn report_rejected(loaded: &LoadedConfig, presenter: &Presenter) {
    for e in &loaded.rejected {
        presenter.warn(&format!("Ignoring config entry. {}", e));
    }
}
