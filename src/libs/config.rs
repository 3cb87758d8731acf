//! Application configuration.
//!
//! Settings live in a JSON file inside the platform data directory. Every
//! module is optional: without a `[gmail]` section the sync commands refuse
//! to run, without a `[sync]` section the watch command falls back to a
//! daily interval. The relational database target is deliberately NOT part
//! of this file — it comes from the `SPENT_DATABASE` environment variable
//! so that its absence can select the text store.

use crate::api::gmail::GmailConfig;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// A configurable module shown in the interactive setup.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Recurring inbox synchronization settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SyncConfig {
    /// Hours between inbox reconciliations in watch mode.
    pub interval_hours: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig { interval_hours: 24 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gmail: Option<GmailConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync: Option<SyncConfig>,
}

impl Config {
    /// Loads the configuration, returning defaults when no file exists yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive setup: pick modules, then prompt for each one with the
    /// current values as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            GmailConfig::module(),
            ConfigModule {
                key: "sync".to_string(),
                name: "Sync".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "gmail" => config.gmail = Some(GmailConfig::init(&config.gmail)?),
                "sync" => {
                    let default = config.sync.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleSync);
                    config.sync = Some(SyncConfig {
                        interval_hours: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt("Hours between inbox syncs")
                            .default(default.interval_hours)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
