use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::infra::runtime_config::RuntimeConfig;

const APP_DIR: &str = "moiphim-player";
const CONFIG_FILE: &str = "config.json";

/// Env overrides applied after the config file.
pub const ENV_CONTROLS_HIDE_MS: &str = "MOIPHIM_CONTROLS_HIDE_MS";
pub const ENV_LONG_PRESS_MS: &str = "MOIPHIM_LONG_PRESS_MS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rate restored at mount; the speed menu still only offers the
    /// allowed set.
    pub playback_rate: Option<f64>,
    pub player: RuntimeConfig,
}

impl Config {
    /// Load the user config, never failing: a missing or broken file
    /// leaves the defaults in place.
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => match Self::from_path(&path) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!(
                        "[Config] Ignoring {}: {err}",
                        path.display()
                    );
                    Self::default()
                }
            },
            _ => Self::default(),
        };

        if let Err(err) = config.apply_env() {
            log::warn!("[Config] {err}");
        }

        config
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Apply `MOIPHIM_*` overrides. Every variable is applied that parses;
    /// the first one that does not is reported.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let mut first_error = None;

        for (name, slot) in [
            (ENV_CONTROLS_HIDE_MS, &mut self.player.controls_hide_ms),
            (ENV_LONG_PRESS_MS, &mut self.player.long_press_ms),
        ] {
            let Some(raw) = lookup(name) else { continue };
            match raw.trim().parse::<u64>() {
                Ok(ms) => *slot = Some(ms),
                Err(_) => {
                    first_error.get_or_insert(ConfigError::InvalidValue {
                        name,
                        value: raw,
                    });
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
