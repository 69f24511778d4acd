use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    domain::DEFAULT_CATEGORIES,
    errors::{ExpenseError, Result},
    settings::USER_SETTINGS_KEY,
    utils::{paths, persistence},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_settings_file")]
    pub settings_file: String,
    #[serde(default = "Config::default_user_key")]
    pub user_key: String,
    #[serde(default)]
    pub plain_output: bool,
    #[serde(default = "Config::default_category")]
    pub default_category: String,
}

impl Config {
    fn default_settings_file() -> String {
        "settings.json".into()
    }

    fn default_user_key() -> String {
        USER_SETTINGS_KEY.into()
    }

    fn default_category() -> String {
        DEFAULT_CATEGORIES[0].into()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings_file: Self::default_settings_file(),
            user_key: Self::default_user_key(),
            plain_output: false,
            default_category: Self::default_category(),
        }
    }
}

/// Loads and saves [`Config`] inside the application data directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        let config_dir = paths::config_dir_in(&base);
        fs::create_dir_all(&config_dir)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| ExpenseError::Config(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ExpenseError::Config(err.to_string()))?;
        persistence::replace_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves the settings store file named by `config` inside the data directory.
    pub fn settings_path(&self, config: &Config) -> PathBuf {
        self.base.join(&config.settings_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.user_key, USER_SETTINGS_KEY);
        assert_eq!(config.default_category, "Personal");
        assert!(!config.plain_output);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "plain_output": true }"#).unwrap();

        let config = manager.load().unwrap();
        assert!(config.plain_output);
        assert_eq!(config.settings_file, "settings.json");
        assert_eq!(
            manager.settings_path(&config),
            dir.path().join("settings.json")
        );
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            user_key: "Profile".into(),
            default_category: "Business".into(),
            ..Config::default()
        };
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.user_key, "Profile");
        assert_eq!(loaded.default_category, "Business");
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{").unwrap();
        assert!(matches!(manager.load(), Err(ExpenseError::Config(_))));
    }
}
