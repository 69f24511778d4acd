use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SettingsStore;
use crate::errors::{ExpenseError, Result};
use crate::utils::persistence;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    values: BTreeMap<String, Value>,
}

/// Settings backed by a single JSON file, rewritten atomically on every change.
#[derive(Debug, Clone)]
pub struct JsonFileSettings {
    path: PathBuf,
    document: SettingsDocument,
}

impl JsonFileSettings {
    /// Opens the settings file at `path`, starting empty when it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data).map_err(|err| {
                ExpenseError::Settings(format!("{} is not a settings file: {err}", path.display()))
            })?
        } else {
            SettingsDocument::default()
        };
        tracing::debug!(path = %path.display(), keys = document.values.len(), "settings opened");
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.document.updated_at
    }

    fn persist(&self, document: &SettingsDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        persistence::replace_atomic(&self.path, &json)
    }

    /// Writes `document` to disk first and only adopts it once that succeeded.
    fn commit(&mut self, mut document: SettingsDocument) -> Result<()> {
        document.updated_at = Some(Utc::now());
        self.persist(&document)?;
        self.document = document;
        Ok(())
    }
}

impl SettingsStore for JsonFileSettings {
    fn get(&self, key: &str) -> Option<&Value> {
        self.document.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut document = self.document.clone();
        document.values.insert(key.to_string(), value);
        self.commit(document)
    }

    fn remove(&mut self, key: &str) -> Result<Option<Value>> {
        if !self.document.values.contains_key(key) {
            return Ok(None);
        }
        let mut document = self.document.clone();
        let previous = document.values.remove(key);
        self.commit(document)?;
        Ok(previous)
    }

    fn keys(&self) -> Vec<String> {
        self.document.values.keys().cloned().collect()
    }
}
