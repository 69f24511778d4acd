use std::collections::BTreeMap;

use serde_json::Value;

use super::SettingsStore;
use crate::errors::Result;

/// Settings that live only as long as the value itself.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, Value>,
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.remove(key))
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}
