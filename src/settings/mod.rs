//! Persistent key-value settings area and the encode/decode helpers used to
//! store the user object in it.
//!
//! Writing and reading are independent operations: [`save_encoded`] never
//! reads back what it wrote, and [`load_decoded`] makes no assumption about
//! who stored the value.

pub mod json_file;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::Result;

pub use json_file::JsonFileSettings;
pub use memory::MemorySettings;

/// Key under which the user object is stored by default.
pub const USER_SETTINGS_KEY: &str = "UserData";

/// Abstraction over key-value settings backends.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<&Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<Option<Value>>;
    fn keys(&self) -> Vec<String>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Encodes `value` as JSON and writes it under `key`.
pub fn try_save_encoded<S, T>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    S: SettingsStore + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_value(value)?;
    store.set(key, encoded)?;
    tracing::info!(key, "settings value stored");
    Ok(())
}

/// Best-effort variant of [`try_save_encoded`].
///
/// Failures are logged and discarded. Returns whether the write happened;
/// on an encode failure the store is left as it was.
pub fn save_encoded<S, T>(store: &mut S, key: &str, value: &T) -> bool
where
    S: SettingsStore + ?Sized,
    T: Serialize + ?Sized,
{
    match try_save_encoded(store, key, value) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(key, error = %err, "settings write skipped");
            false
        }
    }
}

/// Reads the value under `key` and decodes it. `Ok(None)` when nothing is stored.
pub fn load_decoded<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: SettingsStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key) {
        Some(value) => Ok(Some(T::deserialize(value)?)),
        None => Ok(None),
    }
}
