use std::{cell::RefCell, collections::BTreeMap, fs, path::Path};

use serde_json::Value;
use tracing::debug;

use crate::error::ConfigError;

// ── Global storage ────────────────────────────────────────────────────────────

/// Key/value store shared between installer stages.
///
/// Held behind an `Rc` by everyone who publishes into it; mutation goes
/// through `&self`.
#[derive(Debug, Default)]
pub struct GlobalStorage {
    data: RefCell<BTreeMap<String, Value>>,
}

impl GlobalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        debug!(%key, %value, "global storage insert");
        self.data.borrow_mut().insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.borrow().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.borrow().contains_key(key)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.data.borrow_mut().remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.data.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&*self.data.borrow())?)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(&*self.data.borrow())?)
    }

    /// Writes the store to `path`; the extension picks JSON or YAML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = match StorageFormat::from_path(path)? {
            StorageFormat::Json => self.to_json_string()?,
            StorageFormat::Yaml => self.to_yaml_string()?,
        };
        fs::write(path, text)?;
        debug!(path = %path.display(), keys = self.len(), "global storage saved");
        Ok(())
    }

    /// Merges a saved store into this one. Existing keys are overwritten.
    pub fn load(&self, path: &Path) -> Result<(), ConfigError> {
        StorageFormat::from_path(path)?;
        let map = crate::settings::load_file(path)?;
        let mut data = self.data.borrow_mut();
        for (k, v) in map {
            data.insert(k, v);
        }
        Ok(())
    }
}

/// On-disk representation of [`GlobalStorage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFormat {
    Json,
    Yaml,
}

impl StorageFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(StorageFormat::Json),
            Some("yaml") | Some("yml") => Ok(StorageFormat::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
