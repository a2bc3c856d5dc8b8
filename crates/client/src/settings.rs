//! Persisted client settings (the endpoint URL).

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use thiserror::Error;

/// Namespaced key of the endpoint URL.
pub const SCRIPT_URL_KEY: &str = "@dukascan_script_url";

/// Environment override for the settings directory.
pub const CONFIG_DIR_ENV: &str = "DUKASCAN_CONFIG_DIR";

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not resolve a configuration directory")]
    NoConfigDir,
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("settings lock poisoned")]
    Poisoned,
}

/// String key-value persistence.
///
/// The endpoint helpers are provided on top of the three primitives.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;
    fn remove(&self, key: &str) -> Result<(), SettingsError>;

    fn get_script_url(&self) -> Result<Option<String>, SettingsError> {
        self.get(SCRIPT_URL_KEY)
    }

    fn set_script_url(&self, url: &str) -> Result<(), SettingsError> {
        self.set(SCRIPT_URL_KEY, url)
    }

    /// Forget the stored endpoint.
    fn clear(&self) -> Result<(), SettingsError> {
        self.remove(SCRIPT_URL_KEY)
    }
}

/// Settings kept in a JSON object on disk.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    write_lock: Mutex<()>,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store as `settings.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SETTINGS_FILE))
    }

    /// Store under `$DUKASCAN_CONFIG_DIR` or the user's config directory.
    pub fn open_default() -> Result<Self, SettingsError> {
        Ok(Self::new(default_settings_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SettingsError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), SettingsError> {
        let _guard = self.write_lock.lock().map_err(|_| SettingsError::Poisoned)?;
        let mut values = self.load()?;
        change(&mut values);
        self.save(&values)
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|values| {
            values.remove(key);
        })
    }
}

/// Volatile settings for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script_url(url: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.write() {
            values.insert(SCRIPT_URL_KEY.to_string(), url.to_string());
        }
        store
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let values = self.values.read().map_err(|_| SettingsError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut values = self.values.write().map_err(|_| SettingsError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let mut values = self.values.write().map_err(|_| SettingsError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

fn default_settings_path() -> Result<PathBuf, SettingsError> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir).join(SETTINGS_FILE));
    }

    let mut dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .ok_or(SettingsError::NoConfigDir)?;
    dir.push("dukascan");
    dir.push(SETTINGS_FILE);
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("cfg").join("settings.json"));

        assert_eq!(store.get_script_url().unwrap(), None);
        store.set_script_url("https://example.com/exec").unwrap();

        let reopened = FileSettingsStore::new(store.path().to_path_buf());
        assert_eq!(
            reopened.get_script_url().unwrap().as_deref(),
            Some("https://example.com/exec")
        );

        reopened.clear().unwrap();
        assert_eq!(store.get_script_url().unwrap(), None);
    }

    #[test]
    fn url_lives_under_the_namespaced_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileSettingsStore::new(&path);
        store.set_script_url("https://a.example").unwrap();

        let raw: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw[SCRIPT_URL_KEY], "https://a.example");
    }

    #[test]
    fn clear_without_file_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::in_dir(dir.path());
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, b"[").unwrap();
        let store = FileSettingsStore::new(&path);
        assert!(matches!(store.get_script_url(), Err(SettingsError::Corrupt(_))));
    }

    #[test]
    fn in_memory_store_behaves_like_file_store() {
        let store = InMemorySettingsStore::with_script_url("https://x.example");
        assert_eq!(store.get_script_url().unwrap().as_deref(), Some("https://x.example"));
        store.clear().unwrap();
        assert_eq!(store.get_script_url().unwrap(), None);
    }
}
