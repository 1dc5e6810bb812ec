//! Best-effort JSON persistence for the player record, quest list and
//! login flag.
//!
//! Backends implement [`KeyValueStore`] and report failures as `io::Error`.
//! [`PersistenceGateway`] sits on top and never lets a failure reach its
//! caller: writes are logged and dropped, unreadable records load as absent.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::warn;

const DATA_DIR_NAME: &str = ".shadow-system";
const RECORD_EXTENSION: &str = "json";

/// Fixed keys for the three persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    User,
    Quests,
    Auth,
}

impl StorageKey {
    pub fn all() -> [StorageKey; 3] {
        [StorageKey::User, StorageKey::Quests, StorageKey::Auth]
    }

    /// Key under which the record is stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::User => "SHADOW_SYSTEM_USER",
            StorageKey::Quests => "SHADOW_SYSTEM_QUESTS",
            StorageKey::Auth => "SHADOW_SYSTEM_AUTH",
        }
    }
}

/// Raw string-keyed storage.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
    /// Erases the records for every [`StorageKey`].
    fn clear(&mut self) -> io::Result<()>;
}

/// Get the ~/.shadow-system/ directory path, creating it if needed.
pub fn default_data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(DATA_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// One JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens (and creates if missing) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Opens the store in the default ~/.shadow-system/ directory.
    pub fn open_default() -> io::Result<Self> {
        Self::open(default_data_dir()?)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, RECORD_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }

    fn clear(&mut self) -> io::Result<()> {
        for key in StorageKey::all() {
            match fs::remove_file(self.path_for(key.as_str())) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// In-process store; contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// JSON (de)serialization over a [`KeyValueStore`] that swallows failures.
#[derive(Debug)]
pub struct PersistenceGateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saves a value as pretty-printed JSON. Failures are logged only.
    pub fn save<T: Serialize>(&mut self, key: StorageKey, value: &T) {
        let json = match serde_json::to_string_pretty(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "failed to serialize record");
                return;
            }
        };
        if let Err(e) = self.store.write(key.as_str(), &json) {
            warn!(key = key.as_str(), error = %e, "failed to write record");
        }
    }

    /// Loads a value, returning `None` if it is missing, unreadable or
    /// does not parse.
    pub fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let json = match self.store.read(key.as_str()) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "failed to read record");
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "discarding malformed record");
                None
            }
        }
    }

    pub fn set_flag(&mut self, key: StorageKey, value: bool) {
        self.save(key, &value);
    }

    /// Reads a boolean flag, defaulting to false.
    pub fn get_flag(&self, key: StorageKey) -> bool {
        self.load(key).unwrap_or(false)
    }

    /// Erases all persisted state. Failures are logged only.
    pub fn clear(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear persisted state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn unique_test_dir() -> PathBuf {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "shadow-system-persistence-{}-{}",
            std::process::id(),
            test_id
        ))
    }

    /// Store whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn read(&self, _key: &str) -> io::Result<Option<String>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn write(&mut self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn clear(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        let keys = StorageKey::all();
        assert_eq!(keys[0].as_str(), "SHADOW_SYSTEM_USER");
        assert_eq!(keys[1].as_str(), "SHADOW_SYSTEM_QUESTS");
        assert_eq!(keys[2].as_str(), "SHADOW_SYSTEM_AUTH");
    }

    #[test]
    fn test_load_missing_returns_none() {
        let gateway = PersistenceGateway::new(MemoryStore::new());
        let loaded: Option<Vec<String>> = gateway.load(StorageKey::Quests);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_malformed_returns_none() {
        let mut store = MemoryStore::new();
        store.write(StorageKey::User.as_str(), "{ not json").unwrap();
        let gateway = PersistenceGateway::new(store);
        let loaded: Option<Vec<String>> = gateway.load(StorageKey::User);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_flag_defaults_to_false() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        assert!(!gateway.get_flag(StorageKey::Auth));
        gateway.set_flag(StorageKey::Auth, true);
        assert!(gateway.get_flag(StorageKey::Auth));
        gateway.set_flag(StorageKey::Auth, false);
        assert!(!gateway.get_flag(StorageKey::Auth));
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut gateway = PersistenceGateway::new(BrokenStore);
        gateway.save(StorageKey::User, &vec![1, 2, 3]);
        gateway.set_flag(StorageKey::Auth, true);
        gateway.clear();

        let loaded: Option<Vec<u32>> = gateway.load(StorageKey::User);
        assert!(loaded.is_none());
        assert!(!gateway.get_flag(StorageKey::Auth));
    }

    #[test]
    fn test_clear_empties_memory_store() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        gateway.save(StorageKey::Quests, &vec!["a".to_string()]);
        gateway.set_flag(StorageKey::Auth, true);
        assert_eq!(gateway.store().len(), 2);

        gateway.clear();
        assert!(gateway.store().is_empty());
    }

    #[test]
    fn test_json_file_store_persists_across_instances() {
        let dir = unique_test_dir();
        let data = vec!["hello".to_string(), "world".to_string()];

        let mut gateway = PersistenceGateway::new(JsonFileStore::open(&dir).unwrap());
        gateway.save(StorageKey::Quests, &data);
        assert!(dir.join("SHADOW_SYSTEM_QUESTS.json").exists());

        let reopened = PersistenceGateway::new(JsonFileStore::open(&dir).unwrap());
        let loaded: Option<Vec<String>> = reopened.load(StorageKey::Quests);
        assert_eq!(loaded, Some(data));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_json_file_store_clear_removes_records() {
        let dir = unique_test_dir();
        let mut store = JsonFileStore::open(&dir).unwrap();
        store.write("SHADOW_SYSTEM_USER", "{}").unwrap();
        store.write("SHADOW_SYSTEM_AUTH", "true").unwrap();

        store.clear().unwrap();
        assert_eq!(store.read("SHADOW_SYSTEM_USER").unwrap(), None);
        assert_eq!(store.read("SHADOW_SYSTEM_AUTH").unwrap(), None);
        assert!(dir.exists(), "clear keeps the data directory");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_json_file_store_clear_leaves_other_files() {
        let dir = unique_test_dir();
        let mut store = JsonFileStore::open(&dir).unwrap();
        store.write("SHADOW_SYSTEM_QUESTS", "[]").unwrap();
        fs::write(dir.join("package.json"), "{}").unwrap();
        fs::write(dir.join("notes.txt"), "keep me").unwrap();

        store.clear().unwrap();
        assert_eq!(store.read("SHADOW_SYSTEM_QUESTS").unwrap(), None);
        assert!(dir.join("package.json").exists());
        assert!(dir.join("notes.txt").exists());

        fs::remove_dir_all(&dir).ok();
    }
}
