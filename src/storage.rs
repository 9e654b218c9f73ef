// storage.rs
// JSON key/value store, one document per key on disk. Read and parse
// failures are logged and treated as absent, never surfaced to callers.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Reads a key and decodes it as JSON; absent or invalid values are
    /// `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return None,
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Error reading stored key \"{}\": {}", key, e);
                None
            }
        }
    }

    /// Stores a value as JSON. Write failures are logged and swallowed.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            tracing::error!("Error creating storage directory: {}", e);
            return;
        }

        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!("Error encoding value for key \"{}\": {}", key, e);
                return;
            }
        };

        if let Err(e) = std::fs::write(self.path_for(key), encoded) {
            tracing::error!("Error writing stored key \"{}\": {}", key, e);
        }
    }

    /// Removes a key; removing an absent key is a no-op.
    pub fn remove(&self, key: &str) {
        if let Err(e) = std::fs::remove_file(self.path_for(key)) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::error!("Error removing stored key \"{}\": {}", key, e);
            }
        }
    }

    /// Removes every stored document.
    pub fn clear(&self) {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Err(e) = std::fs::remove_file(&path) {
                    tracing::error!("Error clearing stored file {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Probes whether the backing directory is writable.
    pub fn is_available(&self) -> bool {
        let probe = "__storage_test__";
        if std::fs::create_dir_all(&self.dir).is_err() {
            return false;
        }
        if std::fs::write(self.path_for(probe), "test").is_err() {
            return false;
        }
        self.remove(probe);
        true
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static STORE_COUNTER: AtomicU64 = AtomicU64::new(0);

    pub(crate) fn temp_store(label: &str) -> JsonStore {
        let unique = STORE_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "planner-store-{}-{}-{}",
            label,
            std::process::id(),
            unique
        ));
        JsonStore::new(dir)
    }

    #[test]
    fn test_set_get_round_trip() {
        let store = temp_store("roundtrip");
        store.set("game", &"crystal".to_string());

        assert_eq!(store.get::<String>("game"), Some("crystal".to_string()));
        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = temp_store("missing");
        assert_eq!(store.get::<String>("nothing"), None);
    }

    #[test]
    fn test_get_malformed_is_none() {
        let store = temp_store("malformed");
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.dir().join("broken.json"), "{not json").unwrap();

        assert_eq!(store.get::<String>("broken"), None);
        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_remove_and_clear() {
        let store = temp_store("remove");
        store.set("one", &1u32);
        store.set("two", &2u32);

        store.remove("one");
        assert_eq!(store.get::<u32>("one"), None);
        assert_eq!(store.get::<u32>("two"), Some(2));

        // Removing an absent key is a no-op
        store.remove("one");

        store.clear();
        assert_eq!(store.get::<u32>("two"), None);
        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_is_available() {
        let store = temp_store("available");
        assert!(store.is_available());
        let _ = std::fs::remove_dir_all(store.dir());
    }
}
