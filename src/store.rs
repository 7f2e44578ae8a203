// store.rs
//
// Browser-local-storage analog: three independent JSON blobs under fixed
// string keys, merged against defaults on load, written whole on save.
// Writes are best-effort; a failed write only costs persistence across
// restarts, never in-memory state.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::*;

pub const CHECKLIST_KEY: &str = "tutorial_checklist_v3";
pub const CODE_CARDS_KEY: &str = "tutorial_code_cards_v1";
pub const CONFIG_KEY: &str = "tutorial_config_v1";

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// One `<key>.json` file per storage key under the data directory.
pub struct FsStorage {
    dir: PathBuf,
}

impl FsStorage {
    pub fn new(dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(dir).with_context(|| format!("cannot create data dir {dir:?}"))?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FsStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("cannot write {path:?}"))
    }
}

/// In-memory storage for tests and for running without a writable disk.
#[derive(Default)]
pub struct MemStorage {
    map: Mutex<HashMap<String, String>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        match self.map.lock() {
            Ok(mut map) => {
                map.insert(key.to_string(), value.to_string());
                Ok(())
            }
            Err(e) => anyhow::bail!("storage lock poisoned: {e}"),
        }
    }
}

/// Loads the blob under `key` and shallow-merges it over `defaults`:
/// decoded keys win, keys present only in the defaults are preserved.
/// Absence, bad JSON, a non-object payload, or a merge result that no
/// longer deserializes all fall back to the defaults unchanged.
pub fn load_merged<T>(store: &dyn Storage, key: &str, defaults: &T) -> T
where
    T: Clone + Serialize + DeserializeOwned,
{
    let Some(raw) = store.get(key) else {
        return defaults.clone();
    };

    let overrides = match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) => {
            warn!("Stored {key} is not a JSON object, using defaults");
            return defaults.clone();
        }
        Err(e) => {
            warn!("Cannot parse stored {key}: {e}");
            return defaults.clone();
        }
    };

    let mut merged = match serde_json::to_value(defaults) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => return defaults.clone(),
    };
    for (k, v) in overrides {
        if merged.contains_key(&k) {
            merged.insert(k, v);
        }
    }

    match serde_json::from_value(serde_json::Value::Object(merged)) {
        Ok(state) => state,
        Err(e) => {
            warn!("Merged {key} does not deserialize: {e}");
            defaults.clone()
        }
    }
}

/// Serializes `state` under `key`. Failures are logged and swallowed:
/// persistence is best-effort by design.
pub fn save_state<T: Serialize>(store: &dyn Storage, key: &str, state: &T) {
    let encoded = match serde_json::to_string(state) {
        Ok(s) => s,
        Err(e) => {
            error!("Cannot encode {key}: {e}");
            return;
        }
    };
    if let Err(e) = store.put(key, &encoded) {
        error!("Cannot save {key}: {e:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn defaults() -> BTreeMap<String, bool> {
        BTreeMap::from([
            ("install_ide".to_string(), false),
            ("breadboard".to_string(), false),
            ("dashboard".to_string(), false),
        ])
    }

    #[test]
    fn missing_key_returns_defaults() {
        let store = MemStorage::new();
        assert_eq!(load_merged(&store, CHECKLIST_KEY, &defaults()), defaults());
    }

    #[test]
    fn roundtrip_preserves_all_default_keys() {
        let store = MemStorage::new();
        let mut state = defaults();
        state.insert("breadboard".to_string(), true);

        save_state(&store, CHECKLIST_KEY, &state);
        let loaded: BTreeMap<String, bool> = load_merged(&store, CHECKLIST_KEY, &defaults());
        assert_eq!(loaded, state);
    }

    #[test]
    fn invalid_json_returns_exact_defaults() {
        let store = MemStorage::new();
        store.put(CHECKLIST_KEY, "{not json at all").unwrap();
        assert_eq!(load_merged(&store, CHECKLIST_KEY, &defaults()), defaults());
    }

    #[test]
    fn non_object_payload_returns_defaults() {
        let store = MemStorage::new();
        store.put(CHECKLIST_KEY, "[1, 2, 3]").unwrap();
        assert_eq!(load_merged(&store, CHECKLIST_KEY, &defaults()), defaults());
    }

    #[test]
    fn partial_blob_merges_over_defaults() {
        let store = MemStorage::new();
        store.put(CHECKLIST_KEY, r#"{"breadboard": true}"#).unwrap();

        let loaded: BTreeMap<String, bool> = load_merged(&store, CHECKLIST_KEY, &defaults());
        assert_eq!(loaded.get("breadboard"), Some(&true));
        assert_eq!(loaded.get("install_ide"), Some(&false));
        assert_eq!(loaded.get("dashboard"), Some(&false));
    }

    #[test]
    fn type_mismatch_falls_back_to_defaults() {
        let store = MemStorage::new();
        store.put(CHECKLIST_KEY, r#"{"breadboard": "yes"}"#).unwrap();
        assert_eq!(load_merged(&store, CHECKLIST_KEY, &defaults()), defaults());
    }

    #[test]
    fn keys_are_independent() {
        let store = MemStorage::new();
        save_state(&store, CHECKLIST_KEY, &defaults());
        assert!(store.get(CODE_CARDS_KEY).is_none());
        assert!(store.get(CONFIG_KEY).is_none());
    }
}

// EOF
