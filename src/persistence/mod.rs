//! Key/value persistence for settings and high scores
//!
//! Values are JSON strings. Browser builds use LocalStorage, native builds
//! write one `<key>.json` file per key into a data directory.

use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use thiserror::Error;

/// Environment variable naming the native data directory
pub const DATA_DIR_ENV: &str = "SEAHORSE_DATA_DIR";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode or decode stored value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Something that can hold small string blobs by key
pub trait Store {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Load and decode a JSON value; missing or corrupt entries fall back to default
pub fn load_json_or_default<T, S>(store: &S, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
    S: Store + ?Sized,
{
    match store.load(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Ignoring corrupt '{}': {}", key, e);
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Could not read '{}': {}", key, e);
            T::default()
        }
    }
}

/// Encode and store a JSON value
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: serde::Serialize,
    S: Store + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.save(key, &json)
}

/// In-memory store for tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key inside a directory
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$SEAHORSE_DATA_DIR`, or the current directory
    pub fn from_env() -> Self {
        let dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Store for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        // Write-then-rename so a crash never leaves a half-written file
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage is not accessible".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl Store for LocalStorageStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StoreError::Unavailable(format!("reading '{key}' was refused")))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StoreError::Unavailable(format!("writing '{key}' was refused")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", "42").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("42"));
    }

    #[test]
    fn test_corrupt_value_falls_back() {
        let mut store = MemoryStore::new();
        store.save("n", "{not json").unwrap();
        let n: u32 = load_json_or_default(&store, "n");
        assert_eq!(n, 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("seahorse-store-{}", std::process::id()));
        let mut store = FileStore::new(&dir);
        assert_eq!(store.load("missing").unwrap(), None);

        save_json(&mut store, "numbers", &vec![1, 2, 3]).unwrap();
        let back: Vec<i32> = load_json_or_default(&store, "numbers");
        assert_eq!(back, vec![1, 2, 3]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
