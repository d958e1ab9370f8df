//! Persisted key-value storage backing the session store — the console's
//! stand-in for browser local storage.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

pub trait SessionStorage: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
    fn clear(&mut self);
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    map: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}

/// Write-through storage persisted as a flat JSON object. An unreadable or
/// corrupt file is treated as logged-out rather than an error, matching how
/// a cleared browser store behaves.
pub struct FileStorage {
    path: PathBuf,
    map: HashMap<String, String>,
}

impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let map = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("ignoring unreadable session file {}: {e}", path.display());
                HashMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e),
        };
        Ok(Self { path, map })
    }

    fn flush(&self) {
        match serde_json::to_string_pretty(&self.map) {
            Ok(raw) => {
                if let Err(e) = fs::write(&self.path, raw) {
                    warn!("failed to write session file {}: {e}", self.path.display());
                }
            }
            Err(e) => warn!("failed to encode session file: {e}"),
        }
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
        self.flush();
    }

    fn clear(&mut self) {
        self.map.clear();
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn scratch_path() -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        env::temp_dir().join(format!("parcel-console-kv-{}-{n}.json", std::process::id()))
    }

    #[test]
    fn file_storage_round_trips_across_reopen() {
        let path = scratch_path();
        {
            let mut storage = FileStorage::open(&path).unwrap();
            storage.set("jwtToken", "t1");
            storage.set("role", "ADMIN");
            storage.remove("missing");
        }
        {
            let mut storage = FileStorage::open(&path).unwrap();
            assert_eq!(storage.get("jwtToken").as_deref(), Some("t1"));
            assert_eq!(storage.get("role").as_deref(), Some("ADMIN"));
            storage.clear();
        }
        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("jwtToken"), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let path = scratch_path();
        fs::write(&path, "not json").unwrap();
        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("jwtToken"), None);
        let _ = fs::remove_file(&path);
    }
}
