use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::PathBuf,
    sync::Mutex,
};

use crate::{
    errors::{AppError, AppResult},
    models::domain::Role,
};

pub const USER_TYPE_KEY: &str = "userType";

/// Small persisted string map that survives restarts of the client.
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Reads the stored role, falling back to (and storing) `student` when the
/// key is absent or holds an unknown value.
pub fn restore_role(storage: &dyn LocalStorage) -> AppResult<Role> {
    match storage.get(USER_TYPE_KEY).map(|v| v.parse::<Role>()) {
        Some(Ok(role)) => Ok(role),
        Some(Err(err)) => {
            log::warn!("Ignoring stored role: {}", err);
            storage.set(USER_TYPE_KEY, Role::Student.as_str())?;
            Ok(Role::Student)
        }
        None => {
            storage.set(USER_TYPE_KEY, Role::Student.as_str())?;
            Ok(Role::Student)
        }
    }
}

pub fn persist_role(storage: &dyn LocalStorage, role: Role) -> AppResult<()> {
    storage.set(USER_TYPE_KEY, role.as_str())
}

pub fn clear_role(storage: &dyn LocalStorage) -> AppResult<()> {
    storage.remove(USER_TYPE_KEY)
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // a poisoned map is still a valid map
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries().remove(key);
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change.
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_map(&self) -> AppResult<HashMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::other(format!("Corrupt storage file {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(AppError::other(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(map)
            .map_err(|e| AppError::other(format!("Failed to encode storage: {}", e)))?;
        fs::write(&self.path, raw).map_err(|e| {
            AppError::other(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }

    fn modify(&self, f: impl FnOnce(&mut HashMap<String, String>)) -> AppResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.read_map()?;
        f(&mut map);
        self.write_map(&map)
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match self.read_map() {
            Ok(map) => map.get(key).cloned(),
            Err(err) => {
                log::warn!("{}", err);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.modify(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.modify(|map| {
            map.remove(key);
        })
    }
}
