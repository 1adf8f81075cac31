//! Bearer token persistence.
//!
//! The token survives process restarts (disk store) and is cleared on
//! logout. Read failures degrade to "no token" so a corrupt or missing
//! file never blocks startup.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Storage for the session bearer token.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

/// Token store backed by a single file under the user's home directory.
pub struct DiskTokenStore {
    path: PathBuf,
}

impl DiskTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default token path: ~/.rezeptbuch/token
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".rezeptbuch").join("token"))
            .unwrap_or_else(|| PathBuf::from("data/token"))
    }
}

impl Default for DiskTokenStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl TokenStore for DiskTokenStore {
    fn get(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn set(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "failed to create token directory");
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, token) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist token");
        }
    }

    fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove token");
            }
        }
    }
}

/// In-memory token store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn set(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskTokenStore::new(dir.path().join("token"));

        assert_eq!(store.get(), None);

        store.set("abc123");
        assert_eq!(store.get(), Some("abc123".to_string()));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_disk_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");

        DiskTokenStore::new(path.clone()).set("persisted");

        let reopened = DiskTokenStore::new(path);
        assert_eq!(reopened.get(), Some("persisted".to_string()));
    }

    #[test]
    fn test_disk_store_empty_file_is_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();

        assert_eq!(DiskTokenStore::new(path).get(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::with_token("t");
        assert_eq!(store.get(), Some("t".to_string()));
        store.clear();
        assert_eq!(store.get(), None);
    }
}
