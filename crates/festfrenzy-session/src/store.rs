//! Credential storage: a single named slot holding the bearer token.
//!
//! There is exactly one credential per store at a time. Signing in
//! overwrites it; signing out or any authentication failure clears it.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use festfrenzy_protocol::Credential;

use crate::SessionError;

/// Name of the slot the bearer token lives in.
pub const TOKEN_SLOT: &str = "festfrenzy_token";

/// Somewhere to keep the current bearer token.
///
/// Access is synchronous: reads and writes are tiny and happen only at
/// page mount, sign-in and sign-out.
pub trait CredentialStore: Send + Sync + 'static {
    /// Returns the stored credential, if any.
    fn load(&self) -> Result<Option<Credential>, SessionError>;

    /// Replaces the stored credential.
    fn save(&self, credential: &Credential) -> Result<(), SessionError>;

    /// Removes the stored credential. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<(), SessionError>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// A store that lives only as long as the process.
///
/// Used by tests to inject a fake session, and by embedders that manage
/// persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out signed in with `credential`.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<Credential>, SessionError> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, credential: &Credential) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// A store that keeps the slot as a file named [`TOKEN_SLOT`] inside a
/// state directory, so a session survives between CLI invocations.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Uses `dir/festfrenzy_token`. The directory is created on first save.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_SLOT),
        }
    }

    /// Full path of the slot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileStore {
    fn load(&self) -> Result<Option<Credential>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| Credential::new(token)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.storage_error(e)),
        }
    }

    fn save(&self, credential: &Credential) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.storage_error(e))?;
        }
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(|e| self.storage_error(e))?;
        // `mode` only applies on creation; tighten a file left by an older save.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| self.storage_error(e))?;
        }
        file.write_all(credential.expose().as_bytes())
            .map_err(|e| self.storage_error(e))?;
        tracing::debug!(path = %self.path.display(), "credential saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "credential cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_save_load_clear() {
        let store = MemoryStore::new();
        assert!(store.load().expect("load").is_none());

        store.save(&Credential::new("abc")).expect("save");
        assert_eq!(store.load().expect("load"), Some(Credential::new("abc")));

        store.clear().expect("clear");
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn test_memory_store_save_overwrites_single_slot() {
        let store = MemoryStore::with_credential(Credential::new("old"));

        store.save(&Credential::new("new")).expect("save");

        assert_eq!(store.load().expect("load"), Some(Credential::new("new")));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());

        assert!(store.load().expect("load").is_none());
        store.clear().expect("clearing an empty slot is fine");
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("state");

        FileStore::new(&nested).save(&Credential::new("tok-9")).expect("save");
        let reopened = FileStore::new(&nested);

        assert_eq!(reopened.path(), nested.join("festfrenzy_token"));
        assert_eq!(reopened.load().expect("load"), Some(Credential::new("tok-9")));
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        store.save(&Credential::new("tok")).expect("save");

        store.clear().expect("clear");

        assert!(!store.path().exists());
        assert!(store.load().expect("load").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_save_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        fs::write(store.path(), "old").expect("write");
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).expect("chmod");

        store.save(&Credential::new("tok-secret")).expect("save");

        let mode = fs::metadata(store.path()).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().expect("load"), Some(Credential::new("tok-secret")));
    }

    #[test]
    fn test_file_store_blank_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        fs::write(store.path(), "  \n").expect("write");

        assert!(store.load().expect("load").is_none());
    }
}
