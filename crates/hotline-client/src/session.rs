//! Persisted session.
//!
//! Exactly one JSON document on disk: the authenticated [`User`] plus the
//! moment it was saved. Loaded once at startup, written on login/register,
//! deleted on logout. There is no server-side revalidation; the only check on
//! load is a maximum age, after which the file is discarded and the user must
//! log in again.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hotline_shared::constants::{SESSION_FILE_NAME, SESSION_MAX_AGE_DAYS};
use hotline_shared::User;

/// Errors produced by the session store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the data directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The session file exists but is not valid JSON.
    #[error("Session file corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The client's belief about who is signed in.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Startup, before the store has been read.
    Loading,
    /// No persisted identity; show the auth screen.
    Absent,
    Present(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Present(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    user: User,
    saved_at: DateTime<Utc>,
}

/// File-backed store for the persisted session document.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/hotline/session.json`
    /// - macOS:   `~/Library/Application Support/com.hotline.hotline/session.json`
    /// - Windows: `{FOLDERID_RoamingAppData}\hotline\hotline\data\session.json`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "hotline", "hotline").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(Self::open_at(data_dir))
    }

    /// Store inside an explicit directory. Useful for tests and custom
    /// layouts; the directory must already exist.
    pub fn open_at(dir: &Path) -> Self {
        Self {
            path: dir.join(SESSION_FILE_NAME),
        }
    }

    /// Read the persisted session, enforcing the maximum age.
    ///
    /// A missing file, a corrupt file, or a session older than
    /// [`SESSION_MAX_AGE_DAYS`] all land in `None`; corrupt and expired files
    /// are removed so the next load is clean.
    pub fn load(&self) -> Option<User> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read session file");
                return None;
            }
        };

        let session: PersistedSession = match serde_json::from_slice(&bytes) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "session file corrupt, discarding");
                let _ = std::fs::remove_file(&self.path);
                return None;
            }
        };

        let age = Utc::now() - session.saved_at;
        if age > Duration::days(SESSION_MAX_AGE_DAYS) {
            tracing::info!(days = age.num_days(), "persisted session expired, discarding");
            let _ = std::fs::remove_file(&self.path);
            return None;
        }

        Some(session.user)
    }

    /// Persist `user` as the active identity.
    pub fn save(&self, user: &User) -> Result<()> {
        let session = PersistedSession {
            user: user.clone(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_vec_pretty(&session)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Remove the persisted identity. Idempotent.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotline_shared::UserId;

    fn test_user() -> User {
        User {
            id: UserId(1),
            email: "anna@example.com".into(),
            display_name: "Anna Petrova".into(),
            avatar_url: None,
            created_at: None,
        }
    }

    #[test]
    fn save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open_at(dir.path());

        assert!(store.load().is_none());

        store.save(&test_user()).unwrap();
        assert_eq!(store.load().unwrap().id, UserId(1));

        store.clear().unwrap();
        assert!(store.load().is_none());
        // clear is idempotent
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open_at(dir.path());

        std::fs::write(dir.path().join(SESSION_FILE_NAME), b"not json").unwrap();
        assert!(store.load().is_none());
        // the corrupt file was removed
        assert!(!dir.path().join(SESSION_FILE_NAME).exists());
    }

    #[test]
    fn expired_session_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open_at(dir.path());

        let stale = PersistedSession {
            user: test_user(),
            saved_at: Utc::now() - Duration::days(SESSION_MAX_AGE_DAYS + 1),
        };
        std::fs::write(
            dir.path().join(SESSION_FILE_NAME),
            serde_json::to_vec(&stale).unwrap(),
        )
        .unwrap();

        assert!(store.load().is_none());
        assert!(!dir.path().join(SESSION_FILE_NAME).exists());
    }

    #[test]
    fn fresh_session_survives_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open_at(dir.path());

        store.save(&test_user()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, test_user());
    }
}
