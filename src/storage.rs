//! Saved avatar profile.
//!
//! One JSON file in the platform data directory. Every failure is reported to
//! the caller, which logs it and carries on with an in-memory session.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use thiserror::Error;

use crate::portrait::AvatarProfile;

/// Directory name under the platform data directory.
pub const APP_DIR: &str = "cadet-mission";

/// File holding the saved profile.
pub const PROFILE_FILE: &str = "avatar.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no data directory available on this platform")]
    NoDataDir,

    #[error("storage I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("saved profile {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Where the profile lives. `path` is `None` when no data directory exists.
#[derive(Resource, Debug, Clone)]
pub struct ProfileStore {
    path: Option<PathBuf>,
}

impl ProfileStore {
    /// Store in `dir` (created on first save).
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: Some(dir.join(PROFILE_FILE)),
        }
    }

    /// Store in `override_dir`, or in the platform data directory.
    pub fn new(override_dir: Option<&Path>) -> Self {
        match override_dir {
            Some(dir) => Self::in_dir(dir),
            None => Self {
                path: dirs::data_dir().map(|dir| dir.join(APP_DIR).join(PROFILE_FILE)),
            },
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn require_path(&self) -> Result<&Path, StorageError> {
        self.path.as_deref().ok_or(StorageError::NoDataDir)
    }

    /// Read the saved profile, `Ok(None)` if nothing was saved.
    pub fn load(&self) -> Result<Option<AvatarProfile>, StorageError> {
        let path = self.require_path()?;
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StorageError::Json {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn save(&self, profile: &AvatarProfile) -> Result<(), StorageError> {
        let path = self.require_path()?;
        let io_err = |source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(profile).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    /// Remove the saved profile. Removing nothing is not an error.
    pub fn clear(&self) -> Result<(), StorageError> {
        let path = self.require_path()?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::cadet;

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::in_dir(&dir.path().join("nested"));

        assert!(store.load().unwrap().is_none());

        let profile = cadet("Martina");
        store.save(&profile).unwrap();
        assert_eq!(store.load().unwrap(), Some(profile));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::in_dir(dir.path());
        std::fs::write(dir.path().join(PROFILE_FILE), "{ not json").unwrap();

        assert!(matches!(store.load(), Err(StorageError::Json { .. })));
    }

    #[test]
    fn test_missing_data_dir() {
        let store = ProfileStore { path: None };
        assert!(matches!(store.load(), Err(StorageError::NoDataDir)));
        assert!(matches!(store.save(&cadet("X")), Err(StorageError::NoDataDir)));
    }
}
