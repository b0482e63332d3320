//! JSON file backed credential store.

use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use super::{AccountsStorage, CredentialStore};
use crate::github::error::TaskFlowError;

/// Stores accounts as pretty-printed JSON in a single file.
///
/// A missing file, or one that no longer parses, reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: Utf8PathBuf,
}

impl FileCredentialStore {
    /// Creates a store backed by `path`; the file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn split_path(&self) -> Result<(&Utf8Path, &str), TaskFlowError> {
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = self.path.file_name().ok_or_else(|| TaskFlowError::Io {
            message: format!("invalid accounts path '{}': no file name", self.path),
        })?;
        Ok((parent, file_name))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<AccountsStorage, TaskFlowError> {
        let (parent, file_name) = self.split_path()?;
        let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
            Ok(dir) => dir,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Ok(AccountsStorage::default());
            }
            Err(error) => {
                return Err(TaskFlowError::Io {
                    message: format!("failed to open accounts directory '{parent}': {error}"),
                });
            }
        };

        let content = match dir.read_to_string(file_name) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Ok(AccountsStorage::default());
            }
            Err(error) => {
                return Err(TaskFlowError::Io {
                    message: format!("failed to read accounts file '{}': {error}", self.path),
                });
            }
        };

        Ok(serde_json::from_str(&content).unwrap_or_else(|error| {
            tracing::warn!(
                "ignoring unreadable accounts file '{}': {error}",
                self.path
            );
            AccountsStorage::default()
        }))
    }

    fn store(&self, storage: &AccountsStorage) -> Result<(), TaskFlowError> {
        let (parent, file_name) = self.split_path()?;
        Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(|error| {
            TaskFlowError::Io {
                message: format!("failed to create accounts directory '{parent}': {error}"),
            }
        })?;
        let dir =
            Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| TaskFlowError::Io {
                message: format!("failed to open accounts directory '{parent}': {error}"),
            })?;

        let json = serde_json::to_string_pretty(storage).map_err(|error| TaskFlowError::Io {
            message: format!("failed to serialise accounts: {error}"),
        })?;
        dir.write(file_name, json).map_err(|error| TaskFlowError::Io {
            message: format!("failed to write accounts file '{}': {error}", self.path),
        })
    }
}
