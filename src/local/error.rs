//! Error types for local Git operations.

use thiserror::Error;

/// Errors that may occur while working with the local repository.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GitOperationError {
    /// No repository could be opened at or above the given path.
    #[error("no Git repository available: {message}")]
    RepositoryNotAvailable {
        /// Error detail from the git2 library.
        message: String,
    },

    /// A local branch with this name already exists.
    #[error("branch '{name}' already exists")]
    BranchExists {
        /// Name of the existing branch.
        name: String,
    },

    /// No local branch with this name exists.
    #[error("branch '{name}' not found")]
    BranchNotFound {
        /// Name of the missing branch.
        name: String,
    },

    /// The working tree or index has changes that a branch switch could
    /// overwrite.
    #[error("working tree has uncommitted changes; commit or stash them first")]
    UncommittedChanges,

    /// Git operation failed.
    #[error("git error: {message}")]
    Git {
        /// Error detail from the git2 library.
        message: String,
    },
}

impl From<git2::Error> for GitOperationError {
    fn from(error: git2::Error) -> Self {
        Self::Git {
            message: error.message().to_owned(),
        }
    }
}
