//! Git operations for task branches.
//!
//! This module provides a trait-based abstraction for the branch operations
//! the task workflow needs, along with a git2-based implementation. The
//! trait enables dependency injection for testing without real repositories.

mod git2_impl;

use std::fmt::Debug;
use std::path::Path;

use super::error::GitOperationError;

pub use git2_impl::Git2Operations;

/// Trait defining the Git operations used by the task workflow.
#[cfg_attr(test, mockall::automock)]
pub trait GitOperations: Send + Sync + Debug {
    /// Creates a local branch at `HEAD` and checks it out.
    ///
    /// When the checkout fails the new branch is deleted again.
    ///
    /// # Errors
    ///
    /// Returns [`GitOperationError::BranchExists`] when the branch already
    /// exists, or [`GitOperationError::Git`] when `HEAD` has no commit.
    fn create_branch(&self, name: &str) -> Result<(), GitOperationError>;

    /// Checks out an existing local branch.
    ///
    /// # Errors
    ///
    /// Returns [`GitOperationError::BranchNotFound`] when no such branch
    /// exists.
    fn checkout_branch(&self, name: &str) -> Result<(), GitOperationError>;

    /// Lists local branch names.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch list cannot be read.
    fn list_branches(&self) -> Result<Vec<String>, GitOperationError>;

    /// Returns the checked-out branch, or `None` for a detached or unborn
    /// `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns an error if `HEAD` cannot be read.
    fn current_branch(&self) -> Result<Option<String>, GitOperationError>;

    /// Reports whether tracked files have staged or unstaged changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be computed.
    fn has_uncommitted_changes(&self) -> Result<bool, GitOperationError>;
}

/// Returns true when `path` is inside a Git repository.
#[must_use]
pub fn has_repository(path: &Path) -> bool {
    git2::Repository::discover(path).is_ok()
}
