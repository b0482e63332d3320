//! Git2-based implementation of `GitOperations`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use git2::build::CheckoutBuilder;
use git2::{BranchType, ErrorCode, Repository, StatusOptions};

use super::GitOperations;
use crate::local::error::GitOperationError;

/// Git2-based implementation of `GitOperations`.
///
/// Uses a `Mutex` to wrap the `Repository` because `git2::Repository` is not
/// `Sync`. This allows the implementation to be used in async contexts.
pub struct Git2Operations {
    repo: Mutex<Repository>,
}

impl std::fmt::Debug for Git2Operations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git2Operations")
            .field("repo", &"<git2::Repository>")
            .finish()
    }
}

impl Git2Operations {
    /// Helper to construct `Git2Operations` from a `Repository` result.
    fn from_repo_result(
        result: Result<Repository, git2::Error>,
    ) -> Result<Self, GitOperationError> {
        let repo = result.map_err(|e| GitOperationError::RepositoryNotAvailable {
            message: e.message().to_owned(),
        })?;
        Ok(Self {
            repo: Mutex::new(repo),
        })
    }

    /// Opens a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(repo_path: &Path) -> Result<Self, GitOperationError> {
        Self::from_repo_result(Repository::open(repo_path))
    }

    /// Discovers and opens a repository containing the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if no Git repository is found.
    pub fn discover(start_path: &Path) -> Result<Self, GitOperationError> {
        Self::from_repo_result(Repository::discover(start_path))
    }

    /// Creates a new instance wrapping an existing repository.
    #[must_use]
    #[expect(
        clippy::missing_const_for_fn,
        reason = "Mutex::new is not const-stable"
    )]
    pub fn from_repository(repo: Repository) -> Self {
        Self {
            repo: Mutex::new(repo),
        }
    }

    #[expect(
        clippy::expect_used,
        reason = "Mutex poisoning is an unrecoverable error"
    )]
    fn repo(&self) -> MutexGuard<'_, Repository> {
        self.repo.lock().expect("Git repository mutex poisoned")
    }
}

fn checkout(repo: &Repository, name: &str) -> Result<(), GitOperationError> {
    let refname = format!("refs/heads/{name}");
    let target = repo
        .revparse_single(&refname)
        .map_err(|_| GitOperationError::BranchNotFound {
            name: name.to_owned(),
        })?;
    repo.checkout_tree(&target, Some(CheckoutBuilder::new().safe()))?;
    repo.set_head(&refname)?;
    Ok(())
}

impl GitOperations for Git2Operations {
    fn create_branch(&self, name: &str) -> Result<(), GitOperationError> {
        let repo = self.repo();
        if repo.find_branch(name, BranchType::Local).is_ok() {
            return Err(GitOperationError::BranchExists {
                name: name.to_owned(),
            });
        }

        let head = repo.head()?.peel_to_commit()?;
        let mut branch = repo.branch(name, &head, false)?;
        tracing::debug!("created branch {name} at {}", head.id());

        // Roll back the branch when it cannot be checked out.
        if let Err(error) = checkout(&repo, name) {
            if let Err(cleanup) = branch.delete() {
                tracing::warn!("could not remove branch {name} after failed checkout: {cleanup}");
            }
            return Err(error);
        }
        Ok(())
    }

    fn checkout_branch(&self, name: &str) -> Result<(), GitOperationError> {
        checkout(&self.repo(), name)
    }

    fn list_branches(&self) -> Result<Vec<String>, GitOperationError> {
        let repo = self.repo();
        let mut names = Vec::new();
        for entry in repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                names.push(name.to_owned());
            }
        }
        Ok(names)
    }

    fn current_branch(&self) -> Result<Option<String>, GitOperationError> {
        let repo = self.repo();
        let head = match repo.head() {
            Ok(head) => head,
            Err(error) if error.code() == ErrorCode::UnbornBranch => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        if !head.is_branch() {
            return Ok(None);
        }
        Ok(head.shorthand().map(str::to_owned))
    }

    fn has_uncommitted_changes(&self) -> Result<bool, GitOperationError> {
        let repo = self.repo();
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);
        let statuses = repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }
}
