//! Switching the working tree to a task's branch.

use crate::github::models::Task;

use super::branch::{branch_name_for, find_branch_for_task};
use super::error::GitOperationError;
use super::git_ops::GitOperations;

/// What [`checkout_task_branch`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchCheckout {
    /// The task's branch was already checked out; nothing changed.
    AlreadyOn(String),
    /// An existing branch for the task was checked out.
    Switched(String),
    /// A new branch was created from `HEAD` and checked out.
    Created(String),
}

impl BranchCheckout {
    /// Name of the branch now checked out.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::AlreadyOn(name) | Self::Switched(name) | Self::Created(name) => name,
        }
    }
}

/// Checks out the branch for `task`, creating it when none exists yet.
///
/// A dirty working tree is refused before any branch is touched, unless the
/// task's branch is already the current one.
///
/// # Errors
///
/// Returns [`GitOperationError::UncommittedChanges`] for a dirty tree, or
/// the underlying Git failure.
pub fn checkout_task_branch(
    git: &dyn GitOperations,
    task: &Task,
) -> Result<BranchCheckout, GitOperationError> {
    let branches = git.list_branches()?;
    let existing = find_branch_for_task(&branches, task.number).map(str::to_owned);
    let current = git.current_branch()?;

    if let Some(name) = existing.as_deref()
        && current.as_deref() == Some(name)
    {
        return Ok(BranchCheckout::AlreadyOn(name.to_owned()));
    }

    if git.has_uncommitted_changes()? {
        return Err(GitOperationError::UncommittedChanges);
    }

    match existing {
        Some(name) => {
            git.checkout_branch(&name)?;
            Ok(BranchCheckout::Switched(name))
        }
        None => {
            let name = branch_name_for(task);
            git.create_branch(&name)?;
            Ok(BranchCheckout::Created(name))
        }
    }
}
