//! Local Git workflow for tasks.
//!
//! This module names branches after tasks, finds the branch already created
//! for a task, and creates or checks out branches in the local repository.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use taskflow::local::{Git2Operations, GitOperations, find_branch_for_task};
//!
//! let ops = Git2Operations::discover(Path::new("."))?;
//! let branches = ops.list_branches()?;
//! if let Some(branch) = find_branch_for_task(&branches, 42) {
//!     ops.checkout_branch(branch)?;
//! }
//! # Ok::<(), taskflow::local::GitOperationError>(())
//! ```

mod branch;
mod error;
mod git_ops;
mod workflow;

pub use branch::{BranchKind, branch_name_for, find_branch_for_task, slugify};
pub use error::GitOperationError;
pub use git_ops::{Git2Operations, GitOperations, has_repository};
pub use workflow::{BranchCheckout, checkout_task_branch};

#[cfg(test)]
pub use git_ops::MockGitOperations;
