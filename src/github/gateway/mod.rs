//! Gateways for GitHub Projects through Octocrab.
//!
//! This module provides trait-based gateways for communicating with the GitHub
//! API. The trait-based design enables mocking in tests while the Octocrab
//! implementations handle real HTTP requests.

mod client;
mod error_mapping;
mod graphql;
mod identity;
mod mutations;
mod projects;

pub use identity::OctocrabIdentityGateway;
pub use projects::OctocrabProjectsGateway;

use async_trait::async_trait;

use crate::github::error::TaskFlowError;
use crate::github::models::{
    CreateTaskParams, Project, ProjectData, Task, UpdateTaskFieldParams, UserIdentity,
};

/// Gateway that reads and mutates GitHub Projects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsGateway: Send + Sync {
    /// List the first page of projects visible to the token's user.
    async fn list_projects(&self) -> Result<Vec<Project>, TaskFlowError>;

    /// Load a project's fields and items in one request.
    async fn fetch_project_data(&self, project_id: &str) -> Result<ProjectData, TaskFlowError>;

    /// Create an issue (when a repository is given) or a draft issue.
    ///
    /// Repository issues are attached to the project when one is given. An
    /// attach failure surfaces as [`TaskFlowError::IssueNotAttached`].
    async fn create_issue(&self, params: &CreateTaskParams) -> Result<Task, TaskFlowError>;

    /// Set or clear a field on a project item.
    async fn update_task_field(&self, params: &UpdateTaskFieldParams) -> Result<(), TaskFlowError>;

    /// Close an issue by node id.
    async fn close_issue(&self, issue_id: &str) -> Result<(), TaskFlowError>;
}

/// Gateway that resolves who a token belongs to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Fetch the authenticated user's profile.
    async fn authenticated_user(&self) -> Result<UserIdentity, TaskFlowError>;
}

#[cfg(test)]
mod tests;
