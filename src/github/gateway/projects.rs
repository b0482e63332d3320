//! Octocrab implementation of the projects gateway.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::json;

use crate::github::error::{Operation, TaskFlowError};
use crate::github::models::{CreateTaskParams, Project, ProjectData, Task, UpdateTaskFieldParams};
use crate::github::normalize::{normalize_project_data, normalize_project_summary};
use crate::github::queries::{PROJECT_DATA, VIEWER_PROJECTS};
use crate::github::token::{ApiBase, PersonalAccessToken};
use crate::github::wire::{ProjectNodeData, ViewerProjectsData};

use super::ProjectsGateway;
use super::client::build_graphql_client;
use super::graphql::execute;
use super::mutations;

/// Octocrab-backed gateway for GitHub Projects.
pub struct OctocrabProjectsGateway {
    client: Octocrab,
}

impl OctocrabProjectsGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds a GraphQL client for the given token and API base.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Validation`] when the base URI cannot be
    /// parsed or [`TaskFlowError::Configuration`] when Octocrab fails to
    /// construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        api_base: &ApiBase,
    ) -> Result<Self, TaskFlowError> {
        Ok(Self::new(build_graphql_client(token, api_base)?))
    }
}

#[async_trait]
impl ProjectsGateway for OctocrabProjectsGateway {
    async fn list_projects(&self) -> Result<Vec<Project>, TaskFlowError> {
        let data: ViewerProjectsData = execute(
            &self.client,
            Operation::ListProjects,
            VIEWER_PROJECTS,
            json!({}),
        )
        .await?;

        let projects = data
            .viewer
            .projects
            .nodes
            .into_iter()
            .map(normalize_project_summary)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|cause| TaskFlowError::operation(Operation::ListProjects, cause))?;
        tracing::debug!("loaded {} projects", projects.len());
        Ok(projects)
    }

    async fn fetch_project_data(&self, project_id: &str) -> Result<ProjectData, TaskFlowError> {
        let data: ProjectNodeData = execute(
            &self.client,
            Operation::FetchProjectData,
            PROJECT_DATA,
            json!({ "projectId": project_id }),
        )
        .await?;

        let project_data = normalize_project_data(data)
            .map_err(|cause| TaskFlowError::operation(Operation::FetchProjectData, cause))?;
        tracing::debug!(
            "loaded {} tasks and {} fields for project {project_id}",
            project_data.tasks.len(),
            project_data.custom_fields.len()
        );
        Ok(project_data)
    }

    async fn create_issue(&self, params: &CreateTaskParams) -> Result<Task, TaskFlowError> {
        mutations::create_task(&self.client, params).await
    }

    async fn update_task_field(&self, params: &UpdateTaskFieldParams) -> Result<(), TaskFlowError> {
        mutations::update_task_field(&self.client, params).await
    }

    async fn close_issue(&self, issue_id: &str) -> Result<(), TaskFlowError> {
        mutations::close_issue(&self.client, issue_id).await
    }
}
