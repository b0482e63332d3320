//! Task creation and field mutations.

use octocrab::Octocrab;
use serde_json::json;

use crate::github::error::{FailureCause, Operation, TaskFlowError, ValidationError};
use crate::github::models::{CreateTaskParams, Task, UpdateTaskFieldParams};
use crate::github::normalize::{normalize_draft, normalize_issue};
use crate::github::queries::{
    ADD_DRAFT_ISSUE, ADD_PROJECT_ITEM, CLEAR_FIELD_VALUE, CLOSE_ISSUE, CREATE_ISSUE,
    REPOSITORY_ID, UPDATE_FIELD_VALUE,
};
use crate::github::token::RepositorySlug;
use crate::github::wire::{
    AddDraftIssueData, AddItemData, CloseIssueData, CreateIssueData, FieldMutationData,
    RepositoryIdData, WireIssueState,
};

use super::graphql::{execute, send};

/// Creates a repository issue when a repository is given, else a draft.
pub(super) async fn create_task(
    client: &Octocrab,
    params: &CreateTaskParams,
) -> Result<Task, TaskFlowError> {
    match params.repository() {
        Some(repository) => create_repository_issue(client, params, repository).await,
        None => create_draft_issue(client, params).await,
    }
}

/// Drafts live only inside a project, so a missing project id is rejected
/// before any request is sent.
async fn create_draft_issue(
    client: &Octocrab,
    params: &CreateTaskParams,
) -> Result<Task, TaskFlowError> {
    let Some(project_id) = params.project_id() else {
        return Err(ValidationError::MissingProject.into());
    };
    let variables = json!({
        "projectId": project_id,
        "title": params.title(),
        "body": params.body().unwrap_or_default(),
    });
    let data: AddDraftIssueData =
        execute(client, Operation::CreateDraftIssue, ADD_DRAFT_ISSUE, variables).await?;

    let project_item = data.add_draft.project_item;
    let mut task = normalize_draft(project_item.content);
    task.project_item_id = Some(project_item.id);
    tracing::debug!("created draft issue {}", task.id);
    Ok(task)
}

/// Looks up the repository, creates the issue, then attaches it.
///
/// Steps run strictly in order. An attach failure is reported with the
/// created issue and nothing is rolled back.
async fn create_repository_issue(
    client: &Octocrab,
    params: &CreateTaskParams,
    repository: &RepositorySlug,
) -> Result<Task, TaskFlowError> {
    let repository_id = lookup_repository_id(client, repository).await?;

    let variables = json!({
        "repositoryId": repository_id,
        "title": params.title(),
        "body": params.body(),
        "assigneeIds": params.assignee_ids(),
    });
    let created: CreateIssueData =
        execute(client, Operation::CreateIssue, CREATE_ISSUE, variables).await?;
    let mut task = normalize_issue(created.create_issue.issue);
    tracing::debug!("created issue #{} in {repository}", task.number);

    let Some(project_id) = params.project_id() else {
        return Ok(task);
    };

    let attach_variables = json!({ "projectId": project_id, "contentId": task.id });
    match send::<AddItemData>(client, ADD_PROJECT_ITEM, attach_variables).await {
        Ok(attached) => {
            task.project_item_id = Some(attached.add_item.item.id);
            Ok(task)
        }
        Err(cause) => {
            tracing::warn!(
                "issue #{} was created but could not be added to project {project_id}: {cause}",
                task.number
            );
            Err(TaskFlowError::IssueNotAttached {
                issue: Box::new(task),
                project_id: project_id.to_owned(),
                cause,
            })
        }
    }
}

async fn lookup_repository_id(
    client: &Octocrab,
    repository: &RepositorySlug,
) -> Result<String, TaskFlowError> {
    let variables = json!({ "owner": repository.owner(), "name": repository.name() });
    let data: RepositoryIdData =
        execute(client, Operation::CreateIssue, REPOSITORY_ID, variables).await?;

    data.repository.map(|node| node.id).ok_or_else(|| {
        TaskFlowError::operation(
            Operation::CreateIssue,
            FailureCause::Normalization {
                message: format!("repository {repository} was not found"),
            },
        )
    })
}

/// Sets or clears one field; `None` selects the clear mutation.
pub(super) async fn update_task_field(
    client: &Octocrab,
    params: &UpdateTaskFieldParams,
) -> Result<(), TaskFlowError> {
    let (document, variables) = match &params.value {
        Some(value) => (
            UPDATE_FIELD_VALUE,
            json!({
                "projectId": params.project_id,
                "itemId": params.project_item_id,
                "fieldId": params.field_id,
                "value": value.to_graphql(),
            }),
        ),
        None => (
            CLEAR_FIELD_VALUE,
            json!({
                "projectId": params.project_id,
                "itemId": params.project_item_id,
                "fieldId": params.field_id,
            }),
        ),
    };

    let data: FieldMutationData =
        execute(client, Operation::UpdateField, document, variables).await?;
    if data.payload.project_v2_item.is_none() {
        return Err(TaskFlowError::operation(
            Operation::UpdateField,
            FailureCause::Normalization {
                message: format!("item {} was not returned", params.project_item_id),
            },
        ));
    }
    Ok(())
}

pub(super) async fn close_issue(client: &Octocrab, issue_id: &str) -> Result<(), TaskFlowError> {
    let data: CloseIssueData = execute(
        client,
        Operation::CloseIssue,
        CLOSE_ISSUE,
        json!({ "issueId": issue_id }),
    )
    .await?;

    let closed = data.close_issue.issue;
    if closed.state != WireIssueState::Closed {
        tracing::warn!("issue {} is still open after closeIssue", closed.id);
    }
    Ok(())
}
