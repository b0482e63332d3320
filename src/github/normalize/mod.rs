//! Normalization of GitHub Projects GraphQL payloads into the domain model.
//!
//! Everything in this module is a pure function of its input: no network,
//! no clocks, no counters. Normalizing the same payload twice yields equal
//! results.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::FailureCause;
use super::models::{
    CustomFieldDefinition, CustomFieldOption, CustomFieldType, CustomFieldValue, FieldValue,
    Project, ProjectData, Task, TaskAssignee, TaskRepository, TaskState,
};
use super::wire::{
    Connection, ProjectNodeData, WireAssignee, WireContent, WireDraftIssue, WireField,
    WireFieldValue, WireIssue, WireIssueState, WireItem, WireOwner, WireProject,
};

/// Decodes the `data` object of a GraphQL response into a wire type.
///
/// # Errors
///
/// Returns [`FailureCause::Normalization`] when the payload does not match
/// the expected shape.
pub(crate) fn decode<T: DeserializeOwned>(data: Value) -> Result<T, FailureCause> {
    serde_json::from_value(data).map_err(|error| FailureCause::Normalization {
        message: error.to_string(),
    })
}

/// Decodes and normalizes the `data` object of a project data query.
///
/// This is the entry point for callers holding a raw response body, such as
/// fixtures or cached payloads.
///
/// # Errors
///
/// Returns [`FailureCause::Normalization`] when the payload does not have
/// the project data shape or the node is missing.
pub fn normalize_project_payload(data: Value) -> Result<ProjectData, FailureCause> {
    normalize_project_data(decode(data)?)
}

/// Normalizes a decoded project data response.
pub(crate) fn normalize_project_data(data: ProjectNodeData) -> Result<ProjectData, FailureCause> {
    let detail = data.node.ok_or_else(|| FailureCause::Normalization {
        message: "project node is missing from the response".to_owned(),
    })?;

    let custom_fields = normalize_field_definitions(detail.fields.nodes);
    let tasks = normalize_tasks(detail.items.nodes, &custom_fields);
    let project = normalize_project_summary(detail.summary)?;

    Ok(ProjectData {
        project,
        tasks,
        custom_fields,
    })
}

/// Converts a project summary, erasing the user/organization distinction.
pub(crate) fn normalize_project_summary(raw: WireProject) -> Result<Project, FailureCause> {
    let owner_login = match raw.owner {
        WireOwner::User { login } | WireOwner::Organization { login } => login,
        WireOwner::Other => {
            return Err(FailureCause::Normalization {
                message: format!("owner of project {} has no login", raw.id),
            });
        }
    };

    Ok(Project {
        id: raw.id,
        number: raw.number,
        title: raw.title,
        url: raw.url,
        short_description: raw.short_description,
        public: raw.public,
        closed: raw.closed,
        owner_login,
    })
}

/// Converts field configurations into definitions, in source order.
pub(crate) fn normalize_field_definitions(raw: Vec<WireField>) -> Vec<CustomFieldDefinition> {
    raw.into_iter()
        .filter_map(|field| match field {
            WireField::Plain(common) | WireField::Iteration(common) => {
                Some(CustomFieldDefinition {
                    data_type: field_type_or_text(&common.data_type),
                    id: common.id,
                    name: common.name,
                    options: None,
                })
            }
            WireField::SingleSelect(select) => Some(CustomFieldDefinition {
                data_type: field_type_or_text(&select.data_type),
                id: select.id,
                name: select.name,
                options: Some(
                    select
                        .options
                        .into_iter()
                        .map(|option| CustomFieldOption {
                            id: option.id,
                            name: option.name,
                            color: option.color,
                        })
                        .collect(),
                ),
            }),
            WireField::Other => None,
        })
        .collect()
}

fn field_type_or_text(data_type: &str) -> CustomFieldType {
    CustomFieldType::from_wire(data_type).unwrap_or_else(|| {
        tracing::debug!("unmodelled field data type {data_type}, treating as TEXT");
        CustomFieldType::Text
    })
}

/// Converts project items into tasks.
///
/// Items without content, or whose content is neither an issue nor a draft
/// issue (pull requests, redacted items), are dropped.
pub(crate) fn normalize_tasks(raw: Vec<WireItem>, fields: &[CustomFieldDefinition]) -> Vec<Task> {
    let total = raw.len();
    let tasks: Vec<Task> = raw
        .into_iter()
        .filter_map(|item| normalize_item(item, fields))
        .collect();

    let dropped = total.saturating_sub(tasks.len());
    if dropped > 0 {
        tracing::debug!("dropped {dropped} project items without issue or draft content");
    }
    tasks
}

fn normalize_item(item: WireItem, fields: &[CustomFieldDefinition]) -> Option<Task> {
    let mut task = match item.content? {
        WireContent::Issue(issue) => normalize_issue(issue),
        WireContent::DraftIssue(draft) => normalize_draft(draft),
        WireContent::Other => return None,
    };
    task.custom_fields = normalize_field_values(item.field_values, fields);
    task.project_item_id = Some(item.id);
    Some(task)
}

/// Converts issue content into a task with no field values or item id.
pub(crate) fn normalize_issue(issue: WireIssue) -> Task {
    let state = match issue.state {
        WireIssueState::Open => TaskState::Open,
        WireIssueState::Closed => TaskState::Closed,
    };

    Task {
        id: issue.id,
        number: issue.number,
        title: issue.title,
        body: issue.body,
        url: issue.url,
        state,
        assignees: normalize_assignees(issue.assignees),
        repository: Some(TaskRepository {
            name: issue.repository.name,
            owner: issue.repository.owner.login,
        }),
        custom_fields: Vec::new(),
        project_item_id: None,
    }
}

/// Converts draft issue content into a task with no field values or item id.
pub(crate) fn normalize_draft(draft: WireDraftIssue) -> Task {
    Task {
        id: draft.id,
        number: 0,
        title: draft.title,
        body: draft.body,
        url: String::new(),
        state: TaskState::Draft,
        assignees: normalize_assignees(draft.assignees),
        repository: None,
        custom_fields: Vec::new(),
        project_item_id: None,
    }
}

fn normalize_assignees(raw: Connection<WireAssignee>) -> Vec<TaskAssignee> {
    raw.nodes
        .into_iter()
        .map(|assignee| TaskAssignee {
            login: assignee.login,
            avatar_url: assignee.avatar_url,
            url: assignee.url,
        })
        .collect()
}

fn normalize_field_values(
    raw: Connection<WireFieldValue>,
    fields: &[CustomFieldDefinition],
) -> Vec<CustomFieldValue> {
    raw.nodes
        .into_iter()
        .filter_map(|value| normalize_field_value(value, fields))
        .collect()
}

/// Resolves one field value against the project's definitions.
///
/// Values without a field reference, and value types the query does not
/// select, yield `None`. A field id with no matching definition resolves to
/// `Text`.
fn normalize_field_value(
    raw: WireFieldValue,
    fields: &[CustomFieldDefinition],
) -> Option<CustomFieldValue> {
    let (field, value) = match raw {
        WireFieldValue::Text { text, field } => (field?, text.map(FieldValue::Text)),
        WireFieldValue::Number { number, field } => (field?, number.map(FieldValue::Number)),
        WireFieldValue::Date { date, field } => (field?, date.map(FieldValue::Date)),
        WireFieldValue::SingleSelect { name, field } => {
            (field?, name.map(FieldValue::SingleSelect))
        }
        WireFieldValue::Iteration { title, field } => (field?, title.map(FieldValue::Iteration)),
        WireFieldValue::Other => return None,
    };

    let field_type = fields
        .iter()
        .find(|definition| definition.id == field.id)
        .map_or(CustomFieldType::Text, |definition| definition.data_type);

    Some(CustomFieldValue {
        field_id: field.id,
        field_name: field.name,
        field_type,
        value,
    })
}
