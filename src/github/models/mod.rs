//! Domain model for GitHub Projects (v2) boards and their tasks.
//!
//! These types are the normalized view of GitHub's union-typed GraphQL
//! schema. Every fetch produces a fresh, independent snapshot; nothing here
//! holds a reference back to the wire payload it came from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

mod input;

pub use input::{CreateTaskParams, FieldValueInput, UpdateTaskFieldParams};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// A GitHub Projects board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// GraphQL node id (`PVT_...`).
    pub id: String,
    /// Project number within its owner.
    pub number: u64,
    /// Display title.
    pub title: String,
    /// Browser URL.
    pub url: String,
    /// Optional short description.
    pub short_description: Option<String>,
    /// Whether the project is publicly visible.
    pub public: bool,
    /// Whether the project has been closed.
    pub closed: bool,
    /// Login of the owning user or organization.
    pub owner_login: String,
}

/// Data type of a project field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomFieldType {
    /// Free text.
    Text,
    /// Floating point number.
    Number,
    /// Calendar date.
    Date,
    /// One option out of a fixed set.
    SingleSelect,
    /// Iteration (sprint) field.
    Iteration,
    /// Built-in title column.
    Title,
    /// Built-in assignees column.
    Assignees,
    /// Built-in labels column.
    Labels,
    /// Built-in repository column.
    Repository,
    /// Built-in milestone column.
    Milestone,
}

impl CustomFieldType {
    /// Parses a GraphQL `ProjectV2FieldType` name.
    ///
    /// Returns `None` for data types this model does not distinguish.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        let parsed = match value {
            "TEXT" => Self::Text,
            "NUMBER" => Self::Number,
            "DATE" => Self::Date,
            "SINGLE_SELECT" => Self::SingleSelect,
            "ITERATION" => Self::Iteration,
            "TITLE" => Self::Title,
            "ASSIGNEES" => Self::Assignees,
            "LABELS" => Self::Labels,
            "REPOSITORY" => Self::Repository,
            "MILESTONE" => Self::Milestone,
            _ => return None,
        };
        Some(parsed)
    }

    /// Returns the GraphQL name of this data type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Number => "NUMBER",
            Self::Date => "DATE",
            Self::SingleSelect => "SINGLE_SELECT",
            Self::Iteration => "ITERATION",
            Self::Title => "TITLE",
            Self::Assignees => "ASSIGNEES",
            Self::Labels => "LABELS",
            Self::Repository => "REPOSITORY",
            Self::Milestone => "MILESTONE",
        }
    }
}

/// One option of a single-select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomFieldOption {
    /// Option id, used when setting the field.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Colour name as reported by GitHub.
    pub color: Option<String>,
}

/// A column defined on a project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldDefinition {
    /// Field id, unique within the project.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Data type.
    pub data_type: CustomFieldType,
    /// Options; only present for single-select fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CustomFieldOption>>,
}

impl CustomFieldDefinition {
    /// Finds an option by name, ignoring ASCII case.
    #[must_use]
    pub fn option_named(&self, name: &str) -> Option<&CustomFieldOption> {
        self.options
            .as_deref()?
            .iter()
            .find(|option| option.name.eq_ignore_ascii_case(name))
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Open issue.
    Open,
    /// Closed issue.
    Closed,
    /// Draft issue; never reported by GitHub, derived from the content type.
    Draft,
}

impl TaskState {
    /// Returns the upper-case label used by GitHub.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Draft => "DRAFT",
        }
    }
}

/// A user assigned to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignee {
    /// GitHub login.
    pub login: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Profile URL.
    pub url: String,
}

/// Repository that backs an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRepository {
    /// Repository name.
    pub name: String,
    /// Owner login.
    pub owner: String,
}

/// Scalar value of a project field on one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Text field value.
    Text(String),
    /// Number field value.
    Number(f64),
    /// Date field value.
    Date(NaiveDate),
    /// Name of the selected option.
    SingleSelect(String),
    /// Title of the selected iteration.
    Iteration(String),
}

impl FieldValue {
    /// Renders the value the way it appears on the board.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) | Self::SingleSelect(text) | Self::Iteration(text) => text.clone(),
            Self::Number(number) => number.to_string(),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Value of a field on a task, resolved against the project's fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldValue {
    /// Id of the field definition this value belongs to.
    pub field_id: String,
    /// Field name at the time of normalization.
    pub field_name: String,
    /// Data type of the matching definition, or `Text` when none matched.
    pub field_type: CustomFieldType,
    /// The value, or `None` when the field is empty.
    pub value: Option<FieldValue>,
}

/// A project item backed by an issue or a draft issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Content id (issue or draft issue node id).
    pub id: String,
    /// Issue number; `0` for drafts.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: Option<String>,
    /// Issue URL; empty for drafts.
    pub url: String,
    /// Open, closed or draft.
    pub state: TaskState,
    /// Assigned users in GitHub's order.
    pub assignees: Vec<TaskAssignee>,
    /// Backing repository; `None` exactly when the task is a draft.
    pub repository: Option<TaskRepository>,
    /// Field values set on the item.
    pub custom_fields: Vec<CustomFieldValue>,
    /// Project item id, needed by field mutations.
    pub project_item_id: Option<String>,
}

impl Task {
    /// Returns true when the task is a draft issue.
    #[must_use]
    pub const fn is_draft(&self) -> bool {
        matches!(self.state, TaskState::Draft)
    }

    /// Looks up the value of a field by its name, ignoring ASCII case.
    #[must_use]
    pub fn field_value(&self, field_name: &str) -> Option<&FieldValue> {
        self.custom_fields
            .iter()
            .find(|field| field.field_name.eq_ignore_ascii_case(field_name))
            .and_then(|field| field.value.as_ref())
    }
}

/// Everything loaded for one project in a single fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    /// Project summary.
    pub project: Project,
    /// Issues and drafts on the board.
    pub tasks: Vec<Task>,
    /// Field definitions of the board.
    pub custom_fields: Vec<CustomFieldDefinition>,
}

impl ProjectData {
    /// Finds the definition of a field by id.
    #[must_use]
    pub fn field(&self, field_id: &str) -> Option<&CustomFieldDefinition> {
        self.custom_fields.iter().find(|field| field.id == field_id)
    }

    /// Finds a task by issue number. Drafts all share number `0`.
    #[must_use]
    pub fn task_by_number(&self, number: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.number == number)
    }
}

/// Identity of the user who owns a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// GitHub login.
    pub login: String,
    /// Public email, when visible to the token.
    pub email: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
}
