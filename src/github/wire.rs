//! Deserialisation targets for the GitHub Projects GraphQL documents.
//!
//! Every query and mutation in [`super::queries`] has a matching `*Data`
//! type here. GraphQL unions and interfaces are modelled as enums tagged by
//! `__typename`, with an `Other` arm for members the documents do not
//! select. Conversion into domain types lives in [`super::normalize`].

use chrono::NaiveDate;
use serde::Deserialize;

/// `{ nodes: [...] }` connection wrapper.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub(crate) nodes: Vec<T>,
}

/// Project owner union (`User` or `Organization`).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub(crate) enum WireOwner {
    User { login: String },
    Organization { login: String },
    #[serde(other)]
    Other,
}

/// Summary fields selected on every `ProjectV2`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireProject {
    pub(crate) id: String,
    pub(crate) number: u64,
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) short_description: Option<String>,
    pub(crate) public: bool,
    pub(crate) closed: bool,
    pub(crate) owner: WireOwner,
}

/// `viewer.projectsV2` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ViewerProjectsData {
    pub(crate) viewer: ViewerProjects,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ViewerProjects {
    #[serde(rename = "projectsV2")]
    pub(crate) projects: Connection<WireProject>,
}

/// `node(id:)` response for a full project load.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProjectNodeData {
    pub(crate) node: Option<WireProjectDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireProjectDetail {
    #[serde(flatten)]
    pub(crate) summary: WireProject,
    pub(crate) fields: Connection<WireField>,
    pub(crate) items: Connection<WireItem>,
}

/// Field configuration union.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub(crate) enum WireField {
    #[serde(rename = "ProjectV2Field")]
    Plain(WireFieldCommon),
    #[serde(rename = "ProjectV2SingleSelectField")]
    SingleSelect(WireSingleSelectField),
    #[serde(rename = "ProjectV2IterationField")]
    Iteration(WireFieldCommon),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireFieldCommon {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) data_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSingleSelectField {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) data_type: String,
    #[serde(default)]
    pub(crate) options: Vec<WireFieldOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireFieldOption {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) color: Option<String>,
}

/// One project item: the board row wrapping its content.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireItem {
    pub(crate) id: String,
    pub(crate) field_values: Connection<WireFieldValue>,
    pub(crate) content: Option<WireContent>,
}

/// Item content union.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub(crate) enum WireContent {
    Issue(WireIssue),
    DraftIssue(WireDraftIssue),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum WireIssueState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireIssue {
    pub(crate) id: String,
    pub(crate) number: u64,
    pub(crate) title: String,
    pub(crate) body: Option<String>,
    pub(crate) url: String,
    pub(crate) state: WireIssueState,
    pub(crate) repository: WireRepository,
    pub(crate) assignees: Connection<WireAssignee>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireDraftIssue {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) body: Option<String>,
    #[serde(default = "empty_connection")]
    pub(crate) assignees: Connection<WireAssignee>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireRepository {
    pub(crate) name: String,
    pub(crate) owner: WireLogin,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireLogin {
    pub(crate) login: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireAssignee {
    pub(crate) login: String,
    pub(crate) avatar_url: Option<String>,
    pub(crate) url: String,
}

/// Item field value union.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub(crate) enum WireFieldValue {
    #[serde(rename = "ProjectV2ItemFieldTextValue")]
    Text {
        text: Option<String>,
        field: Option<WireFieldRef>,
    },
    #[serde(rename = "ProjectV2ItemFieldNumberValue")]
    Number {
        number: Option<f64>,
        field: Option<WireFieldRef>,
    },
    #[serde(rename = "ProjectV2ItemFieldDateValue")]
    Date {
        date: Option<NaiveDate>,
        field: Option<WireFieldRef>,
    },
    #[serde(rename = "ProjectV2ItemFieldSingleSelectValue")]
    SingleSelect {
        name: Option<String>,
        field: Option<WireFieldRef>,
    },
    #[serde(rename = "ProjectV2ItemFieldIterationValue")]
    Iteration {
        title: Option<String>,
        field: Option<WireFieldRef>,
    },
    #[serde(other)]
    Other,
}

/// Back-reference from a value to its field definition.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireFieldRef {
    pub(crate) id: String,
    pub(crate) name: String,
}

/// `repository(owner:, name:)` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RepositoryIdData {
    pub(crate) repository: Option<WireNodeId>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireNodeId {
    pub(crate) id: String,
}

/// `createIssue` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateIssueData {
    pub(crate) create_issue: CreateIssuePayload,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateIssuePayload {
    pub(crate) issue: WireIssue,
}

/// `addProjectV2ItemById` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddItemData {
    #[serde(rename = "addProjectV2ItemById")]
    pub(crate) add_item: AddItemPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AddItemPayload {
    pub(crate) item: WireNodeId,
}

/// `addProjectV2DraftIssue` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AddDraftIssueData {
    #[serde(rename = "addProjectV2DraftIssue")]
    pub(crate) add_draft: AddDraftIssuePayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddDraftIssuePayload {
    pub(crate) project_item: WireDraftItem,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireDraftItem {
    pub(crate) id: String,
    pub(crate) content: WireDraftIssue,
}

/// `updateProjectV2ItemFieldValue` / `clearProjectV2ItemFieldValue`
/// response; only the item id is selected.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FieldMutationData {
    #[serde(
        alias = "updateProjectV2ItemFieldValue",
        alias = "clearProjectV2ItemFieldValue"
    )]
    pub(crate) payload: FieldMutationPayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FieldMutationPayload {
    pub(crate) project_v2_item: Option<WireNodeId>,
}

/// `closeIssue` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CloseIssueData {
    pub(crate) close_issue: CloseIssuePayload,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CloseIssuePayload {
    pub(crate) issue: WireClosedIssue,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireClosedIssue {
    pub(crate) id: String,
    pub(crate) state: WireIssueState,
}

/// REST `GET /user` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: String,
    pub(crate) email: Option<String>,
    pub(crate) avatar_url: Option<String>,
}

const fn empty_connection<T>() -> Connection<T> {
    Connection { nodes: Vec::new() }
}
