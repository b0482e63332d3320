//! Builders for GitHub Projects GraphQL payload fixtures.
//!
//! Each helper returns the JSON GitHub would send for one node, so tests can
//! assemble a full `data` object without repeating the union plumbing.
//!
//! # Examples
//!
//! ```
//! use taskflow::github::models::test_support::{
//!     issue_content, item, project_payload, text_value,
//! };
//!
//! let payload = project_payload(
//!     "PVT_1",
//!     vec![],
//!     vec![item(
//!         "PVTI_1",
//!         issue_content("I_1", 42, "Fix login", "octo", "app"),
//!         vec![text_value("F_1", "Priority", "High")],
//!     )],
//! );
//! assert_eq!(payload["node"]["id"], "PVT_1");
//! ```

use serde_json::{Value, json};

use super::{Task, TaskRepository, TaskState};

/// `ProjectV2` summary owned by the user `octo`.
#[must_use]
pub fn project_summary(id: &str, number: u64, title: &str) -> Value {
    json!({
        "id": id,
        "number": number,
        "title": title,
        "url": format!("https://github.com/users/octo/projects/{number}"),
        "shortDescription": null,
        "public": false,
        "closed": false,
        "owner": { "__typename": "User", "login": "octo" }
    })
}

/// `ProjectV2Field` configuration.
#[must_use]
pub fn plain_field(id: &str, name: &str, data_type: &str) -> Value {
    json!({
        "__typename": "ProjectV2Field",
        "id": id,
        "name": name,
        "dataType": data_type
    })
}

/// `ProjectV2SingleSelectField` configuration with `(id, name)` options.
#[must_use]
pub fn single_select_field(id: &str, name: &str, options: &[(&str, &str)]) -> Value {
    let option_nodes: Vec<Value> = options
        .iter()
        .map(|(option_id, option_name)| {
            json!({ "id": option_id, "name": option_name, "color": "GRAY" })
        })
        .collect();
    json!({
        "__typename": "ProjectV2SingleSelectField",
        "id": id,
        "name": name,
        "dataType": "SINGLE_SELECT",
        "options": option_nodes
    })
}

/// Open issue content in `owner/repo`.
#[must_use]
pub fn issue_content(id: &str, number: u64, title: &str, owner: &str, repo: &str) -> Value {
    json!({
        "__typename": "Issue",
        "id": id,
        "number": number,
        "title": title,
        "body": null,
        "url": format!("https://github.com/{owner}/{repo}/issues/{number}"),
        "state": "OPEN",
        "repository": { "name": repo, "owner": { "login": owner } },
        "assignees": { "nodes": [] }
    })
}

/// Draft issue content.
#[must_use]
pub fn draft_content(id: &str, title: &str) -> Value {
    json!({
        "__typename": "DraftIssue",
        "id": id,
        "title": title,
        "body": "",
        "assignees": { "nodes": [] }
    })
}

/// Pull request content, which the normalizer skips.
#[must_use]
pub fn pull_request_content() -> Value {
    json!({ "__typename": "PullRequest" })
}

/// Text field value.
#[must_use]
pub fn text_value(field_id: &str, field_name: &str, text: &str) -> Value {
    json!({
        "__typename": "ProjectV2ItemFieldTextValue",
        "text": text,
        "field": { "id": field_id, "name": field_name }
    })
}

/// Single-select field value carrying the option name.
#[must_use]
pub fn single_select_value(field_id: &str, field_name: &str, option_name: &str) -> Value {
    json!({
        "__typename": "ProjectV2ItemFieldSingleSelectValue",
        "name": option_name,
        "field": { "id": field_id, "name": field_name }
    })
}

/// Project item wrapping `content` (use `Value::Null` for redacted items).
#[must_use]
pub fn item(id: &str, content: Value, field_values: Vec<Value>) -> Value {
    json!({
        "id": id,
        "fieldValues": { "nodes": field_values },
        "content": content
    })
}

/// `data` object of the project data query.
#[must_use]
pub fn project_payload(project_id: &str, fields: Vec<Value>, items: Vec<Value>) -> Value {
    let mut node = project_summary(project_id, 1, "Roadmap");
    if let Some(object) = node.as_object_mut() {
        object.insert("fields".to_owned(), json!({ "nodes": fields }));
        object.insert("items".to_owned(), json!({ "nodes": items }));
    }
    json!({ "node": node })
}

/// Open issue task with a repository and no field values.
#[must_use]
pub fn issue_task(number: u64, title: &str) -> Task {
    Task {
        id: format!("I_{number}"),
        number,
        title: title.to_owned(),
        body: None,
        url: format!("https://github.com/octo/app/issues/{number}"),
        state: TaskState::Open,
        assignees: Vec::new(),
        repository: Some(TaskRepository {
            name: "app".to_owned(),
            owner: "octo".to_owned(),
        }),
        custom_fields: Vec::new(),
        project_item_id: Some(format!("PVTI_{number}")),
    }
}
