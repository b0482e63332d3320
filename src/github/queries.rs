//! GraphQL documents sent to the GitHub Projects API.
//!
//! Page sizes are fixed: 100 projects, 50 fields, 100 items, 20 field values
//! and 10 assignees per item. Nothing beyond the first page is fetched.

/// Lists the first 100 projects visible to the viewer.
pub(crate) const VIEWER_PROJECTS: &str = r"
query {
  viewer {
    projectsV2(first: 100) {
      nodes {
        ...ProjectSummary
      }
    }
  }
}
";

/// Loads fields and items of one project.
pub(crate) const PROJECT_DATA: &str = r"
query($projectId: ID!) {
  node(id: $projectId) {
    ... on ProjectV2 {
      ...ProjectSummary
      fields(first: 50) {
        nodes {
          __typename
          ... on ProjectV2Field { id name dataType }
          ... on ProjectV2SingleSelectField {
            id name dataType
            options { id name color }
          }
          ... on ProjectV2IterationField { id name dataType }
        }
      }
      items(first: 100) {
        nodes {
          id
          fieldValues(first: 20) {
            nodes {
              __typename
              ... on ProjectV2ItemFieldTextValue { text field { ...FieldRef } }
              ... on ProjectV2ItemFieldNumberValue { number field { ...FieldRef } }
              ... on ProjectV2ItemFieldDateValue { date field { ...FieldRef } }
              ... on ProjectV2ItemFieldSingleSelectValue { name field { ...FieldRef } }
              ... on ProjectV2ItemFieldIterationValue { title field { ...FieldRef } }
            }
          }
          content {
            __typename
            ... on Issue { ...IssueFields }
            ... on DraftIssue {
              id title body
              assignees(first: 10) { nodes { login avatarUrl url } }
            }
          }
        }
      }
    }
  }
}
";

/// Resolves a repository node id from `owner/name`.
pub(crate) const REPOSITORY_ID: &str = r"
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) { id }
}
";

/// Creates an issue in a repository.
pub(crate) const CREATE_ISSUE: &str = r"
mutation($repositoryId: ID!, $title: String!, $body: String, $assigneeIds: [ID!]) {
  createIssue(input: {
    repositoryId: $repositoryId
    title: $title
    body: $body
    assigneeIds: $assigneeIds
  }) {
    issue { ...IssueFields }
  }
}
";

/// Adds existing content to a project.
pub(crate) const ADD_PROJECT_ITEM: &str = r"
mutation($projectId: ID!, $contentId: ID!) {
  addProjectV2ItemById(input: { projectId: $projectId, contentId: $contentId }) {
    item { id }
  }
}
";

/// Creates a draft issue inside a project.
pub(crate) const ADD_DRAFT_ISSUE: &str = r"
mutation($projectId: ID!, $title: String!, $body: String!) {
  addProjectV2DraftIssue(input: { projectId: $projectId, title: $title, body: $body }) {
    projectItem {
      id
      content {
        ... on DraftIssue { id title body }
      }
    }
  }
}
";

/// Sets one field of a project item.
pub(crate) const UPDATE_FIELD_VALUE: &str = r"
mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $value: ProjectV2FieldValue!) {
  updateProjectV2ItemFieldValue(input: {
    projectId: $projectId
    itemId: $itemId
    fieldId: $fieldId
    value: $value
  }) {
    projectV2Item { id }
  }
}
";

/// Clears one field of a project item.
pub(crate) const CLEAR_FIELD_VALUE: &str = r"
mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!) {
  clearProjectV2ItemFieldValue(input: {
    projectId: $projectId
    itemId: $itemId
    fieldId: $fieldId
  }) {
    projectV2Item { id }
  }
}
";

/// Closes an issue.
pub(crate) const CLOSE_ISSUE: &str = r"
mutation($issueId: ID!) {
  closeIssue(input: { issueId: $issueId }) {
    issue { id state }
  }
}
";

const PROJECT_SUMMARY_FRAGMENT: &str = r"
fragment ProjectSummary on ProjectV2 {
  id number title url shortDescription public closed
  owner {
    __typename
    ... on User { login }
    ... on Organization { login }
  }
}
";

const FIELD_REF_FRAGMENT: &str = r"
fragment FieldRef on ProjectV2FieldCommon { id name }
";

const ISSUE_FIELDS_FRAGMENT: &str = r"
fragment IssueFields on Issue {
  id number title body url state
  repository { name owner { login } }
  assignees(first: 10) { nodes { login avatarUrl url } }
}
";

/// Appends the fragment definitions a document spreads.
///
/// GitHub rejects documents that define unused fragments, so only the
/// fragments referenced by `document` are included.
pub(crate) fn with_fragments(document: &str) -> String {
    let fragments = [
        ("...ProjectSummary", PROJECT_SUMMARY_FRAGMENT),
        ("...FieldRef", FIELD_REF_FRAGMENT),
        ("...IssueFields", ISSUE_FIELDS_FRAGMENT),
    ];
    let mut full = document.to_owned();
    for (spread, definition) in fragments {
        if document.contains(spread) {
            full.push_str(definition);
        }
    }
    full
}
