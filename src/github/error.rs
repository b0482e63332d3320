//! Error types exposed by the GitHub Projects layer.

use std::fmt;

use thiserror::Error;

use super::models::Task;
use crate::local::GitOperationError;

/// Use case that a gateway call was serving when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Listing the viewer's projects.
    ListProjects,
    /// Loading fields and items for one project.
    FetchProjectData,
    /// Creating a repository-backed issue.
    CreateIssue,
    /// Creating a draft issue inside a project.
    CreateDraftIssue,
    /// Setting or clearing a project item field.
    UpdateField,
    /// Closing an issue.
    CloseIssue,
    /// Resolving the user that owns a token.
    UserLookup,
}

impl Operation {
    /// Human-readable name used as the prefix of error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListProjects => "projects load",
            Self::FetchProjectData => "project data load",
            Self::CreateIssue => "issue creation",
            Self::CreateDraftIssue => "draft issue creation",
            Self::UpdateField => "field update",
            Self::CloseIssue => "issue close",
            Self::UserLookup => "user lookup",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Underlying reason a gateway call failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FailureCause {
    /// Networking or HTTP-level failure before a GraphQL body was read.
    #[error("network error talking to GitHub: {message}")]
    Transport {
        /// Transport-level error detail.
        message: String,
    },

    /// GitHub rejected the token with a 401 or 403 response.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the response.
        message: String,
    },

    /// The request reached GitHub but the response carried GraphQL errors.
    #[error("GraphQL error: {}", .messages.join("; "))]
    GraphQl {
        /// Messages from the `errors` array, in response order.
        messages: Vec<String>,
    },

    /// The payload did not have the shape the query asked for.
    #[error("unexpected response shape: {message}")]
    Normalization {
        /// Decode failure detail.
        message: String,
    },
}

/// Input rejected before any network call is made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No token was supplied.
    #[error("personal access token is required")]
    MissingToken,

    /// The token does not start with a known GitHub prefix.
    #[error("token must start with ghp_ or github_pat_")]
    UnrecognisedTokenPrefix,

    /// The token contains whitespace or control characters.
    #[error("token contains characters that cannot be sent in a header")]
    InvalidTokenCharacters,

    /// The task title is blank.
    #[error("task title cannot be empty")]
    EmptyTitle,

    /// A draft issue was requested without a project to hold it.
    #[error("draft issues need a project id (use --project-id or -p)")]
    MissingProject,

    /// The repository reference is not `owner/repo`.
    #[error("repository must look like owner/repo, got '{input}'")]
    MalformedRepositorySlug {
        /// The rejected input.
        input: String,
    },

    /// The API base URL cannot be used.
    #[error("API base URL is invalid: {message}")]
    InvalidApiBase {
        /// Parser detail.
        message: String,
    },

    /// No field with the given id exists in the project.
    #[error("project has no field with id '{field_id}'")]
    UnknownField {
        /// The id that was looked up.
        field_id: String,
    },

    /// A value could not be converted to the field's data type.
    #[error("invalid value for field '{field}': {message}")]
    InvalidFieldValue {
        /// Field name.
        field: String,
        /// Conversion detail.
        message: String,
    },

    /// A single-select value names no option of the field.
    #[error("field '{field}' has no option named '{option}'")]
    UnknownOption {
        /// Field name.
        field: String,
        /// The option name that was not found.
        option: String,
    },
}

/// Errors surfaced by the task flow library.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskFlowError {
    /// A gateway use case failed.
    #[error("{operation} failed: {cause}")]
    Operation {
        /// The use case being served.
        operation: Operation,
        /// Why it failed.
        cause: FailureCause,
    },

    /// The issue exists but could not be added to the project.
    ///
    /// No rollback is attempted; the created issue is returned so callers
    /// can report or retry the attachment.
    #[error(
        "issue creation failed: issue #{number} was created but not added to project {project_id}: {cause}",
        number = .issue.number
    )]
    IssueNotAttached {
        /// The issue that was created.
        issue: Box<Task>,
        /// Project the issue should have joined.
        project_id: String,
        /// Why the attach mutation failed.
        cause: FailureCause,
    },

    /// Caller input was rejected.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// The credential store could not satisfy a request.
    #[error("account error: {message}")]
    Credentials {
        /// Details about the account failure.
        message: String,
    },

    /// A local Git operation failed.
    #[error(transparent)]
    Git(#[from] GitOperationError),
}

impl TaskFlowError {
    /// Wraps a failure cause in the use case it interrupted.
    #[must_use]
    pub const fn operation(operation: Operation, cause: FailureCause) -> Self {
        Self::Operation { operation, cause }
    }

    /// Returns the failure cause when this error came from a gateway call.
    #[must_use]
    pub const fn cause(&self) -> Option<&FailureCause> {
        match self {
            Self::Operation { cause, .. } | Self::IssueNotAttached { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
