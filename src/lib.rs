//! Task flow library crate for GitHub Projects (v2).
//!
//! The library wraps Octocrab to query GitHub's Projects GraphQL API,
//! normalizes its union-typed responses into plain [`Task`] and
//! [`CustomFieldValue`] records, manages stored GitHub accounts, and ties
//! tasks to local Git branches.

pub mod accounts;
pub mod config;
pub mod github;
pub mod local;
pub mod telemetry;

pub use accounts::{Account, AccountRegistry, CredentialStore, FileCredentialStore, Session};
pub use config::{OperationMode, TaskFlowConfig};
pub use github::{
    ApiBase, CreateTaskParams, CustomFieldDefinition, CustomFieldType, CustomFieldValue,
    FailureCause, FieldValue, FieldValueInput, IdentityGateway, OctocrabIdentityGateway,
    OctocrabProjectsGateway, Operation, PersonalAccessToken, Project, ProjectData,
    ProjectsGateway, RepositorySlug, Task, TaskFlowError, TaskState, UpdateTaskFieldParams,
    UserIdentity, ValidationError, normalize_project_payload,
};
