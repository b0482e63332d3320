//! GitHub Projects (v2) access and schema normalization.
//!
//! This module wraps Octocrab to query GitHub's union-typed Projects GraphQL
//! schema and flattens the responses into [`models::Project`],
//! [`models::Task`] and [`models::CustomFieldValue`]. Errors are mapped into
//! [`TaskFlowError`] so callers can surface precise failures without
//! exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod models;
pub mod normalize;
pub(crate) mod queries;
pub mod token;
pub(crate) mod wire;

pub use error::{FailureCause, Operation, TaskFlowError, ValidationError};
pub use gateway::{
    IdentityGateway, OctocrabIdentityGateway, OctocrabProjectsGateway, ProjectsGateway,
};
pub use models::{
    CreateTaskParams, CustomFieldDefinition, CustomFieldType, CustomFieldValue, FieldValue,
    FieldValueInput, Project, ProjectData, Task, TaskState, UpdateTaskFieldParams, UserIdentity,
};
pub use normalize::normalize_project_payload;
pub use token::{ApiBase, PersonalAccessToken, RepositorySlug};

#[cfg(test)]
pub use gateway::{MockIdentityGateway, MockProjectsGateway};
