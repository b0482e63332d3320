//! Shared test utilities for CLI tests.

use std::sync::Mutex;

use async_trait::async_trait;
use taskflow::local::{GitOperationError, GitOperations};
use taskflow::telemetry::{TelemetryEvent, TelemetrySink};
use taskflow::{
    CreateTaskParams, IdentityGateway, Project, ProjectData, ProjectsGateway, Task, TaskFlowError,
    UpdateTaskFieldParams, UserIdentity,
};

/// A gateway that returns preconfigured responses and captures mutation inputs.
///
/// Responses are consumed on first use; an unconfigured call panics.
#[derive(Default)]
pub struct FakeProjectsGateway {
    /// Response for `list_projects`.
    pub projects: Mutex<Option<Result<Vec<Project>, TaskFlowError>>>,
    /// Response for `fetch_project_data`.
    pub project_data: Mutex<Option<Result<ProjectData, TaskFlowError>>>,
    /// Response for `create_issue`.
    pub created: Mutex<Option<Result<Task, TaskFlowError>>>,
    /// Parameters passed to `create_issue`.
    pub create_calls: Mutex<Vec<CreateTaskParams>>,
    /// Parameters passed to `update_task_field`.
    pub update_calls: Mutex<Vec<UpdateTaskFieldParams>>,
    /// Issue ids passed to `close_issue`.
    pub closed: Mutex<Vec<String>>,
}

impl FakeProjectsGateway {
    /// Gateway that serves one project payload.
    pub fn with_project_data(data: ProjectData) -> Self {
        let gateway = Self::default();
        gateway
            .project_data
            .lock()
            .expect("project data mutex should be available")
            .replace(Ok(data));
        gateway
    }
}

fn take<T>(slot: &Mutex<Option<T>>, call: &str) -> T {
    slot.lock()
        .expect("response mutex should be available")
        .take()
        .unwrap_or_else(|| panic!("unexpected call to {call}"))
}

#[async_trait]
impl ProjectsGateway for FakeProjectsGateway {
    async fn list_projects(&self) -> Result<Vec<Project>, TaskFlowError> {
        take(&self.projects, "list_projects")
    }

    async fn fetch_project_data(&self, _project_id: &str) -> Result<ProjectData, TaskFlowError> {
        take(&self.project_data, "fetch_project_data")
    }

    async fn create_issue(&self, params: &CreateTaskParams) -> Result<Task, TaskFlowError> {
        self.create_calls
            .lock()
            .expect("create calls mutex should be available")
            .push(params.clone());
        take(&self.created, "create_issue")
    }

    async fn update_task_field(&self, params: &UpdateTaskFieldParams) -> Result<(), TaskFlowError> {
        self.update_calls
            .lock()
            .expect("update calls mutex should be available")
            .push(params.clone());
        Ok(())
    }

    async fn close_issue(&self, issue_id: &str) -> Result<(), TaskFlowError> {
        self.closed
            .lock()
            .expect("closed mutex should be available")
            .push(issue_id.to_owned());
        Ok(())
    }
}

/// Identity gateway that always reports the same user.
pub struct FakeIdentityGateway {
    /// The user to report.
    pub identity: UserIdentity,
}

#[async_trait]
impl IdentityGateway for FakeIdentityGateway {
    async fn authenticated_user(&self) -> Result<UserIdentity, TaskFlowError> {
        Ok(self.identity.clone())
    }
}

/// In-memory repository state for branch handler tests.
#[derive(Debug, Default)]
pub struct FakeGit {
    /// Local branch names.
    pub branches: Mutex<Vec<String>>,
    /// Checked out branch.
    pub current: Mutex<Option<String>>,
    /// Whether the working tree has uncommitted changes.
    pub dirty: bool,
}

impl FakeGit {
    /// Repository on `main` with the given extra branches.
    pub fn with_branches(branches: &[&str]) -> Self {
        let mut names = vec!["main".to_owned()];
        names.extend(branches.iter().map(|name| (*name).to_owned()));
        Self {
            branches: Mutex::new(names),
            current: Mutex::new(Some("main".to_owned())),
            dirty: false,
        }
    }

    /// Currently checked out branch.
    pub fn current(&self) -> Option<String> {
        self.current
            .lock()
            .expect("current branch mutex should be available")
            .clone()
    }
}

impl GitOperations for FakeGit {
    fn create_branch(&self, name: &str) -> Result<(), GitOperationError> {
        let mut branches = self
            .branches
            .lock()
            .expect("branches mutex should be available");
        if branches.iter().any(|branch| branch == name) {
            return Err(GitOperationError::BranchExists {
                name: name.to_owned(),
            });
        }
        branches.push(name.to_owned());
        drop(branches);
        self.checkout_branch(name)
    }

    fn checkout_branch(&self, name: &str) -> Result<(), GitOperationError> {
        let known = self
            .branches
            .lock()
            .expect("branches mutex should be available")
            .iter()
            .any(|branch| branch == name);
        if !known {
            return Err(GitOperationError::BranchNotFound {
                name: name.to_owned(),
            });
        }
        self.current
            .lock()
            .expect("current branch mutex should be available")
            .replace(name.to_owned());
        Ok(())
    }

    fn list_branches(&self) -> Result<Vec<String>, GitOperationError> {
        Ok(self
            .branches
            .lock()
            .expect("branches mutex should be available")
            .clone())
    }

    fn current_branch(&self) -> Result<Option<String>, GitOperationError> {
        Ok(self.current())
    }

    fn has_uncommitted_changes(&self) -> Result<bool, GitOperationError> {
        Ok(self.dirty)
    }
}

/// Telemetry sink that keeps every event.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingSink {
    /// Drains the recorded events.
    pub fn take(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .expect("events mutex should be available")
            .drain(..)
            .collect()
    }
}

impl TelemetrySink for RecordingSink {
    fn record(&self, event: TelemetryEvent) {
        self.events
            .lock()
            .expect("events mutex should be available")
            .push(event);
    }
}
