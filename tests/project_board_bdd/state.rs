//! Scenario state and runtime/server initialisation for the project board
//! BDD tests.

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use taskflow::{ProjectData, Task, TaskFlowError};
use wiremock::MockServer;

use super::runtime::SharedRuntime;

/// Scenario state for project board tests.
#[derive(ScenarioState, Default)]
pub(crate) struct ProjectBoardState {
    /// Shared Tokio runtime for async operations.
    pub(crate) runtime: Slot<SharedRuntime>,
    /// Mock GitHub GraphQL server.
    pub(crate) server: Slot<MockServer>,
    /// Personal access token for authentication.
    pub(crate) token: Slot<String>,
    /// Normalized project data from the last load.
    pub(crate) data: Slot<ProjectData>,
    /// Task returned by the last creation.
    pub(crate) created: Slot<Task>,
    /// Error from the last gateway call.
    pub(crate) error: Slot<TaskFlowError>,
}

/// Ensures the runtime and server are initialised in `ProjectBoardState`.
pub(crate) fn ensure_runtime_and_server(
    state: &ProjectBoardState,
) -> Result<SharedRuntime, TaskFlowError> {
    super::runtime::ensure_runtime_and_server(&state.runtime, &state.server).map_err(|error| {
        TaskFlowError::Io {
            message: format!("failed to create Tokio runtime: {error}"),
        }
    })
}
