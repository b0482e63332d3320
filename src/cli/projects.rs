//! Project listing and project task listing operations.

use std::io::{self, Write};

use taskflow::telemetry::{TelemetryEvent, TelemetrySink};
use taskflow::{ProjectsGateway, TaskFlowConfig, TaskFlowError};

use super::open_session;
use super::output::{write_project_listing, write_project_tasks};

/// Lists the projects visible to the current account.
///
/// # Errors
///
/// Returns [`TaskFlowError::Credentials`] when no account is available, or
/// the gateway error when the request fails.
pub async fn list(
    config: &TaskFlowConfig,
    telemetry: &dyn TelemetrySink,
) -> Result<(), TaskFlowError> {
    let session = open_session(config)?;
    let mut stdout = io::stdout().lock();
    list_with_gateway(session.gateway(), telemetry, &mut stdout).await
}

/// Lists projects through the given gateway.
///
/// This function is exposed for testing with fake gateways.
pub async fn list_with_gateway<W: Write>(
    gateway: &dyn ProjectsGateway,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<(), TaskFlowError> {
    let projects = gateway.list_projects().await?;
    telemetry.record(TelemetryEvent::ProjectsListed {
        count: projects.len(),
    });
    write_project_listing(writer, &projects)
}

/// Prints the fields and tasks of the configured project.
///
/// # Errors
///
/// Returns [`TaskFlowError::Configuration`] when no project id is set, or
/// the gateway error when the request fails.
pub async fn tasks(
    config: &TaskFlowConfig,
    telemetry: &dyn TelemetrySink,
) -> Result<(), TaskFlowError> {
    let project_id = config.require_project_id()?;
    let session = open_session(config)?;
    let mut stdout = io::stdout().lock();
    tasks_with_gateway(session.gateway(), project_id, telemetry, &mut stdout).await
}

/// Prints a project's tasks through the given gateway.
pub async fn tasks_with_gateway<W: Write>(
    gateway: &dyn ProjectsGateway,
    project_id: &str,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<(), TaskFlowError> {
    let data = gateway.fetch_project_data(project_id).await?;
    telemetry.record(TelemetryEvent::ProjectDataLoaded {
        project_id: data.project.id.clone(),
        tasks: data.tasks.len(),
        fields: data.custom_fields.len(),
    });
    write_project_tasks(writer, &data)
}
