//! Task creation, field update and issue closing operations.

use std::io::{self, Write};

use taskflow::telemetry::{TelemetryEvent, TelemetrySink};
use taskflow::{
    CreateTaskParams, FieldValueInput, ProjectsGateway, TaskFlowConfig, TaskFlowError,
    UpdateTaskFieldParams,
};

use super::open_session;
use super::output::io_error;

/// Builds task creation parameters from configuration.
///
/// # Errors
///
/// Returns [`TaskFlowError::Validation`] for a blank title or a malformed
/// repository.
pub fn create_params(config: &TaskFlowConfig) -> Result<CreateTaskParams, TaskFlowError> {
    let title = config.title.as_deref().unwrap_or_default();
    let mut params = CreateTaskParams::new(title)?
        .with_repository(config.repository()?)
        .with_assignee_ids(config.assignee_ids());
    if let Some(body) = &config.body {
        params = params.with_body(body.clone());
    }
    if let Some(project_id) = &config.project_id {
        params = params.with_project(project_id.clone());
    }
    Ok(params)
}

/// Creates the configured task.
///
/// # Errors
///
/// Returns validation errors for bad input, or the gateway error when the
/// creation or project attachment fails.
pub async fn create(
    config: &TaskFlowConfig,
    telemetry: &dyn TelemetrySink,
) -> Result<(), TaskFlowError> {
    let params = create_params(config)?;
    let session = open_session(config)?;
    let mut stdout = io::stdout().lock();
    create_with_gateway(session.gateway(), &params, telemetry, &mut stdout).await
}

/// Creates a task through the given gateway.
pub async fn create_with_gateway<W: Write>(
    gateway: &dyn ProjectsGateway,
    params: &CreateTaskParams,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<(), TaskFlowError> {
    let task = gateway.create_issue(params).await?;
    telemetry.record(TelemetryEvent::TaskCreated {
        number: task.number,
        draft: task.is_draft(),
    });

    if task.is_draft() {
        writeln!(writer, "Created draft issue: {}", task.title).map_err(|e| io_error(&e))?;
    } else {
        writeln!(writer, "Created issue #{}: {}", task.number, task.title)
            .map_err(|e| io_error(&e))?;
        writeln!(writer, "URL: {}", task.url).map_err(|e| io_error(&e))?;
    }
    if let Some(item_id) = &task.project_item_id {
        writeln!(writer, "Project item: {item_id}").map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Sets or clears the configured field.
///
/// # Errors
///
/// Returns [`TaskFlowError::Configuration`] when required options are
/// missing or the field is unknown, a validation error when the value does
/// not suit the field, or the gateway error.
pub async fn update_field(
    config: &TaskFlowConfig,
    telemetry: &dyn TelemetrySink,
) -> Result<(), TaskFlowError> {
    let request = FieldUpdateRequest::from_config(config)?;
    let session = open_session(config)?;
    let mut stdout = io::stdout().lock();
    update_field_with_gateway(session.gateway(), &request, telemetry, &mut stdout).await
}

/// A field change as entered by the user, before the value is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdateRequest {
    /// Project that owns the item.
    pub project_id: String,
    /// Project item id.
    pub item_id: String,
    /// Field id.
    pub field_id: String,
    /// Raw value; `None` clears the field.
    pub raw_value: Option<String>,
}

impl FieldUpdateRequest {
    /// Reads the request from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Configuration`] when the project, item or
    /// field id is missing.
    pub fn from_config(config: &TaskFlowConfig) -> Result<Self, TaskFlowError> {
        let project_id = config.require_project_id()?.to_owned();
        let (Some(item_id), Some(field_id)) = (&config.item_id, &config.field_id) else {
            return Err(TaskFlowError::Configuration {
                message: "field update needs --item-id and --field-id".to_owned(),
            });
        };
        let raw_value = if config.clear_field {
            None
        } else {
            config.value.clone()
        };
        Ok(Self {
            project_id,
            item_id: item_id.clone(),
            field_id: field_id.clone(),
            raw_value,
        })
    }
}

/// Resolves the field definition, parses the value and applies the change.
pub async fn update_field_with_gateway<W: Write>(
    gateway: &dyn ProjectsGateway,
    request: &FieldUpdateRequest,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<(), TaskFlowError> {
    let data = gateway.fetch_project_data(&request.project_id).await?;
    let field = data
        .field(&request.field_id)
        .ok_or_else(|| TaskFlowError::Configuration {
            message: format!(
                "project {} has no field {}",
                request.project_id, request.field_id
            ),
        })?;
    let value = request
        .raw_value
        .as_deref()
        .map(|raw| FieldValueInput::parse_for(field, raw))
        .transpose()?;
    let cleared = value.is_none();

    gateway
        .update_task_field(&UpdateTaskFieldParams {
            project_id: request.project_id.clone(),
            project_item_id: request.item_id.clone(),
            field_id: request.field_id.clone(),
            value,
        })
        .await?;
    telemetry.record(TelemetryEvent::FieldUpdated {
        item_id: request.item_id.clone(),
        cleared,
    });

    let verb = if cleared { "Cleared" } else { "Updated" };
    writeln!(writer, "{verb} {} on {}", field.name, request.item_id).map_err(|e| io_error(&e))
}

/// Closes the configured issue.
///
/// # Errors
///
/// Returns the gateway error when the mutation fails.
pub async fn close(config: &TaskFlowConfig) -> Result<(), TaskFlowError> {
    let Some(issue_id) = config.close_issue.as_deref() else {
        return Err(TaskFlowError::Configuration {
            message: "issue id is required (use --close-issue)".to_owned(),
        });
    };
    let session = open_session(config)?;
    let mut stdout = io::stdout().lock();
    close_with_gateway(session.gateway(), issue_id, &mut stdout).await
}

/// Closes an issue through the given gateway.
pub async fn close_with_gateway<W: Write>(
    gateway: &dyn ProjectsGateway,
    issue_id: &str,
    writer: &mut W,
) -> Result<(), TaskFlowError> {
    gateway.close_issue(issue_id).await?;
    writeln!(writer, "Closed issue {issue_id}").map_err(|e| io_error(&e))
}
