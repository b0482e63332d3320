//! Task flow CLI entrypoint for GitHub Projects.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use taskflow::{OperationMode, TaskFlowConfig, TaskFlowError};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), TaskFlowError> {
    let config = load_config()?;
    config.validate()?;
    let telemetry = cli::telemetry_sink(&config);

    match config.operation_mode() {
        OperationMode::AddAccount => cli::accounts::add(&config).await,
        OperationMode::ListAccounts => cli::accounts::list(&config),
        OperationMode::SwitchAccount => cli::accounts::switch(&config),
        OperationMode::RemoveAccount => cli::accounts::remove(&config),
        OperationMode::CreateTask => cli::tasks::create(&config, telemetry.as_ref()).await,
        OperationMode::UpdateField => cli::tasks::update_field(&config, telemetry.as_ref()).await,
        OperationMode::CloseIssue => cli::tasks::close(&config).await,
        OperationMode::TaskBranch => cli::branch::run(&config, telemetry.as_ref()).await,
        OperationMode::ProjectTasks => cli::projects::tasks(&config, telemetry.as_ref()).await,
        OperationMode::ListProjects => cli::projects::list(&config, telemetry.as_ref()).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`TaskFlowError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<TaskFlowConfig, TaskFlowError> {
    TaskFlowConfig::load().map_err(|error| TaskFlowError::Configuration {
        message: error.to_string(),
    })
}
