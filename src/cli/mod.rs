//! CLI operation mode handlers.
//!
//! This module contains the implementations for different operation modes:
//! - [`accounts`]: Add, list, switch and remove stored accounts
//! - [`branch`]: Create or check out the branch for a task
//! - [`projects`]: List projects and the tasks of one project
//! - [`tasks`]: Create tasks, update fields and close issues
//!
//! Output formatting utilities are in [`output`].

use std::sync::Arc;

use taskflow::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use taskflow::{AccountRegistry, FileCredentialStore, Session, TaskFlowConfig, TaskFlowError};

pub mod accounts;
pub mod branch;
pub mod output;
pub mod projects;
pub mod tasks;

#[cfg(test)]
pub mod test_utils;

/// Returns the telemetry sink selected by configuration.
pub fn telemetry_sink(config: &TaskFlowConfig) -> Arc<dyn TelemetrySink> {
    if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    }
}

/// Opens the account registry at the configured location.
///
/// # Errors
///
/// Returns [`TaskFlowError::Configuration`] when no accounts path can be
/// determined.
pub fn account_registry(
    config: &TaskFlowConfig,
) -> Result<AccountRegistry<FileCredentialStore>, TaskFlowError> {
    let path = config.accounts_path()?;
    Ok(AccountRegistry::new(FileCredentialStore::new(path)))
}

/// Builds the session for this invocation from the token or active account.
///
/// # Errors
///
/// Returns [`TaskFlowError::Credentials`] when neither a token nor a stored
/// account is available, or a validation error for a malformed token.
pub fn open_session(config: &TaskFlowConfig) -> Result<Session, TaskFlowError> {
    let token = config.personal_access_token()?;
    let api_base = config.api_base()?;
    let registry = account_registry(config)?;
    Session::resolve(token.as_ref(), &registry, &api_base)
}
