//! Account management operations.

use std::io::{self, Write};

use taskflow::accounts::AddAccountOutcome;
use taskflow::{
    AccountRegistry, CredentialStore, IdentityGateway, OctocrabIdentityGateway,
    PersonalAccessToken, TaskFlowConfig, TaskFlowError,
};

use super::account_registry;
use super::output::{io_error, write_account_listing};

/// Stores the configured token as an account.
///
/// # Errors
///
/// Returns [`TaskFlowError::Validation`] when no valid token is configured,
/// the identity lookup error, or [`TaskFlowError::Io`] when the accounts
/// file cannot be written.
pub async fn add(config: &TaskFlowConfig) -> Result<(), TaskFlowError> {
    let token = config.require_token()?;
    let gateway = OctocrabIdentityGateway::for_token(&token, &config.api_base()?)?;
    let registry = account_registry(config)?;
    let mut stdout = io::stdout().lock();
    add_with_gateway(&gateway, &registry, &token, &mut stdout).await
}

/// Looks up who owns `token` and stores it.
pub async fn add_with_gateway<S: CredentialStore, W: Write>(
    gateway: &dyn IdentityGateway,
    registry: &AccountRegistry<S>,
    token: &PersonalAccessToken,
    writer: &mut W,
) -> Result<(), TaskFlowError> {
    let written = match registry.add_from_gateway(gateway, token).await? {
        AddAccountOutcome::Added(account) if account.is_active => {
            writeln!(writer, "Added account {} (active)", account.username)
        }
        AddAccountOutcome::Added(account) => writeln!(writer, "Added account {}", account.username),
        AddAccountOutcome::TokenUpdated(account) => {
            writeln!(writer, "Updated token for {} (active)", account.username)
        }
    };
    written.map_err(|e| io_error(&e))
}

/// Prints stored accounts.
///
/// # Errors
///
/// Returns [`TaskFlowError::Io`] when the accounts file cannot be read.
pub fn list(config: &TaskFlowConfig) -> Result<(), TaskFlowError> {
    let registry = account_registry(config)?;
    let mut stdout = io::stdout().lock();
    list_with_registry(&registry, &mut stdout)
}

/// Prints the accounts held by `registry`.
pub fn list_with_registry<S: CredentialStore, W: Write>(
    registry: &AccountRegistry<S>,
    writer: &mut W,
) -> Result<(), TaskFlowError> {
    let accounts = registry.accounts()?;
    let active = registry.active_account()?;
    write_account_listing(writer, &accounts, active.as_ref().map(|account| account.id.as_str()))
}

/// Activates the configured account.
///
/// # Errors
///
/// Returns [`TaskFlowError::Credentials`] when the username is unknown.
pub fn switch(config: &TaskFlowConfig) -> Result<(), TaskFlowError> {
    let username = config.use_account.as_deref().unwrap_or_default();
    let registry = account_registry(config)?;
    let account = registry.switch_to(username)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Switched to {}", account.username).map_err(|e| io_error(&e))
}

/// Removes the configured account.
///
/// # Errors
///
/// Returns [`TaskFlowError::Credentials`] when the username is unknown.
pub fn remove(config: &TaskFlowConfig) -> Result<(), TaskFlowError> {
    let username = config.remove_account.as_deref().unwrap_or_default();
    let registry = account_registry(config)?;
    let mut stdout = io::stdout().lock();
    remove_with_registry(&registry, username, &mut stdout)
}

/// Removes `username` from `registry` and reports the new active account.
pub fn remove_with_registry<S: CredentialStore, W: Write>(
    registry: &AccountRegistry<S>,
    username: &str,
    writer: &mut W,
) -> Result<(), TaskFlowError> {
    let removed = registry.remove(username)?;
    writeln!(writer, "Removed account {}", removed.username).map_err(|e| io_error(&e))?;
    if let Some(active) = registry.active_account()? {
        writeln!(writer, "Active account: {}", active.username).map_err(|e| io_error(&e))?;
    }
    Ok(())
}
