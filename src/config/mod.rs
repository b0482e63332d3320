//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.taskflow.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `TASKFLOW_TOKEN`, `TASKFLOW_PROJECT_ID`,
//!    and so on, or legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--token`/`-t`, `--project-id`/`-p`, ...
//!
//! # Configuration File
//!
//! ```toml
//! project_id = "PVT_kwDOABCD"
//! repo = "octocat/hello-world"
//! accounts_file = "/home/octocat/.config/taskflow/accounts.json"
//! telemetry = true
//! ```

use std::env;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::TaskFlowError;
use crate::github::token::{ApiBase, DEFAULT_API_BASE, PersonalAccessToken, RepositorySlug};

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Store the configured token as an account.
    AddAccount,
    /// Print stored accounts.
    ListAccounts,
    /// Make another stored account active.
    SwitchAccount,
    /// Forget a stored account.
    RemoveAccount,
    /// Create an issue or draft issue.
    CreateTask,
    /// Set or clear a custom field on a project item.
    UpdateField,
    /// Close an issue.
    CloseIssue,
    /// Create or check out the branch for a task.
    TaskBranch,
    /// Print the tasks and fields of one project.
    ProjectTasks,
    /// Print the projects visible to the account.
    ListProjects,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use taskflow::TaskFlowConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = TaskFlowConfig::load().expect("failed to load configuration");
/// let mode = config.operation_mode();
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "TASKFLOW",
    discovery(
        dotfile_name = ".taskflow.toml",
        config_file_name = "taskflow.toml",
        app_name = "taskflow"
    )
)]
pub struct TaskFlowConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `TASKFLOW_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    ///
    /// Without a token the active stored account is used.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Base URL of the GitHub API. Defaults to `https://api.github.com`.
    #[ortho_config()]
    pub api_base: String,

    /// Location of the accounts file.
    ///
    /// Defaults to `$HOME/.config/taskflow/accounts.json`.
    #[ortho_config()]
    pub accounts_file: Option<String>,

    /// Project node id, for example `PVT_kwDOABCD`.
    #[ortho_config(cli_short = 'p')]
    pub project_id: Option<String>,

    /// Title of the task to create.
    #[ortho_config(cli_short = 'T')]
    pub title: Option<String>,

    /// Body of the task to create.
    #[ortho_config(cli_short = 'b')]
    pub body: Option<String>,

    /// Repository for new issues, as `owner/repo`.
    ///
    /// Without it, tasks are created as draft issues.
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Comma separated user node ids to assign to a new issue.
    #[ortho_config()]
    pub assignees: Option<String>,

    /// Project item id whose field is updated.
    #[ortho_config(cli_short = 'i')]
    pub item_id: Option<String>,

    /// Field id to update.
    #[ortho_config(cli_short = 'f')]
    pub field_id: Option<String>,

    /// New field value, parsed against the field's type.
    #[ortho_config(cli_short = 'v')]
    pub value: Option<String>,

    /// Clears the field instead of setting `value`.
    ///
    /// Note: `TASKFLOW_CLEAR_FIELD` is not supported because `ortho_config`
    /// does not load boolean values from the environment.
    #[ortho_config()]
    pub clear_field: bool,

    /// Issue node id to close.
    #[ortho_config()]
    pub close_issue: Option<String>,

    /// Task number whose branch is created or checked out.
    #[ortho_config(cli_short = 'B')]
    pub branch_for: Option<u64>,

    /// Stores `token` as an account.
    #[ortho_config()]
    pub add_account: bool,

    /// Lists stored accounts.
    #[ortho_config(cli_short = 'l')]
    pub list_accounts: bool,

    /// Username of the stored account to activate.
    #[ortho_config(cli_short = 'u')]
    pub use_account: Option<String>,

    /// Username of the stored account to remove.
    #[ortho_config()]
    pub remove_account: Option<String>,

    /// Emits telemetry events as JSON lines on stderr.
    #[ortho_config()]
    pub telemetry: bool,
}

impl Default for TaskFlowConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: DEFAULT_API_BASE.to_owned(),
            accounts_file: None,
            project_id: None,
            title: None,
            body: None,
            repo: None,
            assignees: None,
            item_id: None,
            field_id: None,
            value: None,
            clear_field: false,
            close_issue: None,
            branch_for: None,
            add_account: false,
            list_accounts: false,
            use_account: None,
            remove_account: None,
            telemetry: false,
        }
    }
}

const ACCOUNTS_FILE_RELATIVE: &str = ".config/taskflow/accounts.json";

impl TaskFlowConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    #[must_use]
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .filter(|token| !token.trim().is_empty())
    }

    /// Validated form of [`resolve_token`](Self::resolve_token).
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Validation`] when a token is present but
    /// malformed.
    pub fn personal_access_token(&self) -> Result<Option<PersonalAccessToken>, TaskFlowError> {
        self.resolve_token()
            .map(PersonalAccessToken::new)
            .transpose()
            .map_err(TaskFlowError::from)
    }

    /// Like [`personal_access_token`](Self::personal_access_token) but the
    /// token must be present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Validation`] when no token is configured or
    /// it is malformed.
    pub fn require_token(&self) -> Result<PersonalAccessToken, TaskFlowError> {
        let token = self.resolve_token().unwrap_or_default();
        Ok(PersonalAccessToken::new(token)?)
    }

    /// Parsed API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Validation`] when the URL is not usable.
    pub fn api_base(&self) -> Result<ApiBase, TaskFlowError> {
        Ok(ApiBase::parse(&self.api_base)?)
    }

    /// Path of the accounts file.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Configuration`] when no file is configured and
    /// `HOME` is unset.
    pub fn accounts_path(&self) -> Result<Utf8PathBuf, TaskFlowError> {
        if let Some(path) = &self.accounts_file {
            return Ok(Utf8PathBuf::from(path));
        }
        let home = env::var("HOME").map_err(|_| TaskFlowError::Configuration {
            message: "HOME is not set; use --accounts-file".to_owned(),
        })?;
        Ok(Utf8PathBuf::from(home).join(ACCOUNTS_FILE_RELATIVE))
    }

    /// Returns the project id or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Configuration`] when no project is configured.
    pub fn require_project_id(&self) -> Result<&str, TaskFlowError> {
        self.project_id
            .as_deref()
            .ok_or_else(|| TaskFlowError::Configuration {
                message: "project id is required (use --project-id or -p)".to_owned(),
            })
    }

    /// Parsed repository for new issues, if configured. A blank value
    /// counts as unset.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Validation`] when `repo` is not `owner/repo`.
    pub fn repository(&self) -> Result<Option<RepositorySlug>, TaskFlowError> {
        Ok(self
            .repo
            .as_deref()
            .filter(|repo| !repo.trim().is_empty())
            .map(RepositorySlug::parse)
            .transpose()?)
    }

    /// Assignee ids split on commas, blanks removed.
    #[must_use]
    pub fn assignee_ids(&self) -> Vec<String> {
        self.assignees
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Determines the operation mode based on provided configuration.
    ///
    /// Account management flags win over task operations. A bare project id
    /// lists its tasks, and with nothing set the projects are listed.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.add_account {
            OperationMode::AddAccount
        } else if self.list_accounts {
            OperationMode::ListAccounts
        } else if self.use_account.is_some() {
            OperationMode::SwitchAccount
        } else if self.remove_account.is_some() {
            OperationMode::RemoveAccount
        } else if self.close_issue.is_some() {
            OperationMode::CloseIssue
        } else if self.title.is_some() {
            OperationMode::CreateTask
        } else if self.item_id.is_some() && self.field_id.is_some() {
            OperationMode::UpdateField
        } else if self.branch_for.is_some() {
            OperationMode::TaskBranch
        } else if self.project_id.is_some() {
            OperationMode::ProjectTasks
        } else {
            OperationMode::ListProjects
        }
    }

    /// Checks that the options needed by the selected mode are present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Configuration`] describing the first missing
    /// or conflicting option.
    pub fn validate(&self) -> Result<(), TaskFlowError> {
        match self.operation_mode() {
            OperationMode::UpdateField | OperationMode::TaskBranch => {
                self.require_project_id()?;
            }
            _ => {}
        }
        if self.operation_mode() == OperationMode::UpdateField
            && self.clear_field == self.value.is_some()
        {
            return Err(TaskFlowError::Configuration {
                message: "field update needs exactly one of --value or --clear-field".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
