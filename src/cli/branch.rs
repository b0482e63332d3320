//! Task branch operation.

use std::io::{self, Write};
use std::path::Path;

use taskflow::local::{BranchCheckout, Git2Operations, GitOperations, checkout_task_branch};
use taskflow::telemetry::{TelemetryEvent, TelemetrySink};
use taskflow::{ProjectsGateway, TaskFlowConfig, TaskFlowError};

use super::open_session;
use super::output::io_error;

/// Creates or checks out the branch for the configured task.
///
/// # Errors
///
/// Returns [`TaskFlowError::Git`] when the current directory is not a
/// repository or has uncommitted changes, and
/// [`TaskFlowError::Configuration`] when the task is not on the project.
pub async fn run(config: &TaskFlowConfig, telemetry: &dyn TelemetrySink) -> Result<(), TaskFlowError> {
    let project_id = config.require_project_id()?;
    let Some(number) = config.branch_for else {
        return Err(TaskFlowError::Configuration {
            message: "task number is required (use --branch-for or -B)".to_owned(),
        });
    };
    let git = Git2Operations::discover(Path::new("."))?;
    let session = open_session(config)?;
    let mut stdout = io::stdout().lock();
    let target = BranchTarget { project_id, number };
    run_with(session.gateway(), &git, target, telemetry, &mut stdout).await
}

/// The task whose branch is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchTarget<'a> {
    /// Project holding the task.
    pub project_id: &'a str,
    /// Issue number of the task.
    pub number: u64,
}

/// Switches to the task's branch, creating it when none exists yet.
///
/// A dirty working tree is refused before any branch is touched.
pub async fn run_with<W: Write>(
    gateway: &dyn ProjectsGateway,
    git: &dyn GitOperations,
    target: BranchTarget<'_>,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<(), TaskFlowError> {
    let data = gateway.fetch_project_data(target.project_id).await?;
    let task = data
        .tasks
        .iter()
        .find(|task| !task.is_draft() && task.number == target.number)
        .ok_or_else(|| TaskFlowError::Configuration {
            message: format!(
                "issue #{} is not on project {}",
                target.number, target.project_id
            ),
        })?;

    let outcome = checkout_task_branch(git, task)?;
    let (verb, created) = match &outcome {
        BranchCheckout::AlreadyOn(name) => {
            return writeln!(writer, "Already on {name}").map_err(|e| io_error(&e));
        }
        BranchCheckout::Switched(_) => ("Switched to", false),
        BranchCheckout::Created(_) => ("Created", true),
    };
    let name = outcome.name();
    tracing::debug!("checked out {name} for issue #{}", target.number);
    telemetry.record(TelemetryEvent::BranchCheckedOut {
        name: name.to_owned(),
        created,
    });

    writeln!(writer, "{verb} branch {name}").map_err(|e| io_error(&e))
}

#[cfg(test)]
mod tests {
    use taskflow::github::models::test_support::{
        issue_content, item, plain_field, project_payload, single_select_field,
        single_select_value,
    };
    use taskflow::local::GitOperationError;
    use taskflow::telemetry::TelemetryEvent;
    use taskflow::{TaskFlowError, normalize_project_payload};

    use super::{BranchTarget, run_with};
    use crate::cli::test_utils::{FakeGit, FakeProjectsGateway, RecordingSink};

    const TARGET: BranchTarget<'static> = BranchTarget {
        project_id: "PVT_1",
        number: 42,
    };

    fn board_with_bug() -> FakeProjectsGateway {
        let payload = project_payload(
            "PVT_1",
            vec![
                plain_field("F_TITLE", "Title", "TITLE"),
                single_select_field("F_TYPE", "Work Type", &[("OPT_1", "Bug")]),
            ],
            vec![item(
                "PVTI_42",
                issue_content("I_42", 42, "Login fails on Safari", "octo", "app"),
                vec![single_select_value("F_TYPE", "Work Type", "Bug")],
            )],
        );
        let data = normalize_project_payload(payload).expect("payload should normalize");
        FakeProjectsGateway::with_project_data(data)
    }

    #[tokio::test]
    async fn creates_branch_named_after_task() {
        let git = FakeGit::with_branches(&["feature/420-other"]);
        let sink = RecordingSink::default();
        let mut buffer = Vec::new();

        run_with(&board_with_bug(), &git, TARGET, &sink, &mut buffer)
            .await
            .expect("branch should be created");

        assert_eq!(git.current().as_deref(), Some("bugfix/42-login-fails-on-safari"));
        assert_eq!(
            String::from_utf8(buffer).expect("output should be UTF-8"),
            "Created branch bugfix/42-login-fails-on-safari\n"
        );
        assert_eq!(
            sink.take(),
            vec![TelemetryEvent::BranchCheckedOut {
                name: "bugfix/42-login-fails-on-safari".to_owned(),
                created: true
            }]
        );
    }

    #[tokio::test]
    async fn switches_to_existing_branch() {
        let git = FakeGit::with_branches(&["feature/42-older-title"]);
        let mut buffer = Vec::new();

        run_with(
            &board_with_bug(),
            &git,
            TARGET,
            &RecordingSink::default(),
            &mut buffer,
        )
        .await
        .expect("branch should be checked out");

        assert_eq!(git.current().as_deref(), Some("feature/42-older-title"));
        assert_eq!(
            String::from_utf8(buffer).expect("output should be UTF-8"),
            "Switched to branch feature/42-older-title\n"
        );
    }

    #[tokio::test]
    async fn refuses_dirty_working_tree() {
        let git = FakeGit {
            dirty: true,
            ..FakeGit::with_branches(&[])
        };
        let mut buffer = Vec::new();

        let result = run_with(
            &board_with_bug(),
            &git,
            TARGET,
            &RecordingSink::default(),
            &mut buffer,
        )
        .await;

        assert_eq!(
            result,
            Err(TaskFlowError::Git(GitOperationError::UncommittedChanges))
        );
        assert_eq!(git.current().as_deref(), Some("main"));
    }

    #[tokio::test]
    async fn already_on_branch_needs_no_clean_tree() {
        let git = FakeGit {
            dirty: true,
            ..FakeGit::with_branches(&["bugfix/42-login"])
        };
        git.current
            .lock()
            .expect("current branch mutex should be available")
            .replace("bugfix/42-login".to_owned());
        let mut buffer = Vec::new();

        run_with(
            &board_with_bug(),
            &git,
            TARGET,
            &RecordingSink::default(),
            &mut buffer,
        )
        .await
        .expect("staying on the branch should succeed");

        assert_eq!(
            String::from_utf8(buffer).expect("output should be UTF-8"),
            "Already on bugfix/42-login\n"
        );
    }

    #[tokio::test]
    async fn unknown_task_is_reported() {
        let git = FakeGit::with_branches(&[]);
        let mut buffer = Vec::new();
        let target = BranchTarget {
            number: 7,
            ..TARGET
        };

        let result = run_with(
            &board_with_bug(),
            &git,
            target,
            &RecordingSink::default(),
            &mut buffer,
        )
        .await;

        assert!(matches!(result, Err(TaskFlowError::Configuration { .. })));
    }
}
