//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use taskflow::{Account, Project, ProjectData, Task, TaskFlowError};

/// Writes a listing of projects to the given writer.
pub fn write_project_listing<W: Write>(
    writer: &mut W,
    projects: &[Project],
) -> Result<(), TaskFlowError> {
    if projects.is_empty() {
        return writeln!(writer, "No projects found.").map_err(|e| io_error(&e));
    }

    writeln!(writer, "Projects:").map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    for project in projects {
        let status = if project.closed { " [closed]" } else { "" };
        writeln!(
            writer,
            "  #{} {}{status} ({}) {}",
            project.number, project.title, project.owner_login, project.id
        )
        .map_err(|e| io_error(&e))?;
    }

    Ok(())
}

/// Writes the tasks and fields of one project to the given writer.
pub fn write_project_tasks<W: Write>(
    writer: &mut W,
    data: &ProjectData,
) -> Result<(), TaskFlowError> {
    writeln!(writer, "{} ({})", data.project.title, data.project.url).map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    writeln!(writer, "Fields:").map_err(|e| io_error(&e))?;
    for field in &data.custom_fields {
        writeln!(
            writer,
            "  {} [{}] {}",
            field.name,
            field.data_type.as_str(),
            field.id
        )
        .map_err(|e| io_error(&e))?;
    }

    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "Tasks ({}):", data.tasks.len()).map_err(|e| io_error(&e))?;
    for task in &data.tasks {
        write_task_line(writer, task)?;
    }

    Ok(())
}

/// Writes a one-line summary of a task followed by its set field values.
pub fn write_task_line<W: Write>(writer: &mut W, task: &Task) -> Result<(), TaskFlowError> {
    let label = if task.is_draft() {
        "draft".to_owned()
    } else {
        format!("#{}", task.number)
    };
    writeln!(writer, "  {label} [{}] {}", task.state.as_str(), task.title)
        .map_err(|e| io_error(&e))?;

    for field in &task.custom_fields {
        if let Some(value) = &field.value {
            writeln!(writer, "      {}: {}", field.field_name, value.display())
                .map_err(|e| io_error(&e))?;
        }
    }

    Ok(())
}

/// Writes the stored accounts, marking the active one.
pub fn write_account_listing<W: Write>(
    writer: &mut W,
    accounts: &[Account],
    active_id: Option<&str>,
) -> Result<(), TaskFlowError> {
    if accounts.is_empty() {
        return writeln!(writer, "No accounts stored.").map_err(|e| io_error(&e));
    }

    for account in accounts {
        let marker = if Some(account.id.as_str()) == active_id {
            "*"
        } else {
            " "
        };
        let email = account.email.as_deref().unwrap_or("no public email");
        writeln!(writer, "{marker} {} ({email})", account.username).map_err(|e| io_error(&e))?;
    }

    Ok(())
}

/// Converts a write failure into [`TaskFlowError::Io`].
pub fn io_error(error: &io::Error) -> TaskFlowError {
    TaskFlowError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use taskflow::github::models::test_support::issue_task;
    use taskflow::{
        Account, CustomFieldType, CustomFieldValue, FieldValue, Project, Task, TaskState,
    };

    use super::{write_account_listing, write_project_listing, write_task_line};

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>),
    {
        let mut buffer = Vec::new();
        write(&mut buffer);
        String::from_utf8(buffer).expect("output should be UTF-8")
    }

    #[rstest]
    fn project_listing_marks_closed_projects() {
        let projects = vec![Project {
            id: "PVT_1".to_owned(),
            number: 3,
            title: "Roadmap".to_owned(),
            url: "https://github.com/users/octo/projects/3".to_owned(),
            short_description: None,
            public: false,
            closed: true,
            owner_login: "octo".to_owned(),
        }];

        let output = render(|buffer| {
            write_project_listing(buffer, &projects).expect("write should succeed");
        });

        assert!(output.contains("#3 Roadmap [closed] (octo) PVT_1"), "{output}");
    }

    #[rstest]
    fn task_line_lists_only_set_values() {
        let task = Task {
            custom_fields: vec![
                CustomFieldValue {
                    field_id: "F_1".to_owned(),
                    field_name: "Status".to_owned(),
                    field_type: CustomFieldType::SingleSelect,
                    value: Some(FieldValue::SingleSelect("Todo".to_owned())),
                },
                CustomFieldValue {
                    field_id: "F_2".to_owned(),
                    field_name: "Estimate".to_owned(),
                    field_type: CustomFieldType::Number,
                    value: None,
                },
            ],
            ..issue_task(7, "Fix login")
        };

        let output = render(|buffer| {
            write_task_line(buffer, &task).expect("write should succeed");
        });

        assert_eq!(output, "  #7 [OPEN] Fix login\n      Status: Todo\n");
    }

    #[rstest]
    fn drafts_are_labelled_without_a_number() {
        let task = Task {
            state: TaskState::Draft,
            repository: None,
            ..issue_task(0, "Idea")
        };

        let output = render(|buffer| {
            write_task_line(buffer, &task).expect("write should succeed");
        });

        assert_eq!(output, "  draft [DRAFT] Idea\n");
    }

    #[rstest]
    fn account_listing_marks_active_account() {
        let accounts = vec![
            Account {
                id: "alice-1".to_owned(),
                username: "alice".to_owned(),
                token: "ghp_alice".to_owned(),
                email: Some("alice@example.com".to_owned()),
                avatar_url: None,
                is_active: false,
            },
            Account {
                id: "bob-2".to_owned(),
                username: "bob".to_owned(),
                token: "ghp_bob".to_owned(),
                email: None,
                avatar_url: None,
                is_active: true,
            },
        ];

        let output = render(|buffer| {
            write_account_listing(buffer, &accounts, Some("bob-2")).expect("write should succeed");
        });

        assert_eq!(
            output,
            "  alice (alice@example.com)\n* bob (no public email)\n"
        );
    }
}
