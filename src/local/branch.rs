//! Branch naming for tasks.
//!
//! A task's branch is `<kind>/<number>-<slug>`, where the kind comes from a
//! "work type" style field on the task and the slug from its title.

use crate::github::models::Task;

const MAX_SLUG_LEN: usize = 50;

/// Kind of work a branch carries, used as its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// New functionality; the default.
    Feature,
    /// Bug fix.
    Bugfix,
    /// Urgent production fix.
    Hotfix,
    /// Administrative or maintenance work.
    Chore,
    /// Documentation.
    Docs,
}

impl BranchKind {
    /// Classifies a work type value such as `"Bug"` or `"Documentation"`.
    #[must_use]
    pub fn from_work_type(work_type: &str) -> Self {
        let lowered = work_type.to_lowercase();
        if lowered.contains("bug") {
            Self::Bugfix
        } else if lowered.contains("hotfix") {
            Self::Hotfix
        } else if lowered.contains("admin") {
            Self::Chore
        } else if lowered.contains("doc") {
            Self::Docs
        } else {
            Self::Feature
        }
    }

    /// Picks the kind from the first work type field that has a value.
    #[must_use]
    pub fn for_task(task: &Task) -> Self {
        task.custom_fields
            .iter()
            .find(|field| is_work_type_field(&field.field_name))
            .and_then(|field| field.value.as_ref())
            .map_or(Self::Feature, |value| Self::from_work_type(&value.display()))
    }

    /// Branch prefix for this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Bugfix => "bugfix",
            Self::Hotfix => "hotfix",
            Self::Chore => "chore",
            Self::Docs => "docs",
        }
    }
}

fn is_work_type_field(field_name: &str) -> bool {
    let lowered = field_name.to_lowercase();
    lowered.contains("tipo") || lowered.contains("work type")
}

/// Reduces a title to lowercase ASCII letters, digits and hyphens.
///
/// Whitespace runs become a single `-` and the result is cut to 50
/// characters. Leading and trailing separators are kept.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for character in title.to_lowercase().chars() {
        if character.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else if character.is_ascii_lowercase() || character.is_ascii_digit() || character == '-'
        {
            slug.push(character);
            in_whitespace = false;
        }
    }
    slug.chars().take(MAX_SLUG_LEN).collect()
}

/// Generates the branch name for a task.
///
/// # Examples
///
/// ```
/// use taskflow::github::models::test_support::issue_task;
/// use taskflow::local::branch_name_for;
///
/// let task = issue_task(42, "Fix login on Safari!");
/// assert_eq!(branch_name_for(&task), "feature/42-fix-login-on-safari");
/// ```
#[must_use]
pub fn branch_name_for(task: &Task) -> String {
    format!(
        "{prefix}/{number}-{slug}",
        prefix = BranchKind::for_task(task).prefix(),
        number = task.number,
        slug = slugify(&task.title)
    )
}

/// Finds the first branch that mentions `number` between `/` or `-`
/// delimiters, e.g. `feature/42-x` or `fix-42-y` for task 42.
#[must_use]
pub fn find_branch_for_task(branches: &[String], number: u64) -> Option<&str> {
    let needle = number.to_string();
    branches
        .iter()
        .map(String::as_str)
        .find(|branch| contains_delimited(branch, &needle))
}

fn contains_delimited(haystack: &str, needle: &str) -> bool {
    let is_delimiter = |character: char| matches!(character, '/' | '-');
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack
            .get(..start)
            .and_then(|head| head.chars().next_back());
        let after = haystack
            .get(start + needle.len()..)
            .and_then(|tail| tail.chars().next());
        before.is_some_and(is_delimiter) && after.is_some_and(is_delimiter)
    })
}
