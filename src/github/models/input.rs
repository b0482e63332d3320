//! Parameters accepted by the mutating gateway operations.

use chrono::NaiveDate;
use serde_json::{Value, json};

use super::{CustomFieldDefinition, CustomFieldType};
use crate::github::error::ValidationError;
use crate::github::token::RepositorySlug;

/// Parameters for creating a task.
///
/// Without a repository the task becomes a draft issue in `project_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskParams {
    title: String,
    body: Option<String>,
    repository: Option<RepositorySlug>,
    assignee_ids: Vec<String>,
    project_id: Option<String>,
}

impl CreateTaskParams {
    /// Starts a parameter set with the given title.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            body: None,
            repository: None,
            assignee_ids: Vec::new(),
            project_id: None,
        })
    }

    /// Sets the issue body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Targets a repository; the task becomes a real issue.
    #[must_use]
    pub fn with_repository(mut self, repository: Option<RepositorySlug>) -> Self {
        self.repository = repository;
        self
    }

    /// Adds the project the task should appear in.
    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Sets the node ids of the users to assign.
    #[must_use]
    pub fn with_assignee_ids(mut self, assignee_ids: Vec<String>) -> Self {
        self.assignee_ids = assignee_ids;
        self
    }

    /// Title of the task.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body of the task, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Target repository, if any.
    #[must_use]
    pub const fn repository(&self) -> Option<&RepositorySlug> {
        self.repository.as_ref()
    }

    /// Assignee node ids.
    #[must_use]
    pub fn assignee_ids(&self) -> &[String] {
        &self.assignee_ids
    }

    /// Target project id, if any.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }
}

/// New value for a project item field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValueInput {
    /// Text value.
    Text(String),
    /// Number value.
    Number(f64),
    /// Date value.
    Date(NaiveDate),
    /// Id of a single-select option.
    SingleSelectOptionId(String),
    /// Id of an iteration.
    IterationId(String),
}

impl FieldValueInput {
    /// Converts user text into a value suited to the field's data type.
    ///
    /// Single-select values are matched against option names and resolved
    /// to the option id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFieldValue`] when a number or date
    /// does not parse or a number is not finite, or [`ValidationError::UnknownOption`] when no option
    /// of a single-select field has the given name.
    pub fn parse_for(field: &CustomFieldDefinition, raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        match field.data_type {
            CustomFieldType::Number => {
                let invalid = |message: String| ValidationError::InvalidFieldValue {
                    field: field.name.clone(),
                    message,
                };
                let number = trimmed
                    .parse::<f64>()
                    .map_err(|error| invalid(error.to_string()))?;
                if number.is_finite() {
                    Ok(Self::Number(number))
                } else {
                    Err(invalid(format!("'{trimmed}' is not a finite number")))
                }
            }
            CustomFieldType::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(Self::Date)
                .map_err(|error| ValidationError::InvalidFieldValue {
                    field: field.name.clone(),
                    message: format!("expected YYYY-MM-DD: {error}"),
                }),
            CustomFieldType::SingleSelect => field
                .option_named(trimmed)
                .map(|option| Self::SingleSelectOptionId(option.id.clone()))
                .ok_or_else(|| ValidationError::UnknownOption {
                    field: field.name.clone(),
                    option: trimmed.to_owned(),
                }),
            CustomFieldType::Iteration => Ok(Self::IterationId(trimmed.to_owned())),
            _ => Ok(Self::Text(raw.to_owned())),
        }
    }

    /// Builds the `ProjectV2FieldValue` input object.
    pub(crate) fn to_graphql(&self) -> Value {
        match self {
            Self::Text(text) => json!({ "text": text }),
            Self::Number(number) => json!({ "number": number }),
            Self::Date(date) => json!({ "date": date.format("%Y-%m-%d").to_string() }),
            Self::SingleSelectOptionId(id) => json!({ "singleSelectOptionId": id }),
            Self::IterationId(id) => json!({ "iterationId": id }),
        }
    }
}

/// Parameters for setting or clearing one field on a project item.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTaskFieldParams {
    /// Project that owns the item.
    pub project_id: String,
    /// Project item id (not the issue id).
    pub project_item_id: String,
    /// Field to change.
    pub field_id: String,
    /// New value; `None` clears the field.
    pub value: Option<FieldValueInput>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;
    use serde_json::json;

    use super::{CreateTaskParams, FieldValueInput};
    use crate::github::error::ValidationError;
    use crate::github::models::{CustomFieldDefinition, CustomFieldOption, CustomFieldType};

    fn field(data_type: CustomFieldType) -> CustomFieldDefinition {
        let options = matches!(data_type, CustomFieldType::SingleSelect).then(|| {
            vec![
                CustomFieldOption {
                    id: "OPT_LOW".to_owned(),
                    name: "Low".to_owned(),
                    color: None,
                },
                CustomFieldOption {
                    id: "OPT_HIGH".to_owned(),
                    name: "High".to_owned(),
                    color: Some("RED".to_owned()),
                },
            ]
        });
        CustomFieldDefinition {
            id: "F_1".to_owned(),
            name: "Estimate".to_owned(),
            data_type,
            options,
        }
    }

    #[rstest]
    #[case::text(CustomFieldType::Text, "hello", FieldValueInput::Text("hello".to_owned()))]
    #[case::number(CustomFieldType::Number, " 3.5 ", FieldValueInput::Number(3.5))]
    #[case::select_ignores_case(
        CustomFieldType::SingleSelect,
        "high",
        FieldValueInput::SingleSelectOptionId("OPT_HIGH".to_owned())
    )]
    #[case::iteration(
        CustomFieldType::Iteration,
        "ITER_9",
        FieldValueInput::IterationId("ITER_9".to_owned())
    )]
    #[case::labels_fall_back_to_text(
        CustomFieldType::Labels,
        "bug",
        FieldValueInput::Text("bug".to_owned())
    )]
    fn parses_raw_value_for_field_type(
        #[case] data_type: CustomFieldType,
        #[case] raw: &str,
        #[case] expected: FieldValueInput,
    ) {
        let parsed = FieldValueInput::parse_for(&field(data_type), raw).expect("value should parse");

        assert_eq!(parsed, expected);
    }

    #[test]
    fn parses_iso_dates() {
        let parsed = FieldValueInput::parse_for(&field(CustomFieldType::Date), "2024-03-01")
            .expect("date should parse");

        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).expect("date should be valid");
        assert_eq!(parsed, FieldValueInput::Date(expected));
        assert_eq!(parsed.to_graphql(), json!({ "date": "2024-03-01" }));
    }

    #[rstest]
    #[case::bad_number(CustomFieldType::Number, "many")]
    #[case::not_a_number(CustomFieldType::Number, "NaN")]
    #[case::infinite(CustomFieldType::Number, "inf")]
    #[case::negative_infinite(CustomFieldType::Number, "-infinity")]
    #[case::bad_date(CustomFieldType::Date, "01/03/2024")]
    fn rejects_unparsable_values(#[case] data_type: CustomFieldType, #[case] raw: &str) {
        let result = FieldValueInput::parse_for(&field(data_type), raw);

        assert!(
            matches!(result, Err(ValidationError::InvalidFieldValue { ref field, .. }) if field == "Estimate"),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn rejects_unknown_option() {
        let result = FieldValueInput::parse_for(&field(CustomFieldType::SingleSelect), "Urgent");

        assert_eq!(
            result,
            Err(ValidationError::UnknownOption {
                field: "Estimate".to_owned(),
                option: "Urgent".to_owned(),
            })
        );
    }

    #[test]
    fn select_value_serializes_as_option_id() {
        let input = FieldValueInput::SingleSelectOptionId("OPT_LOW".to_owned());

        assert_eq!(input.to_graphql(), json!({ "singleSelectOptionId": "OPT_LOW" }));
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    fn blank_titles_are_rejected(#[case] title: &str) {
        assert_eq!(CreateTaskParams::new(title), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn title_is_trimmed_and_defaults_to_draft() {
        let params = CreateTaskParams::new("  Write docs ").expect("title should be accepted");

        assert_eq!(params.title(), "Write docs");
        assert!(params.repository().is_none());
        assert!(params.project_id().is_none());
        assert!(params.assignee_ids().is_empty());
    }
}
