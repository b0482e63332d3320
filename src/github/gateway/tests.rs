//! Tests for the Octocrab projects and identity gateways.

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{
    IdentityGateway, OctocrabIdentityGateway, OctocrabProjectsGateway, ProjectsGateway,
};
use crate::github::error::{FailureCause, Operation, TaskFlowError, ValidationError};
use crate::github::models::test_support::{
    issue_content, item, plain_field, project_payload, project_summary, text_value,
};
use crate::github::models::{
    CreateTaskParams, CustomFieldType, FieldValue, FieldValueInput, TaskState,
    UpdateTaskFieldParams,
};
use crate::github::token::{ApiBase, PersonalAccessToken, RepositorySlug};

const TOKEN: &str = "ghp_testtoken";

struct GatewayFixture {
    runtime: Runtime,
    server: MockServer,
    gateway: OctocrabProjectsGateway,
}

impl GatewayFixture {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn respond_to(&self, marker: &str, body: Value) {
        self.block_on(
            Mock::given(method("POST"))
                .and(path("/graphql"))
                .and(body_string_contains(marker))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&self.server),
        );
    }

    /// Request bodies in the order the server received them.
    fn request_bodies(&self) -> Vec<String> {
        self.block_on(self.server.received_requests())
            .unwrap_or_default()
            .into_iter()
            .map(|request| String::from_utf8_lossy(&request.body).into_owned())
            .collect()
    }
}

#[fixture]
fn token() -> PersonalAccessToken {
    PersonalAccessToken::new(TOKEN).expect("token should be valid")
}

#[fixture]
fn gateway_fixture(token: PersonalAccessToken) -> GatewayFixture {
    let runtime = Runtime::new().expect("runtime should start");
    let server = runtime.block_on(MockServer::start());
    let api_base = ApiBase::parse(&server.uri()).expect("mock server URI should parse");
    let gateway = {
        let _guard = runtime.enter();
        OctocrabProjectsGateway::for_token(&token, &api_base).expect("should create gateway")
    };
    GatewayFixture {
        runtime,
        server,
        gateway,
    }
}

fn data(payload: Value) -> Value {
    json!({ "data": payload })
}

#[rstest]
fn list_projects_sends_token_header_and_normalizes_owners(gateway_fixture: GatewayFixture) {
    let mut org_project = project_summary("PVT_2", 7, "Platform");
    org_project["owner"] = json!({ "__typename": "Organization", "login": "acme" });
    let body = data(json!({
        "viewer": { "projectsV2": { "nodes": [project_summary("PVT_1", 1, "Roadmap"), org_project] } }
    }));
    gateway_fixture.block_on(
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("authorization", format!("token {TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&gateway_fixture.server),
    );

    let projects = gateway_fixture
        .block_on(gateway_fixture.gateway.list_projects())
        .expect("projects should load");

    let owners: Vec<&str> = projects
        .iter()
        .map(|project| project.owner_login.as_str())
        .collect();
    assert_eq!(owners, vec!["octo", "acme"]);
}

#[rstest]
fn fetch_project_data_normalizes_issue_items(gateway_fixture: GatewayFixture) {
    let payload = project_payload(
        "PVT_1",
        vec![plain_field("F_1", "Priority", "TEXT")],
        vec![item(
            "PVTI_1",
            issue_content("I_1", 42, "Fix login", "octo", "app"),
            vec![text_value("F_1", "Priority", "High")],
        )],
    );
    gateway_fixture.respond_to("node(id: $projectId)", data(payload));

    let project_data = gateway_fixture
        .block_on(gateway_fixture.gateway.fetch_project_data("PVT_1"))
        .expect("project data should load");

    assert_eq!(project_data.tasks.len(), 1);
    let task = &project_data.tasks[0];
    assert_eq!(task.number, 42);
    assert_eq!(task.state, TaskState::Open);
    assert_eq!(task.custom_fields.len(), 1);
    let priority = &task.custom_fields[0];
    assert_eq!(priority.field_name, "Priority");
    assert_eq!(priority.field_type, CustomFieldType::Text);
    assert_eq!(priority.value, Some(FieldValue::Text("High".to_owned())));
}

#[rstest]
fn graphql_errors_fail_the_call(gateway_fixture: GatewayFixture) {
    gateway_fixture.respond_to(
        "node(id: $projectId)",
        json!({
            "data": { "node": null },
            "errors": [{ "message": "Could not resolve to a node with the global id of 'PVT_x'" }]
        }),
    );

    let result = gateway_fixture.block_on(gateway_fixture.gateway.fetch_project_data("PVT_x"));

    assert_eq!(
        result,
        Err(TaskFlowError::operation(
            Operation::FetchProjectData,
            FailureCause::GraphQl {
                messages: vec![
                    "Could not resolve to a node with the global id of 'PVT_x'".to_owned()
                ],
            },
        ))
    );
}

#[rstest]
fn missing_project_node_is_a_normalization_failure(gateway_fixture: GatewayFixture) {
    gateway_fixture.respond_to("node(id: $projectId)", data(json!({ "node": null })));

    let result = gateway_fixture.block_on(gateway_fixture.gateway.fetch_project_data("PVT_1"));

    let error = result.expect_err("missing node should fail");
    assert!(
        matches!(error.cause(), Some(FailureCause::Normalization { .. })),
        "expected Normalization, got {error:?}"
    );
}

#[rstest]
fn unauthorized_response_maps_to_authentication_failure(gateway_fixture: GatewayFixture) {
    gateway_fixture.block_on(
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/graphql"
            })))
            .mount(&gateway_fixture.server),
    );

    let result = gateway_fixture.block_on(gateway_fixture.gateway.list_projects());

    let error = result.expect_err("401 should fail");
    assert!(
        matches!(
            error,
            TaskFlowError::Operation {
                operation: Operation::ListProjects,
                cause: FailureCause::Authentication { .. },
            }
        ),
        "expected Authentication, got {error:?}"
    );
}

#[rstest]
fn draft_creation_skips_repository_lookup(gateway_fixture: GatewayFixture) {
    gateway_fixture.respond_to(
        "addProjectV2DraftIssue",
        data(json!({
            "addProjectV2DraftIssue": {
                "projectItem": {
                    "id": "PVTI_9",
                    "content": { "id": "DI_9", "title": "T", "body": "" }
                }
            }
        })),
    );
    let params = CreateTaskParams::new("T")
        .expect("title should be accepted")
        .with_project("PVT_1");

    let task = gateway_fixture
        .block_on(gateway_fixture.gateway.create_issue(&params))
        .expect("draft should be created");

    assert_eq!(task.number, 0);
    assert_eq!(task.url, "");
    assert_eq!(task.state, TaskState::Draft);
    assert_eq!(task.project_item_id.as_deref(), Some("PVTI_9"));
    let bodies = gateway_fixture.request_bodies();
    assert_eq!(bodies.len(), 1);
    assert!(!bodies[0].contains("repository(owner:"));
}

#[rstest]
fn draft_without_project_is_rejected_before_any_request(gateway_fixture: GatewayFixture) {
    let params = CreateTaskParams::new("T").expect("title should be accepted");

    let result = gateway_fixture.block_on(gateway_fixture.gateway.create_issue(&params));

    assert_eq!(
        result,
        Err(TaskFlowError::Validation(ValidationError::MissingProject))
    );
    assert!(gateway_fixture.request_bodies().is_empty());
}

fn issue_params() -> CreateTaskParams {
    let repository = RepositorySlug::new("o", "r").expect("slug should be valid");
    CreateTaskParams::new("T")
        .expect("title should be accepted")
        .with_repository(Some(repository))
        .with_project("P")
}

fn mount_lookup_and_create(fixture: &GatewayFixture) {
    fixture.respond_to(
        "repository(owner: $owner",
        data(json!({ "repository": { "id": "R_1" } })),
    );
    fixture.respond_to(
        "createIssue(input",
        data(json!({ "createIssue": { "issue": issue_content("I_5", 5, "T", "o", "r") } })),
    );
}

#[rstest]
fn issue_creation_runs_lookup_create_attach_in_order(gateway_fixture: GatewayFixture) {
    mount_lookup_and_create(&gateway_fixture);
    gateway_fixture.respond_to(
        "addProjectV2ItemById",
        data(json!({ "addProjectV2ItemById": { "item": { "id": "PVTI_5" } } })),
    );

    let task = gateway_fixture
        .block_on(gateway_fixture.gateway.create_issue(&issue_params()))
        .expect("issue should be created");

    assert_eq!(task.number, 5);
    assert_eq!(task.project_item_id.as_deref(), Some("PVTI_5"));
    let bodies = gateway_fixture.request_bodies();
    assert_eq!(bodies.len(), 3);
    assert!(bodies[0].contains("repository(owner: $owner"));
    assert!(bodies[1].contains("createIssue(input"));
    assert!(bodies[2].contains("addProjectV2ItemById"));
    assert!(bodies[2].contains("\"contentId\":\"I_5\""));
}

#[rstest]
fn attach_failure_reports_the_created_issue(gateway_fixture: GatewayFixture) {
    mount_lookup_and_create(&gateway_fixture);
    gateway_fixture.respond_to(
        "addProjectV2ItemById",
        json!({ "data": null, "errors": [{ "message": "Project not found" }] }),
    );

    let result = gateway_fixture.block_on(gateway_fixture.gateway.create_issue(&issue_params()));

    match result {
        Err(TaskFlowError::IssueNotAttached {
            issue,
            project_id,
            cause,
        }) => {
            assert_eq!(issue.number, 5);
            assert_eq!(project_id, "P");
            assert_eq!(
                cause,
                FailureCause::GraphQl {
                    messages: vec!["Project not found".to_owned()],
                }
            );
        }
        other => panic!("expected IssueNotAttached, got {other:?}"),
    }
    assert_eq!(gateway_fixture.request_bodies().len(), 3);
}

#[rstest]
fn unknown_repository_stops_before_issue_creation(gateway_fixture: GatewayFixture) {
    gateway_fixture.respond_to(
        "repository(owner: $owner",
        data(json!({ "repository": null })),
    );

    let result = gateway_fixture.block_on(gateway_fixture.gateway.create_issue(&issue_params()));

    let error = result.expect_err("unknown repository should fail");
    assert!(matches!(
        error,
        TaskFlowError::Operation {
            operation: Operation::CreateIssue,
            ..
        }
    ));
    assert_eq!(gateway_fixture.request_bodies().len(), 1);
}

fn field_params(value: Option<FieldValueInput>) -> UpdateTaskFieldParams {
    UpdateTaskFieldParams {
        project_id: "PVT_1".to_owned(),
        project_item_id: "PVTI_1".to_owned(),
        field_id: "F_STATUS".to_owned(),
        value,
    }
}

#[rstest]
fn field_update_sends_typed_value(gateway_fixture: GatewayFixture) {
    gateway_fixture.respond_to(
        "updateProjectV2ItemFieldValue",
        data(json!({ "updateProjectV2ItemFieldValue": { "projectV2Item": { "id": "PVTI_1" } } })),
    );
    let params = field_params(Some(FieldValueInput::SingleSelectOptionId(
        "OPT_2".to_owned(),
    )));

    gateway_fixture
        .block_on(gateway_fixture.gateway.update_task_field(&params))
        .expect("field update should succeed");

    let bodies = gateway_fixture.request_bodies();
    assert!(bodies[0].contains("\"singleSelectOptionId\":\"OPT_2\""));
}

#[rstest]
fn absent_value_clears_the_field(gateway_fixture: GatewayFixture) {
    gateway_fixture.respond_to(
        "clearProjectV2ItemFieldValue",
        data(json!({ "clearProjectV2ItemFieldValue": { "projectV2Item": { "id": "PVTI_1" } } })),
    );

    gateway_fixture
        .block_on(gateway_fixture.gateway.update_task_field(&field_params(None)))
        .expect("field clear should succeed");

    let bodies = gateway_fixture.request_bodies();
    assert_eq!(bodies.len(), 1);
    assert!(!bodies[0].contains("updateProjectV2ItemFieldValue"));
}

#[rstest]
fn close_issue_sends_issue_id(gateway_fixture: GatewayFixture) {
    gateway_fixture.respond_to(
        "closeIssue(input",
        data(json!({ "closeIssue": { "issue": { "id": "I_5", "state": "CLOSED" } } })),
    );

    gateway_fixture
        .block_on(gateway_fixture.gateway.close_issue("I_5"))
        .expect("close should succeed");

    assert!(gateway_fixture.request_bodies()[0].contains("\"issueId\":\"I_5\""));
}

#[rstest]
fn identity_lookup_uses_bearer_header(token: PersonalAccessToken) {
    let runtime = Runtime::new().expect("runtime should start");
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
            .and(header("x-github-api-version", "2022-11-28"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octo",
                "email": null,
                "avatar_url": "https://avatars.example/octo"
            })))
            .mount(&server),
    );
    let api_base = ApiBase::parse(&server.uri()).expect("mock server URI should parse");
    let gateway = {
        let _guard = runtime.enter();
        OctocrabIdentityGateway::for_token(&token, &api_base).expect("should create gateway")
    };

    let identity = runtime
        .block_on(gateway.authenticated_user())
        .expect("identity should load");

    assert_eq!(identity.login, "octo");
    assert!(identity.email.is_none());
}
