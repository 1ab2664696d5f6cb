//! Tests for the client and CRUD dispatch

use super::*;
use crate::error::Error;
use crate::resource::ResourceKind;
use crate::session::PRIVATE_TOKEN_HEADER;
use crate::types::JsonObject;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn params(value: Value) -> JsonObject {
    value.as_object().cloned().unwrap_or_default()
}

fn gitlab_for(server: &MockServer) -> Gitlab {
    Gitlab::new(Session::new(server.uri()).with_private_token("private_token")).unwrap()
}

/// A server that fails the test if it receives any request
async fn silent_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    server
}

// ============================================================================
// Session mutation
// ============================================================================

#[test]
fn test_set_token_and_credentials() {
    let mut gl = Gitlab::new(Session::new("http://localhost")).unwrap();

    gl.set_token(Some("tok".to_string()));
    assert_eq!(
        gl.session().headers.get(PRIVATE_TOKEN_HEADER).map(String::as_str),
        Some("tok")
    );

    gl.set_token(None);
    assert!(gl.session().headers.is_empty());

    gl.set_credentials(Some("a@b.c".to_string()), Some("pw".to_string()));
    assert!(gl.session().has_credentials());

    gl.set_url("http://other");
    assert_eq!(gl.http().build_url("/user"), "http://other/api/v4/user");
}

#[test]
fn test_from_session_restores_state() {
    let gl = Gitlab::new(
        Session::new("http://localhost")
            .with_private_token("tok")
            .with_credentials("a@b.c", "pw"),
    )
    .unwrap();

    let snapshot = serde_json::to_string(gl.session()).unwrap();
    let restored = Gitlab::from_session(serde_json::from_str(&snapshot).unwrap()).unwrap();

    assert_eq!(restored.session(), gl.session());
}

#[tokio::test]
async fn test_credentials_auth_without_password_fails_fast() {
    let server = silent_server().await;
    let mut gl = Gitlab::new(Session::new(server.uri())).unwrap();
    gl.set_credentials(Some("a@b.c".to_string()), None);

    let err = gl.credentials_auth().await.unwrap_err();
    assert!(matches!(err, Error::Authentication { status: None, .. }));
}

// ============================================================================
// get
// ============================================================================

#[tokio::test]
async fn test_get_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1"))
        .and(header("PRIVATE-TOKEN", "private_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "p"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let project = gl
        .get(ResourceKind::Project, Some(json!(1)), &JsonObject::new())
        .await
        .unwrap();

    assert!(project.is_from_api());
    assert_eq!(project.get_str("name"), Some("p"));
}

#[tokio::test]
async fn test_get_sanitizes_path_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/group%2Fproj/repository/branches/feature%2Fx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "feature/x"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let branch = gl
        .get(
            ResourceKind::ProjectBranch,
            Some(json!("feature/x")),
            &params(json!({"project_id": "group/proj"})),
        )
        .await
        .unwrap();

    assert_eq!(branch.id(), Some(&json!("feature/x")));
}

#[tokio::test]
async fn test_get_sends_leftover_params_as_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1"))
        .and(query_param("statistics", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    gl.get(
        ResourceKind::Project,
        Some(json!(1)),
        &params(json!({"statistics": true})),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_get_current_user_needs_no_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let me = gl
        .get(ResourceKind::CurrentUser, None, &JsonObject::new())
        .await
        .unwrap();
    assert_eq!(me.get_i64("id"), Some(3));
}

#[tokio::test]
async fn test_get_missing_param_fails_before_request() {
    let server = silent_server().await;
    let gl = gitlab_for(&server);

    let err = gl
        .get(ResourceKind::ProjectBranch, Some(json!("main")), &JsonObject::new())
        .await
        .unwrap_err();

    match err {
        Error::Get { status, message } => {
            assert!(status.is_none());
            assert!(message.contains("project_id"));
        }
        other => panic!("Expected Get error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_missing_id_fails_before_request() {
    let server = silent_server().await;
    let gl = gitlab_for(&server);

    let err = gl
        .get(ResourceKind::Project, None, &JsonObject::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Get { status: None, .. }));
}

#[tokio::test]
async fn test_get_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "404 Project Not Found"})),
        )
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let err = gl
        .get(ResourceKind::Project, Some(json!(99)), &JsonObject::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, Error::Get { .. }));
    assert!(err.to_string().contains("404 Project Not Found"));
}

#[tokio::test]
async fn test_get_unsupported_kind() {
    let server = silent_server().await;
    let gl = gitlab_for(&server);

    let err = gl
        .get(ResourceKind::Issue, Some(json!(1)), &JsonObject::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unsupported { .. }));
}

// ============================================================================
// list
// ============================================================================

#[tokio::test]
async fn test_list_current_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1/repository/branches"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"name": "main"}, {"name": "dev"}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let branches = gl
        .list(
            ResourceKind::ProjectBranch,
            &params(json!({"project_id": 1})),
            ListMode::CurrentPage,
        )
        .await
        .unwrap();

    let names: Vec<_> = branches.iter().filter_map(|b| b.get_str("name")).collect();
    assert_eq!(names, vec!["main", "dev"]);
    assert!(branches.iter().all(Resource::is_from_api));
}

#[tokio::test]
async fn test_list_missing_param_is_list_error() {
    let server = silent_server().await;
    let gl = gitlab_for(&server);

    let err = gl
        .list(ResourceKind::ProjectBranch, &JsonObject::new(), ListMode::All)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::List { status: None, .. }));
}

#[tokio::test]
async fn test_list_paged_len_uses_total() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/groups"))
        .and(query_param("per_page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total", "5")
                .set_body_json(json!([{"id": 1}])),
        )
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let paged = gl
        .list_paged(ResourceKind::Group, &params(json!({"per_page": 1})))
        .await
        .unwrap();

    assert_eq!(paged.len(), 5);
    assert_eq!(paged.kind(), ResourceKind::Group);
}

#[tokio::test]
async fn test_list_unsupported_kind() {
    let server = silent_server().await;
    let gl = gitlab_for(&server);

    let err = gl
        .list(ResourceKind::UserProject, &JsonObject::new(), ListMode::CurrentPage)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unsupported { .. }));
}

// ============================================================================
// create / update
// ============================================================================

#[tokio::test]
async fn test_create_hydrates_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/groups"))
        .and(body_json(json!({"name": "name", "path": "path"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 1, "name": "name", "path": "path"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let mut group = Resource::from_value(ResourceKind::Group, json!({"name": "name", "path": "path"}));
    gl.create(&mut group).await.unwrap();

    assert!(group.is_from_api());
    assert_eq!(group.id(), Some(&json!(1)));
}

#[tokio::test]
async fn test_create_strips_path_params_from_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/5/repository/branches"))
        .and(body_json(json!({"branch_name": "dev", "ref": "main"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"name": "dev"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let mut branch = Resource::from_value(
        ResourceKind::ProjectBranch,
        json!({"project_id": 5, "branch_name": "dev", "ref": "main"}),
    );
    gl.create(&mut branch).await.unwrap();

    assert_eq!(branch.get_str("name"), Some("dev"));
    assert_eq!(branch.get_i64("project_id"), Some(5));
}

#[tokio::test]
async fn test_create_missing_attrs_fails_before_request() {
    let server = silent_server().await;
    let gl = gitlab_for(&server);

    let mut group = Resource::from_value(ResourceKind::Group, json!({"name": "name"}));
    let err = gl.create(&mut group).await.unwrap_err();

    assert!(matches!(err, Error::Create { status: None, .. }));
    assert!(err.to_string().contains("path"));
    assert!(!group.is_from_api());
}

#[tokio::test]
async fn test_create_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": {"name": ["taken"]}})),
        )
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let mut project = Resource::from_value(ResourceKind::Project, json!({"name": "dup"}));
    let err = gl.create(&mut project).await.unwrap_err();

    assert!(matches!(err, Error::Create { status: Some(400), .. }));
}

#[tokio::test]
async fn test_create_unsupported_kind() {
    let server = silent_server().await;
    let gl = gitlab_for(&server);

    let mut user = Resource::from_value(ResourceKind::CurrentUser, json!({"name": "x"}));
    let err = gl.create(&mut user).await.unwrap_err();
    assert!(matches!(err, Error::Unsupported { .. }));
}

#[tokio::test]
async fn test_update_puts_to_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "renamed"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let mut project = Resource::from_value(ResourceKind::Project, json!({"id": 1, "name": "renamed"}));
    gl.update(&mut project).await.unwrap();

    assert!(project.is_from_api());
    assert_eq!(project.get_str("name"), Some("renamed"));
}

#[tokio::test]
async fn test_update_without_id() {
    let server = silent_server().await;
    let gl = gitlab_for(&server);

    let mut project = Resource::from_value(ResourceKind::Project, json!({"name": "x"}));
    let err = gl.update(&mut project).await.unwrap_err();
    assert!(matches!(err, Error::Update { status: None, .. }));
}

#[tokio::test]
async fn test_update_not_supported() {
    let server = silent_server().await;
    let gl = gitlab_for(&server);

    let mut hook = Resource::from_value(ResourceKind::Hook, json!({"id": 1, "url": "x"}));
    let err = gl.update(&mut hook).await.unwrap_err();
    assert!(matches!(err, Error::Unsupported { .. }));
}

// ============================================================================
// delete
// ============================================================================

#[tokio::test]
async fn test_delete_empty_body_is_true() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let project = Resource::from_value(ResourceKind::Project, json!({"id": 1}));
    assert!(gl.delete(&project).await.unwrap());
}

#[tokio::test]
async fn test_delete_by_id_with_path_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/1/repository/branches/old"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "old"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let deleted = gl
        .delete_by_id(
            ResourceKind::ProjectBranch,
            json!("old"),
            &params(json!({"project_id": 1})),
        )
        .await
        .unwrap();
    assert!(deleted);
}

#[tokio::test]
async fn test_delete_by_tag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v4/groups/4"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    assert!(gl
        .delete_by_tag("Group", json!(4), &JsonObject::new())
        .await
        .unwrap());
}

#[tokio::test]
async fn test_delete_by_unknown_tag_fails_before_request() {
    let server = silent_server().await;
    let gl = gitlab_for(&server);

    let err = gl
        .delete_by_tag("InvalidClass", json!(1), &JsonObject::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unsupported { .. }));
}

#[tokio::test]
async fn test_delete_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "403 Forbidden"})))
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let err = gl
        .delete_by_id(ResourceKind::User, json!(2), &JsonObject::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Delete { status: Some(403), .. }));
}

#[tokio::test]
async fn test_delete_not_supported() {
    let server = silent_server().await;
    let gl = gitlab_for(&server);

    let err = gl
        .delete_by_id(ResourceKind::Issue, json!(1), &JsonObject::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unsupported { .. }));
}

// ============================================================================
// 401 on any operation
// ============================================================================

/// A server that rejects every request as unauthenticated
async fn unauthorized_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "401 Unauthorized"})))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn assert_unauthorized(err: &Error) {
    assert!(
        matches!(err, Error::Authentication { status: Some(401), .. }),
        "expected an authentication error, got {err:?}"
    );
}

#[tokio::test]
async fn test_get_401() {
    let server = unauthorized_server().await;
    let gl = gitlab_for(&server);

    let err = gl
        .get(ResourceKind::Project, Some(json!(1)), &JsonObject::new())
        .await
        .unwrap_err();
    assert_unauthorized(&err);
}

#[tokio::test]
async fn test_list_401() {
    let server = unauthorized_server().await;
    let gl = gitlab_for(&server);

    let err = gl
        .list(ResourceKind::Project, &JsonObject::new(), ListMode::All)
        .await
        .unwrap_err();
    assert_unauthorized(&err);
}

#[tokio::test]
async fn test_create_401() {
    let server = unauthorized_server().await;
    let gl = gitlab_for(&server);

    let mut project = Resource::from_value(ResourceKind::Project, json!({"name": "x"}));
    let err = gl.create(&mut project).await.unwrap_err();
    assert_unauthorized(&err);
    assert!(!project.is_from_api());
}

#[tokio::test]
async fn test_update_401() {
    let server = unauthorized_server().await;
    let gl = gitlab_for(&server);

    let mut project = Resource::from_value(ResourceKind::Project, json!({"id": 1, "name": "x"}));
    let err = gl.update(&mut project).await.unwrap_err();
    assert_unauthorized(&err);
}

#[tokio::test]
async fn test_delete_401() {
    let server = unauthorized_server().await;
    let gl = gitlab_for(&server);

    let project = Resource::from_value(ResourceKind::Project, json!({"id": 1}));
    let err = gl.delete(&project).await.unwrap_err();
    assert_unauthorized(&err);
}

// ============================================================================
// Raw requests
// ============================================================================

#[tokio::test]
async fn test_raw_requests_return_any_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/version"))
        .respond_with(ResponseTemplate::new(418).set_body_string("teapot"))
        .mount(&mock_server)
        .await;

    let gl = gitlab_for(&mock_server);
    let raw = gl.raw_get("/version", RequestConfig::new()).await.unwrap();

    assert_eq!(raw.status.as_u16(), 418);
    assert_eq!(raw.text(), "teapot");
}
