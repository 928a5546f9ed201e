// Rust guideline compliant 2026-02-09

//! Integration tests for the Jira issue source against a mock server.

use mockito::{Matcher, Server};
use relman_core::Credentials;
use relman_jira::{
    epic_stories_jql, release_jql, FetchStats, IssueSource, JiraClient, JiraError, JiraService,
};
use serde_json::{json, Value};

/// Basic auth header for `dana:token`.
const AUTH_HEADER: &str = "Basic ZGFuYTp0b2tlbg==";

fn service(server: &Server) -> JiraService {
    let client = JiraClient::new(Credentials {
        base_url: server.url(),
        username: "dana".to_string(),
        api_token: "token".to_string(),
    })
    .expect("client should build");
    JiraService::new(client, 100)
}

fn issue_json(key: &str, type_name: &str, subtask: bool, category: &str) -> Value {
    json!({
        "id": key.replace("PROJ-", "100"),
        "key": key,
        "fields": {
            "summary": format!("Summary of {}", key),
            "status": { "name": "Open", "statusCategory": { "key": category, "name": category } },
            "issuetype": { "name": type_name, "subtask": subtask }
        }
    })
}

fn with_field(mut issue: Value, field: &str, value: Value) -> Value {
    issue["fields"][field] = value;
    issue
}

fn refs(keys: &[&str]) -> Value {
    Value::Array(keys.iter().map(|key| json!({ "key": key })).collect())
}

fn mock_issue(server: &mut Server, body: Value) -> mockito::Mock {
    let key = body["key"].as_str().unwrap_or_default().to_string();
    server
        .mock("GET", format!("/rest/api/3/issue/{}", key).as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create()
}

fn mock_search(server: &mut Server, jql: &str, issues: Vec<Value>) -> mockito::Mock {
    let total = issues.len();
    server
        .mock("GET", "/rest/api/3/search/jql")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("jql".into(), jql.into()),
            Matcher::UrlEncoded("maxResults".into(), "100".into()),
        ]))
        .match_header("authorization", AUTH_HEADER)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "issues": issues, "total": total, "maxResults": 100, "startAt": 0 })
                .to_string(),
        )
        .create()
}

#[test]
fn test_versions_sends_auth_and_decodes() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/api/3/project/PROJ")
        .match_query(Matcher::UrlEncoded("expand".into(), "versions".into()))
        .match_header("authorization", AUTH_HEADER)
        .match_header("accept", "application/json")
        .with_status(200)
        .with_body(
            json!({
                "key": "PROJ",
                "name": "Project",
                "versions": [
                    { "id": "1", "name": "1.0", "released": true, "archived": false, "releaseDate": "2026-01-10" },
                    { "id": "2", "name": "1.1", "released": false, "archived": false, "releaseDate": "2026-11-20" },
                    { "id": "3", "name": "1.2", "released": false, "archived": false }
                ]
            })
            .to_string(),
        )
        .expect(2)
        .create();

    let service = service(&server);
    let versions = service.versions("PROJ").expect("versions should load");
    assert_eq!(versions.len(), 3);
    assert_eq!(versions[1].release_date.as_deref(), Some("2026-11-20"));

    let next = service.next_release("PROJ").expect("next release exists");
    assert_eq!(next.name, "1.1");
    mock.assert();
}

#[test]
fn test_versions_empty_project() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/rest/api/3/project/EMPTY")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "key": "EMPTY", "versions": [] }).to_string())
        .create();

    let result = service(&server).versions("EMPTY");
    assert!(matches!(result, Err(JiraError::NoVersions(project)) if project == "EMPTY"));
}

#[test]
fn test_version_by_name_not_found() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/rest/api/3/project/PROJ")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "key": "PROJ", "versions": [{ "name": "1.0" }] }).to_string())
        .create();

    let result = service(&server).version_by_name("PROJ", "9.9");
    assert!(matches!(result, Err(JiraError::VersionNotFound { .. })));
}

#[test]
fn test_http_error_status() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/rest/api/3/project/PROJ")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("Client must be authenticated")
        .create();

    match service(&server).versions("PROJ") {
        Err(JiraError::Status { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "Client must be authenticated");
        }
        other => panic!("expected status error, got {:?}", other.map(|v| v.len())),
    }
}

#[test]
fn test_invalid_json_is_decode_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/rest/api/3/project/PROJ")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create();

    let result = service(&server).versions("PROJ");
    assert!(matches!(result, Err(JiraError::Decode { .. })));
}

#[test]
fn test_release_issues_assembles_snapshot() {
    let mut server = Server::new();

    let epic = issue_json("PROJ-1", "Epic", false, "indeterminate");
    let story = with_field(
        with_field(
            issue_json("PROJ-2", "Story", false, "new"),
            "epic",
            json!({ "key": "PROJ-1", "summary": "Epic" }),
        ),
        "subtasks",
        refs(&["PROJ-3", "PROJ-4"]),
    );
    let bug = with_field(
        issue_json("PROJ-5", "Bug", false, "new"),
        "subtasks",
        refs(&["PROJ-6"]),
    );
    let linked_story = with_field(
        with_field(
            issue_json("PROJ-7", "Story", false, "new"),
            "epic",
            json!({ "key": "PROJ-1" }),
        ),
        "subtasks",
        refs(&["PROJ-8"]),
    );

    let _release = mock_search(
        &mut server,
        &release_jql("PROJ", "1.1"),
        vec![epic, story.clone(), bug],
    );
    let _epic_stories = mock_search(
        &mut server,
        &epic_stories_jql("PROJ", &["PROJ-1"]),
        vec![story, linked_story],
    );

    let _open_subtask = mock_issue(
        &mut server,
        with_field(
            issue_json("PROJ-3", "Sub-task", true, "new"),
            "parent",
            json!({ "key": "PROJ-2" }),
        ),
    );
    let _done_subtask = mock_issue(&mut server, issue_json("PROJ-4", "Sub-task", true, "done"));
    let _missing_subtask = server
        .mock("GET", "/rest/api/3/issue/PROJ-6")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("Issue does not exist")
        .create();
    let _story_subtask = mock_issue(
        &mut server,
        with_field(
            issue_json("PROJ-8", "Sub-task", true, "indeterminate"),
            "parent",
            json!({ "key": "PROJ-7" }),
        ),
    );

    let snapshot = service(&server)
        .release_issues("PROJ", "1.1")
        .expect("snapshot should assemble");

    let keys: Vec<&str> = snapshot.issues.iter().map(|issue| issue.key()).collect();
    assert_eq!(keys, vec!["PROJ-1", "PROJ-2", "PROJ-5", "PROJ-3", "PROJ-7", "PROJ-8"]);
    assert_eq!(
        snapshot.stats,
        FetchStats {
            found: 3,
            subtasks: 2,
            epic_stories: 1,
        }
    );
    assert!(snapshot.issues[3].is_subtask());
    assert_eq!(
        snapshot.issues[3].parent_ref().map(|parent| parent.key.as_str()),
        Some("PROJ-2")
    );
}

#[test]
fn test_release_issues_without_epics_skips_epic_search() {
    let mut server = Server::new();
    let _release = mock_search(
        &mut server,
        &release_jql("PROJ", "2.0"),
        vec![issue_json("PROJ-9", "Bug", false, "new")],
    );
    let epic_search = server
        .mock("GET", "/rest/api/3/search/jql")
        .match_query(Matcher::Regex("Epic".to_string()))
        .expect(0)
        .create();

    let snapshot = service(&server)
        .release_issues("PROJ", "2.0")
        .expect("snapshot should assemble");

    assert_eq!(snapshot.issues.len(), 1);
    assert_eq!(snapshot.stats.found, 1);
    epic_search.assert();
}

#[test]
fn test_release_search_failure_is_an_error() {
    let mut server = Server::new();
    let _release = server
        .mock("GET", "/rest/api/3/search/jql")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body("{\"errorMessages\":[\"bad jql\"]}")
        .create();

    let result = service(&server).release_issues("PROJ", "1.0");
    assert!(matches!(result, Err(JiraError::Status { status: 400, .. })));
}
