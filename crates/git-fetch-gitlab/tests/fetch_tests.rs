use git_fetch::{Connector, FetchError, Repository, SourceKind};
use git_fetch_gitlab::{GitLabConnector, GitLabConnectorConfig};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connector_for(server: &MockServer) -> GitLabConnector {
    GitLabConnector::new(GitLabConnectorConfig {
        username: Some("u".into()),
        token: Some("T".into()),
        api_base_url: Some(server.uri()),
    })
    .unwrap()
}

fn project_json(id: u64, name: &str, visibility: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "web_url": format!("https://gitlab.com/u/{name}"),
        "visibility": visibility,
        "owner": { "id": 42, "username": "u" },
        "namespace": { "id": 9, "full_path": "u" }
    })
}

async fn mount_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("username", "u"))
        .and(header("private-token", "T"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": 42, "username": "u" }])),
        )
        .mount(server)
        .await;
}

async fn mount_projects(server: &MockServer, projects: &[(u64, &str, &str)]) {
    let summaries: Vec<serde_json::Value> = projects
        .iter()
        .map(|(id, name, _)| json!({ "id": id, "name": name }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/users/42/projects"))
        .and(query_param("min_access_level", "10"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summaries))
        .mount(server)
        .await;

    for (id, name, visibility) in projects {
        Mock::given(method("GET"))
            .and(path(format!("/projects/{id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(project_json(*id, name, visibility)),
            )
            .expect(1)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn lists_projects_at_guest_access_or_above() {
    let server = MockServer::start().await;
    mount_user(&server).await;
    mount_projects(&server, &[(1, "svc", "private"), (2, "lib", "public")]).await;

    let listing = connector_for(&server).repositories().await.unwrap();
    assert_eq!(listing.account, "u");

    let repos = listing.repositories;
    assert_eq!(repos.len(), 2);

    let svc = repos[0].info();
    assert_eq!(svc.owner, "u");
    assert_eq!(svc.source, SourceKind::GitLab);
    assert_eq!(svc.external_id, "https://gitlab.com/u/svc");
    assert_eq!(svc.name, "svc");
    assert!(svc.private);
    assert!(!repos[1].info().private);
}

#[tokio::test]
async fn internal_visibility_is_private() {
    let server = MockServer::start().await;
    mount_user(&server).await;
    mount_projects(&server, &[(3, "tools", "internal")]).await;

    let repos = connector_for(&server).repositories().await.unwrap().repositories;
    assert!(repos[0].info().private);
}

#[tokio::test]
async fn no_accessible_projects_is_empty_not_an_error() {
    let server = MockServer::start().await;
    mount_user(&server).await;
    mount_projects(&server, &[]).await;

    let repos = connector_for(&server).repositories().await.unwrap().repositories;
    assert!(repos.is_empty());
}

#[tokio::test]
async fn group_project_owner_falls_back_to_namespace() {
    let server = MockServer::start().await;
    mount_user(&server).await;

    Mock::given(method("GET"))
        .and(path("/users/42/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 5 }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "name": "platform",
            "web_url": "https://gitlab.com/acme/infra/platform",
            "visibility": "public",
            "namespace": { "id": 11, "full_path": "acme/infra" }
        })))
        .mount(&server)
        .await;

    let repos = connector_for(&server).repositories().await.unwrap().repositories;
    assert_eq!(repos[0].info().owner, "acme/infra");
}

#[tokio::test]
async fn unknown_username_is_a_lookup_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = connector_for(&server).repositories().await;
    assert!(
        matches!(result, Err(FetchError::Lookup(msg)) if msg.contains("no gitlab user named \"u\""))
    );
}

#[tokio::test]
async fn ambiguous_username_is_a_lookup_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 42, "username": "u" },
            { "id": 43, "username": "u" }
        ])))
        .mount(&server)
        .await;

    let result = connector_for(&server).repositories().await;
    assert!(matches!(result, Err(FetchError::Lookup(msg)) if msg.contains("matches 2")));
}

#[tokio::test]
async fn merge_requests_are_paged_and_cover_all_states() {
    let server = MockServer::start().await;
    mount_user(&server).await;
    mount_projects(&server, &[(1, "svc", "private")]).await;

    Mock::given(method("GET"))
        .and(path("/projects/1/merge_requests"))
        .and(query_param("state", "all"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-next-page", "2")
                .set_body_json(json!([{
                    "author": { "username": "dev" },
                    "state": "merged",
                    "title": "Release 1.0",
                    "web_url": "https://gitlab.com/u/svc/-/merge_requests/2"
                }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/1/merge_requests"))
        .and(query_param("state", "all"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-next-page", "")
                .set_body_json(json!([{
                    "author": { "username": "ops" },
                    "state": "opened",
                    "title": "",
                    "web_url": "https://gitlab.com/u/svc/-/merge_requests/1"
                }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let repos = connector_for(&server).repositories().await.unwrap().repositories;
    let normalized = repos[0].normalize().await.unwrap();

    assert_eq!(normalized.pull_requests.len(), 2);
    assert_eq!(normalized.pull_requests[0].author, "dev");
    assert_eq!(normalized.pull_requests[0].state, "merged");
    assert_eq!(normalized.pull_requests[1].state, "opened");
    assert_eq!(normalized.pull_requests[1].title, "");
    assert_eq!(
        normalized.pull_requests[1].url,
        "https://gitlab.com/u/svc/-/merge_requests/1"
    );
}

#[tokio::test]
async fn failing_project_detail_fails_the_listing() {
    let server = MockServer::start().await;
    mount_user(&server).await;

    Mock::given(method("GET"))
        .and(path("/users/42/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 9 }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = connector_for(&server).repositories().await;
    assert!(matches!(result, Err(FetchError::Http { status: 404, .. })));
}
