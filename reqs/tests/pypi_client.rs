use reqs::SimpleIndexClient;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn project_page() -> serde_json::Value {
    json!({
        "meta": {"api-version": "1.1"},
        "name": "example-package",
        "files": [
            {"filename": "example_package-1.0.0.tar.gz", "yanked": false},
            {"filename": "example_package-1.1.0-py3-none-any.whl", "yanked": false},
            {"filename": "example_package-1.1.0.tar.gz", "yanked": false},
            {"filename": "example_package-2.0.0.tar.gz", "yanked": "broken metadata"},
            {"filename": "example_package-0.9.0-legacy.zip", "yanked": false}
        ]
    })
}

async fn mock_index(page: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/example-package/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_fetch_versions_newest_first() {
    let server = mock_index(project_page()).await;

    let client =
        SimpleIndexClient::new(false).with_index_url(&format!("{}/simple", server.uri()));
    let versions = client.fetch_versions("example-package").await.expect("fetch");

    let rendered: Vec<String> = versions.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["1.1.0", "1.0.0"]);
}

#[tokio::test]
async fn test_fetch_versions_includes_yanked_on_request() {
    let server = mock_index(project_page()).await;

    let client =
        SimpleIndexClient::new(true).with_index_url(&format!("{}/simple", server.uri()));
    let versions = client.fetch_versions("example-package").await.expect("fetch");

    let rendered: Vec<String> = versions.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["2.0.0", "1.1.0", "1.0.0"]);
}

#[tokio::test]
async fn test_fetch_versions_normalizes_name_in_url() {
    let server = mock_index(project_page()).await;

    let client =
        SimpleIndexClient::new(false).with_index_url(&format!("{}/simple", server.uri()));
    // PEP 503: Example.Package_ variants normalize to example-package.
    let versions = client.fetch_versions("Example.Package").await.expect("fetch");
    assert!(!versions.is_empty());
}

#[tokio::test]
async fn test_fetch_versions_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/missing/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client =
        SimpleIndexClient::new(false).with_index_url(&format!("{}/simple", server.uri()));
    let err = client.fetch_versions("missing").await.expect_err("404");
    assert!(err.to_string().contains("not found"), "{err}");
}

#[tokio::test]
async fn test_fetch_versions_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/example-package/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client =
        SimpleIndexClient::new(false).with_index_url(&format!("{}/simple", server.uri()));
    let err = client
        .fetch_versions("example-package")
        .await
        .expect_err("500");
    assert!(err.to_string().contains("500"), "{err}");
}
