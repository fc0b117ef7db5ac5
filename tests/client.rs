mod common;

use cloudant_client::{ClientBuilder, CouchError};
use common::{MockResponse, MockWebServer};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_base_uri_has_no_trailing_slash() {
    let server = MockWebServer::start().await;
    let client = ClientBuilder::url(&format!("{}/", server.url()))
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(client.base_uri(), server.url());
    assert!(!client.base_uri().ends_with('/'));
    assert_eq!(client.uri().path("").path("api").path("couch").build(), format!("{}/api/couch", server.url()));
}

#[tokio::test]
async fn test_server_version() {
    let server = MockWebServer::start().await;
    server.enqueue(MockResponse::ok(
        r#"{"couchdb":"Welcome","version":"3.3.3","vendor":{"name":"The Apache Software Foundation"}}"#,
    ));

    let version = server.client().server_version().await.unwrap();

    assert_eq!(version, "3.3.3");
    assert_eq!(server.take_request().path, "/");
}

#[tokio::test]
async fn test_all_dbs() {
    let server = MockWebServer::start().await;
    server.enqueue(MockResponse::ok(r#"["_replicator","animaldb"]"#));

    let dbs = server.client().all_dbs().await.unwrap();

    assert_eq!(dbs, vec!["_replicator".to_string(), "animaldb".to_string()]);
    assert_eq!(server.take_request().path, "/_all_dbs");
}

#[tokio::test]
async fn test_create_db_when_present() {
    let server = MockWebServer::start().await;
    server.enqueue(MockResponse::ok(r#"{"db_name":"animaldb"}"#));

    server.client().create_db("animaldb").await.unwrap();

    assert_eq!(server.request_count(), 1);
    assert_eq!(server.take_request().method, "GET");
}

#[tokio::test]
async fn test_create_db_when_missing() {
    let server = MockWebServer::start().await;
    server.enqueue(MockResponse::new(404, r#"{"error":"not_found","reason":"Database does not exist."}"#));
    server.enqueue(MockResponse::new(201, r#"{"ok":true}"#));

    let db = server.client().database("animaldb", true).await.unwrap();

    assert_eq!(db.name(), "animaldb");
    assert_eq!(server.request_count(), 2);
    assert_eq!(server.take_request().method, "GET");
    let put = server.take_request();
    assert_eq!(put.method, "PUT");
    assert_eq!(put.path, "/animaldb");
}

#[tokio::test]
async fn test_create_db_created_concurrently() {
    let server = MockWebServer::start().await;
    server.enqueue(MockResponse::new(404, r#"{"error":"not_found","reason":"Database does not exist."}"#));
    server.enqueue(MockResponse::new(
        412,
        r#"{"error":"file_exists","reason":"The database could not be created, the file already exists."}"#,
    ));

    let db = server.client().database("animaldb", true).await.unwrap();

    assert_eq!(db.name(), "animaldb");
    assert_eq!(server.request_count(), 2);
    assert_eq!(server.take_request().method, "GET");
    assert_eq!(server.take_request().method, "PUT");
}

#[tokio::test]
async fn test_create_partitioned_db() {
    let server = MockWebServer::start().await;
    server.enqueue(MockResponse::new(201, r#"{"ok":true}"#));

    server.client().create_partitioned_db("animaldb").await.unwrap();

    let request = server.take_request();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/animaldb?partitioned=true");
}

#[tokio::test]
async fn test_delete_db_failure_maps_status() {
    let server = MockWebServer::start().await;
    server.enqueue(MockResponse::new(412, r#"{"error":"precondition_failed"}"#));

    let err = server.client().delete_db("animaldb").await.unwrap_err();

    assert!(matches!(err, CouchError::PreconditionFailed(_)));
    assert_eq!(server.take_request().method, "DELETE");
}

#[tokio::test]
async fn test_uuids() {
    let server = MockWebServer::start().await;
    server.enqueue(MockResponse::ok(r#"{"uuids":["a1","b2"]}"#));

    let uuids = server.client().uuids(2).await.unwrap();

    assert_eq!(uuids, vec!["a1".to_string(), "b2".to_string()]);
    assert_eq!(server.take_request().path, "/_uuids?count=2");
}

#[tokio::test]
async fn test_basic_auth_from_url() {
    let server = MockWebServer::start().await;
    server.enqueue(MockResponse::ok(r#"[]"#));

    let url = server.url().replacen("http://", "http://admin:pass@", 1);
    let client = ClientBuilder::url(&url).unwrap().build().unwrap();
    client.all_dbs().await.unwrap();

    assert!(!client.base_uri().contains("admin"));
    let request = server.take_request();
    assert_eq!(
        request.headers.get("authorization").map(String::as_str),
        Some("Basic YWRtaW46cGFzcw==")
    );
}

#[tokio::test]
async fn test_server_error_details() {
    let server = MockWebServer::start().await;
    server.enqueue(MockResponse::new(500, r#"{"error":"unknown","reason":"boom"}"#));

    let err = server.client().all_dbs().await.unwrap_err();

    assert!(matches!(err, CouchError::Server(_)));
    let message = err.to_string();
    assert!(message.starts_with("500 Internal Server Error at "), "{}", message);
    assert!(message.ends_with("Error: unknown. Reason: boom."), "{}", message);
}
