// tests/remote_api.rs
//! HTTP-level tests: the real client against a mock Notion server.

use notion2sections::{
    AppError, ClientConfig, DocumentAssembler, NotionHttpClient, NotionRpc, PageId,
    DEFAULT_PAGE_ID,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixture(raw: &str) -> Value {
    serde_json::from_str(raw).expect("fixture is valid JSON")
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_base_url(&server.uri())
        .expect("mock server URI is valid")
}

fn client_for(server: &MockServer) -> NotionHttpClient {
    NotionHttpClient::new(config_for(server).base_url).expect("client builds")
}

fn default_page() -> PageId {
    PageId::parse(DEFAULT_PAGE_ID).unwrap()
}

#[tokio::test]
async fn call_posts_json_to_the_named_function() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/getSpaces"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({ "hello": "notion" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .call("getSpaces", &json!({ "hello": "notion" }))
        .await
        .unwrap();
    assert_eq!(result, json!({ "ok": true }));
}

#[tokio::test]
async fn non_success_status_is_a_remote_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/loadPageChunk"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("x-request-id", "req-42")
                .set_body_string("upstream exploded"),
        )
        .mount(&server)
        .await;

    let assembler = DocumentAssembler::new(client_for(&server), config_for(&server));
    let err = assembler.assemble(&default_page()).await.unwrap_err();

    match &err {
        AppError::RemoteApi {
            status,
            headers,
            body,
        } => {
            assert_eq!(status.as_u16(), 500);
            assert!(headers.contains(r#""x-request-id":["req-42"]"#));
            assert_eq!(body.as_deref(), Some("upstream exploded"));
        }
        other => panic!("expected RemoteApi, got {:?}", other),
    }

    let message = err.to_string();
    assert!(message.contains("Notion API error (500)"));
    assert!(message.contains("req-42"));
}

#[tokio::test]
async fn failing_collection_query_rejects_the_whole_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/loadPageChunk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recordMap": { "block": {
                "p": { "value": { "type": "page", "properties": { "title": [["Root"]] } } },
                "h": { "value": { "type": "header", "properties": { "title": [["Data"]] } } },
                "cv": { "value": {
                    "type": "collection_view",
                    "collection_id": "col",
                    "view_ids": ["view"]
                } }
            } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v3/queryCollection"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "3"))
        .expect(1)
        .mount(&server)
        .await;

    let assembler = DocumentAssembler::new(client_for(&server), config_for(&server));
    let err = assembler.assemble(&default_page()).await.unwrap_err();

    assert_eq!(err.remote_status().map(|s| s.as_u16()), Some(429));
    let message = err.to_string();
    assert!(message.contains("(429)"));
    assert!(message.contains(r#""retry-after":["3"]"#));
}

#[tokio::test]
async fn default_page_assembles_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/loadPageChunk"))
        .and(body_partial_json(json!({
            "pageId": DEFAULT_PAGE_ID,
            "limit": 100,
            "chunkNumber": 0,
            "verticalColumns": false
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("fixtures/page_chunk.json"))
                .insert_header("content-type", "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v3/queryCollection"))
        .and(body_partial_json(json!({ "collectionId": "meta-collection" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixture(include_str!("fixtures/meta_collection.json"))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v3/queryCollection"))
        .and(body_partial_json(json!({ "collectionId": "schedule-collection" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixture(include_str!("fixtures/schedule_collection.json"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let assembler = DocumentAssembler::new(client_for(&server), config_for(&server));
    let document = assembler.assemble(&default_page()).await.unwrap();

    let titles: Vec<String> = document
        .sections
        .iter()
        .map(|s| s.title.as_ref().map(|t| t.plain_text()).unwrap_or_default())
        .collect();
    assert_eq!(titles, ["Acme Launch", "Schedule", "Contacts"]);
    assert_eq!(
        document.meta.keys().collect::<Vec<_>>(),
        ["due_date", "multi_word", "owner"]
    );

    let json: Value = serde_json::from_str(&document.to_json(true).unwrap()).unwrap();
    assert!(json["sections"].is_array());
    assert!(json["meta"].is_object());
}

#[tokio::test]
async fn invalid_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/loadPageChunk"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let assembler = DocumentAssembler::new(client_for(&server), config_for(&server));
    let err = assembler.assemble(&default_page()).await.unwrap_err();
    assert!(matches!(err, AppError::MalformedResponse(_)));
}
