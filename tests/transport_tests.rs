mod common;

use common::{setup_client, signed_in_client, TOKEN};
use forecast_rust::error::Error;
use forecast_rust::fetch::{BatchRequest, Method};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in_client(&mock_server.uri());
    let body = client.client().get("/profile").send().await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_no_token_no_header() {
    let mock_server = MockServer::start().await;

    // Mounted first so it wins whenever a header is present
    Mock::given(method("GET"))
        .and(path("/outfit-posts"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/outfit-posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server.uri());
    let body = client.client().get("/outfit-posts").send().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_public_request_skips_stored_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = signed_in_client(&mock_server.uri());
    let body = client
        .client()
        .post("/login")
        .auth(false)
        .json(&json!({}))
        .unwrap()
        .send()
        .await
        .unwrap();
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_error_body_becomes_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_string("無効または期限切れのトークンです"))
        .mount(&mock_server)
        .await;

    let client = signed_in_client(&mock_server.uri());
    let err = client.client().get("/profile").send().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "無効または期限切れのトークンです");
}

#[tokio::test]
async fn test_empty_error_body_uses_status_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/clothing/1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = signed_in_client(&mock_server.uri());
    let err = client.client().delete("/clothing/1").send().await.unwrap_err();

    match err {
        Error::Request { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "HTTP error! status: 503");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_text_body_is_returned_as_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server.uri());
    let body = client.client().get("/health").send().await.unwrap();
    assert_eq!(body, json!("OK"));
}

#[tokio::test]
async fn test_query_and_body_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(query_param("q", "ジャケット"))
        .and(query_param("page", "2"))
        .and(body_json(json!({ "season": "winter" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hits": 1 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server.uri());
    let body = client
        .client()
        .post("/search")
        .query("q", "ジャケット")
        .query("page", 2)
        .json(&json!({ "season": "winter" }))
        .unwrap()
        .send()
        .await
        .unwrap();
    assert_eq!(body["hits"], 1);
}

#[tokio::test]
async fn test_batch_keeps_request_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!("a"))
                .set_delay(std::time::Duration::from_millis(100)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/b"))
        .and(body_json(json!({ "n": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("b")))
        .mount(&mock_server)
        .await;

    let client = signed_in_client(&mock_server.uri());
    let results = client
        .client()
        .batch(&[
            BatchRequest::get("/a"),
            BatchRequest::with_body(Method::PUT, "/b", json!({ "n": 1 })),
        ])
        .await
        .unwrap();
    assert_eq!(results, vec![json!("a"), json!("b")]);
}

#[tokio::test]
async fn test_batch_sends_empty_object_for_bodyless_writes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/outfit-posts/p1/like"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("liked")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/profile"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("saved")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = signed_in_client(&mock_server.uri());
    let results = client
        .client()
        .batch(&[
            BatchRequest {
                method: Method::POST,
                path: "/outfit-posts/p1/like".into(),
                body: None,
            },
            BatchRequest {
                method: Method::PUT,
                path: "/profile".into(),
                body: None,
            },
        ])
        .await
        .unwrap();
    assert_eq!(results, vec![json!("liked"), json!("saved")]);
}

#[tokio::test]
async fn test_batch_fails_on_first_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(1)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server.uri());
    let err = client
        .client()
        .batch(&[BatchRequest::get("/ok"), BatchRequest::get("/missing")])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_unreachable_backend_is_http_error() {
    // Nothing listens on port 9 locally
    let client = setup_client("http://127.0.0.1:9");
    let err = client.client().get("/profile").send().await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
