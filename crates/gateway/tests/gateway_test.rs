use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use concierge_core::mocks::{MockClassifier, MockResolver, MockSubmissionStore};
use concierge_core::types::FallbackIntent;
use concierge_gateway::{GatewayConfig, GatewayServer, IntentRouter};

fn server(
    resolver: MockResolver,
    classifier: MockClassifier,
    store: Arc<MockSubmissionStore>,
) -> GatewayServer {
    let router = IntentRouter::new(Arc::new(resolver), Arc::new(classifier), 0.75);
    GatewayServer::new(GatewayConfig::default(), router, store)
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = server(
        MockResolver::resolving("greeting", 0.9, "Hi!"),
        MockClassifier::returning(FallbackIntent::Irrelevant),
        Arc::new(MockSubmissionStore::new()),
    )
    .build_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_chat_high_confidence() {
    let app = server(
        MockResolver::resolving("greeting", 0.9, "Hello! How can I help?"),
        MockClassifier::returning(FallbackIntent::SupportRequest),
        Arc::new(MockSubmissionStore::new()),
    )
    .build_router();

    let (status, body) = post_json(
        app,
        "/v1/chat",
        json!({"sessionId": "s1", "message": "hi"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Hello! How can I help?");
    assert_eq!(body["intent"], "greeting");
    assert_eq!(body["usedFallback"], false);
}

#[tokio::test]
async fn test_chat_low_confidence_opens_support_modal() {
    let app = server(
        MockResolver::resolving("wrong_guess", 0.3, "canned"),
        MockClassifier::returning(FallbackIntent::SupportRequest),
        Arc::new(MockSubmissionStore::new()),
    )
    .build_router();

    let (status, body) = post_json(
        app,
        "/v1/chat",
        json!({"sessionId": "s1", "message": "I need a refund"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Opening support ticket form...");
    assert_eq!(body["intent"], "support_request");
    assert_eq!(body["payload"], json!({"confirm_modal": "support"}));
    assert_eq!(body["usedFallback"], true);
}

#[tokio::test]
async fn test_chat_resolver_down_returns_500() {
    let app = server(
        MockResolver::failing(),
        MockClassifier::returning(FallbackIntent::Irrelevant),
        Arc::new(MockSubmissionStore::new()),
    )
    .build_router();

    let (status, body) = post_json(
        app,
        "/v1/chat",
        json!({"sessionId": "s1", "message": "hi"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "RESOLVER_ERROR");
}

#[tokio::test]
async fn test_chat_empty_session_rejected() {
    let app = server(
        MockResolver::resolving("greeting", 0.9, "Hi!"),
        MockClassifier::returning(FallbackIntent::Irrelevant),
        Arc::new(MockSubmissionStore::new()),
    )
    .build_router();

    let (status, body) = post_json(
        app,
        "/v1/chat",
        json!({"sessionId": "", "message": "hi"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_submission_recorded() {
    let store = Arc::new(MockSubmissionStore::new());
    let app = server(
        MockResolver::resolving("greeting", 0.9, "Hi!"),
        MockClassifier::returning(FallbackIntent::Irrelevant),
        store.clone(),
    )
    .build_router();

    let (status, body) = post_json(
        app,
        "/v1/submission",
        json!({
            "action": "support",
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Broken widget"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, "support");
    // No `message` field: `subject` fills the textual body.
    assert_eq!(records[0].message, "Broken widget");
}

#[tokio::test]
async fn test_submission_store_failure_still_acknowledged() {
    let app = server(
        MockResolver::resolving("greeting", 0.9, "Hi!"),
        MockClassifier::returning(FallbackIntent::Irrelevant),
        Arc::new(MockSubmissionStore::failing()),
    )
    .build_router();

    let (status, body) = post_json(
        app,
        "/v1/submission",
        json!({"action": "sales", "company": "Acme"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
