//! Gemini client against a local stand-in server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use shortnotes::config::Config;
use shortnotes::generation::{GeminiClient, GenerationError, NoteGenerator};

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

/// Start a stub that answers every `generateContent` call with `reply`.
async fn start_stub(status: StatusCode, reply: Value) -> (String, Recorded) {
    let recorded = Recorded::default();

    let app = Router::new()
        .route(
            "/v1beta/models/{model}",
            post(
                move |State(recorded): State<Recorded>,
                      Path(model): Path<String>,
                      headers: HeaderMap,
                      Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        let key = headers
                            .get("x-goog-api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        recorded.requests.lock().unwrap().push((model, key, body));
                        (status, Json(reply))
                    }
                },
            ),
        )
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1beta", addr), recorded)
}

fn text_reply(parts: &[&str]) -> Value {
    let parts: Vec<Value> = parts.iter().map(|t| json!({ "text": t })).collect();
    json!({ "candidates": [{ "content": { "role": "model", "parts": parts } }] })
}

#[tokio::test]
async fn sends_prompt_key_and_generation_config() {
    let (base_url, recorded) = start_stub(StatusCode::OK, text_reply(&["# Note"])).await;
    let client = GeminiClient::new(&base_url, "gemini-test", Some("secret".into()));

    let text = client.generate("Write a note").await.expect("generation failed");
    assert_eq!(text, "# Note");

    let requests = recorded.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (model, key, body) = &requests[0];
    assert_eq!(model, "gemini-test:generateContent");
    assert_eq!(key.as_deref(), Some("secret"));
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Write a note");
    assert_eq!(body["generationConfig"]["thinkingConfig"]["thinkingBudget"], 0);
}

#[tokio::test]
async fn joins_text_parts() {
    let (base_url, _) = start_stub(StatusCode::OK, text_reply(&["# Title\n", "Body"])).await;
    let client = GeminiClient::new(&base_url, "m", Some("k".into()));

    assert_eq!(client.generate("p").await.unwrap(), "# Title\nBody");
}

#[tokio::test]
async fn missing_key_fails_without_a_request() {
    let (base_url, recorded) = start_stub(StatusCode::OK, text_reply(&["unused"])).await;
    let client = GeminiClient::new(&base_url, "m", None);

    let err = client.generate("p").await.expect_err("should fail");
    assert!(matches!(err, GenerationError::MissingApiKey));
    assert!(recorded.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn rejected_key_maps_to_unauthorized() {
    let (base_url, _) = start_stub(
        StatusCode::FORBIDDEN,
        json!({ "error": { "message": "API key not valid" } }),
    )
    .await;
    let client = GeminiClient::new(&base_url, "m", Some("bad".into()));

    let err = client.generate("p").await.expect_err("should fail");
    assert!(matches!(err, GenerationError::Unauthorized));
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let (base_url, _) = start_stub(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "error": { "message": "overloaded" } }),
    )
    .await;
    let client = GeminiClient::new(&base_url, "m", Some("k".into()));

    match client.generate("p").await {
        Err(GenerationError::Api(msg)) => {
            assert!(msg.contains("503"));
            assert!(msg.contains("overloaded"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_candidates_are_an_error() {
    let (base_url, _) = start_stub(StatusCode::OK, json!({ "candidates": [] })).await;
    let client = GeminiClient::new(&base_url, "m", Some("k".into()));

    let err = client.generate("p").await.expect_err("should fail");
    assert!(matches!(err, GenerationError::EmptyResponse));
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = Config {
        api_key: Some("k".into()),
        base_url: format!("http://{}/v1beta", addr),
        request_timeout: Duration::from_secs(2),
        ..Config::default()
    };
    let client = GeminiClient::from_config(&config).unwrap();

    let err = client.generate("p").await.expect_err("should fail");
    assert!(matches!(err, GenerationError::Http(_)));
}
