use crate::client::LlmClient;
use crate::enhance::SearchEnhancer;
use crate::error::LlmError;
use chatio_core::{MessageRecord, SearchHit};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hits() -> Vec<SearchHit> {
    ["m1", "m2"]
        .into_iter()
        .map(|id| {
            SearchHit::new(
                MessageRecord {
                    id: id.to_owned(),
                    conversation_id: "c".to_owned(),
                    author_id: "a".to_owned(),
                    content: "release is on friday".to_owned(),
                    created_at: None,
                },
                0.5,
            )
        })
        .collect()
}

fn enhancement_reply() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": "{\"summary\": \"Release timing.\", \"ranked_ids\": [\"m2\"]}"
            }
        }]
    }))
}

fn client_for(server: &MockServer) -> LlmClient {
    LlmClient::new("test-key".to_owned(), server.uri()).unwrap().with_model("test-model".to_owned())
}

#[tokio::test]
async fn test_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(enhancement_reply())
        .expect(1)
        .mount(&server)
        .await;

    let enhancement = client_for(&server).enhance("release", &hits()).await.unwrap();
    assert_eq!(enhancement.results.first().map(SearchHit::id), Some("m2"));
}

#[tokio::test]
async fn test_retry_on_429_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(enhancement_reply())
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let enhancement = client_for(&server).enhance("release", &hits()).await.unwrap();
    assert_eq!(enhancement.summary.as_deref(), Some("Release timing."));
}

#[tokio::test]
async fn test_no_retry_on_401() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).enhance("release", &hits()).await.unwrap_err();
    assert!(matches!(err, LlmError::HttpStatus { code: 401, .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_all_retries_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(4)
        .mount(&server)
        .await;

    let err = client_for(&server).enhance("release", &hits()).await.unwrap_err();
    assert!(matches!(err, LlmError::RetriesExhausted(_)));
    let message = err.to_string();
    assert!(message.contains("503"));
    assert!(message.contains("Service Unavailable"));
}

#[tokio::test]
async fn test_empty_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server).enhance("release", &hits()).await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}
