use serde_json::json;
use std::time::Duration;

use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jibu::config::EndpointConfig;
use jibu::error::GenerationFailure;
use jibu::generate::{create_generator, GenerationConfig, Generator, Role, Turn};
use jibu::session::PromptSession;

fn endpoint_for(server: &MockServer) -> EndpointConfig {
    EndpointConfig {
        api_base: Some(server.uri()),
        model: "gemini-1.0-pro".to_string(),
        api_key: Some("test-key".to_string()),
        timeout_seconds: 5,
    }
}

fn jess_seed() -> Vec<Turn> {
    vec![
        Turn::user("hello"),
        Turn::model("My name is Jess, your friendly multilingual assistant."),
    ]
}

fn reply_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 21,
            "candidatesTokenCount": 9,
            "totalTokenCount": 30
        }
    })
}

/// A seeded session forwards the full ordered history and records the
/// reply as the new history tail.
#[tokio::test]
async fn test_send_returns_reply_and_extends_history() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.0-pro:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "hello"}]},
                {"role": "model", "parts": [{"text": "My name is Jess, your friendly multilingual assistant."}]},
                {"role": "user", "parts": [{"text": "habari yako"}]}
            ],
            "generationConfig": {
                "maxOutputTokens": 2048,
                "responseMimeType": "text/plain"
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(reply_body("Good, thank you! How can I assist you?")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let generator = create_generator(&endpoint_for(&server)).unwrap();
    let mut session =
        PromptSession::new(generator, None, GenerationConfig::default(), jess_seed());

    let reply = session.send("habari yako").await.unwrap();

    assert_eq!(reply, "Good, thank you! How can I assist you?");
    assert_eq!(session.len(), 4);
    assert_eq!(
        session.history()[2],
        Turn::user("habari yako")
    );
    assert_eq!(
        session.history()[3],
        Turn::model("Good, thank you! How can I assist you?")
    );

    let usage = session.usage();
    assert_eq!(usage.prompt_tokens, 21);
    assert_eq!(usage.candidate_tokens, 9);
    assert_eq!(usage.total_tokens, 30);
}

/// The system instruction travels with every request when present.
#[tokio::test]
async fn test_system_instruction_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.0-pro:generateContent"))
        .and(body_partial_json(json!({
            "systemInstruction": {"parts": [{"text": "You are terse."}]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let generator = create_generator(&endpoint_for(&server)).unwrap();
    let mut session = PromptSession::new(
        generator,
        Some("You are terse.".to_string()),
        GenerationConfig::default(),
        Vec::new(),
    );

    let reply = session.send("hi").await.unwrap();
    assert_eq!(reply, "ok");
}

/// Zero candidates fail the send without appending a model turn.
#[tokio::test]
async fn test_empty_candidates_fail_without_model_turn() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.0-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .expect(1)
        .mount(&server)
        .await;

    let generator = create_generator(&endpoint_for(&server)).unwrap();
    let mut session =
        PromptSession::new(generator, None, GenerationConfig::default(), jess_seed());

    let err = session.send("habari yako").await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GenerationFailure>(),
        Some(GenerationFailure::EmptyResponse)
    ));
    // The user turn stays; the caller may prune it
    assert_eq!(session.len(), 3);
    assert_eq!(session.history().last().unwrap().role, Role::User);
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.0-pro:generateContent"))
        .respond_with(ResponseTemplate::new(401).set_body_string("API key not valid"))
        .expect(1)
        .mount(&server)
        .await;

    let generator = create_generator(&endpoint_for(&server)).unwrap();
    let mut session =
        PromptSession::new(generator, None, GenerationConfig::default(), Vec::new());

    let err = session.send("hi").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GenerationFailure>(),
        Some(GenerationFailure::AuthFailure(_))
    ));
}

#[tokio::test]
async fn test_too_many_requests_maps_to_quota_exceeded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.0-pro:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_string("resource exhausted"))
        .expect(1)
        .mount(&server)
        .await;

    let generator = create_generator(&endpoint_for(&server)).unwrap();
    let mut session =
        PromptSession::new(generator, None, GenerationConfig::default(), Vec::new());

    let err = session.send("hi").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GenerationFailure>(),
        Some(GenerationFailure::QuotaExceeded(_))
    ));
}

#[tokio::test]
async fn test_server_error_maps_to_network_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.0-pro:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let generator = create_generator(&endpoint_for(&server)).unwrap();
    let mut session =
        PromptSession::new(generator, None, GenerationConfig::default(), Vec::new());

    let err = session.send("hi").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GenerationFailure>(),
        Some(GenerationFailure::Network(_))
    ));
}

#[tokio::test]
async fn test_undecodable_body_maps_to_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.0-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .expect(1)
        .mount(&server)
        .await;

    let generator = create_generator(&endpoint_for(&server)).unwrap();
    let mut session =
        PromptSession::new(generator, None, GenerationConfig::default(), Vec::new());

    let err = session.send("hi").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GenerationFailure>(),
        Some(GenerationFailure::MalformedResponse(_))
    ));
}

/// Two successful round trips grow the history by two turns each.
#[tokio::test]
async fn test_sequential_sends_grow_history_by_two_each() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.0-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("sawa")))
        .expect(2)
        .mount(&server)
        .await;

    let generator = create_generator(&endpoint_for(&server)).unwrap();
    let mut session =
        PromptSession::new(generator, None, GenerationConfig::default(), jess_seed());
    let initial = session.len();

    session.send("first").await.unwrap();
    session.send("second").await.unwrap();

    assert_eq!(session.len(), initial + 4);
    let roles: Vec<Role> = session.history()[initial..]
        .iter()
        .map(|turn| turn.role)
        .collect();
    assert_eq!(roles, vec![Role::User, Role::Model, Role::User, Role::Model]);
}

/// A caller-supplied deadline fails the call and leaves history untouched.
#[tokio::test]
async fn test_send_with_timeout_expiry_restores_history() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.0-pro:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(reply_body("too late"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let generator = create_generator(&endpoint_for(&server)).unwrap();
    let mut session =
        PromptSession::new(generator, None, GenerationConfig::default(), jess_seed());

    let err = session
        .send_with_timeout("habari yako", Duration::from_millis(50))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GenerationFailure>(),
        Some(GenerationFailure::Timeout(_))
    ));
    assert_eq!(session.history(), jess_seed().as_slice());
}

#[tokio::test]
async fn test_list_models_maps_wire_fields() {
    let server = MockServer::start().await;

    let body = json!({
        "models": [
            {
                "name": "models/gemini-1.0-pro",
                "displayName": "Gemini 1.0 Pro",
                "inputTokenLimit": 30720,
                "outputTokenLimit": 2048
            },
            {
                "name": "models/embedding-001"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let generator = create_generator(&endpoint_for(&server)).unwrap();
    let models = generator.list_models().await.unwrap();

    assert_eq!(models.len(), 2);
    assert_eq!(models[0].name, "models/gemini-1.0-pro");
    assert_eq!(models[0].display_name, "Gemini 1.0 Pro");
    assert_eq!(models[0].input_token_limit, 30720);
    // Display name falls back to the resource name when absent
    assert_eq!(models[1].display_name, "models/embedding-001");
}

#[tokio::test]
async fn test_list_models_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let generator = create_generator(&endpoint_for(&server)).unwrap();
    let err = generator.list_models().await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GenerationFailure>(),
        Some(GenerationFailure::AuthFailure(_))
    ));
}
