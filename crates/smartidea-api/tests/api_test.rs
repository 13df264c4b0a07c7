//! End-to-end tests for the HTTP routes, driven through `tower::ServiceExt::oneshot`.

use std::io::Write;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use smartidea_api::services::Orchestrator;
use smartidea_api::{router, AppConfig, AppState};
use smartidea_core::GatewayError;
use smartidea_db::Database;
use smartidea_inference::mock::MockInferenceBackend;

fn app_with(mock: MockInferenceBackend, config: AppConfig) -> Router {
    let orchestrator = Orchestrator::new(Arc::new(mock), None, 3);
    router(AppState::new(config, Database::in_memory(), orchestrator))
}

fn app(mock: MockInferenceBackend) -> Router {
    app_with(mock, AppConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

async fn register(app: &Router, email: &str) -> String {
    let (status, body) = post(
        app,
        "/api/auth/register",
        None,
        json!({"email": email, "password": "hunter2", "name": "Ada"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

fn quota_error() -> GatewayError {
    GatewayError::RateLimitOrQuota {
        provider: "openai".to_string(),
        message: "insufficient_quota: You exceeded your current quota".to_string(),
    }
}

// =============================================================================
// HEALTH / MIDDLEWARE
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = app(MockInferenceBackend::new());
    let (status, body) = get(&app, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_request_id_header_is_set() {
    let app = app(MockInferenceBackend::new());
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// =============================================================================
// AUTH
// =============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let app = app(MockInferenceBackend::new());
    register(&app, "ada@example.com").await;

    let (status, body) = post(
        &app,
        "/api/auth/login",
        None,
        json!({"email": "ada@example.com", "password": "hunter2"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"], json!({"email": "ada@example.com", "name": "Ada"}));
}

#[tokio::test]
async fn test_register_validation() {
    let app = app(MockInferenceBackend::new());

    let (status, body) = post(&app, "/api/auth/register", None, json!({"email": "a@b.c"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing fields");

    register(&app, "a@b.c").await;
    let (status, body) = post(
        &app,
        "/api/auth/register",
        None,
        json!({"email": "a@b.c", "password": "other"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email exists");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = app(MockInferenceBackend::new());
    register(&app, "ada@example.com").await;

    for body in [
        json!({"email": "ada@example.com", "password": "wrong"}),
        json!({"email": "nobody@example.com", "password": "hunter2"}),
    ] {
        let (status, body) = post(&app, "/api/auth/login", None, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = app(MockInferenceBackend::new());

    let (status, body) = post(&app, "/api/ai/generate-idea", None, json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "No token, authorization denied");

    let (status, body) = get(&app, "/api/ideas/favorites", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token is not valid");
}

// =============================================================================
// SAVED DOCUMENTS
// =============================================================================

#[tokio::test]
async fn test_save_requires_title() {
    let app = app(MockInferenceBackend::new());
    let token = register(&app, "ada@example.com").await;

    let (status, body) = post(
        &app,
        "/api/ideas/save",
        Some(&token),
        json!({"description": "no title"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");
}

#[tokio::test]
async fn test_save_and_merge_by_title() {
    let app = app(MockInferenceBackend::new());
    let token = register(&app, "ada@example.com").await;

    let (status, first) = post(
        &app,
        "/api/ideas/save",
        Some(&token),
        json!({"title": "Acme", "description": "v1", "score": 87, "domain": "Fintech"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["success"], true);
    assert_eq!(first["idea"]["domain"], "Fintech");

    let (status, merged) = post(
        &app,
        "/api/ideas/save",
        Some(&token),
        json!({
            "title": "Acme",
            "_mergeTitle": "Acme",
            "roadmap": {"phases": []},
            "description": ""
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(merged["idea"]["id"], first["idea"]["id"]);
    assert_eq!(merged["idea"]["description"], "v1");
    assert_eq!(merged["idea"]["roadmap"], json!({"phases": []}));

    let (status, favorites) = get(&app, "/api/ideas/favorites", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(favorites.as_array().unwrap().len(), 1);

    let (_, all) = get(&app, "/api/ideas", Some(&token)).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_documents_are_scoped_per_user() {
    let app = app(MockInferenceBackend::new());
    let alice = register(&app, "alice@example.com").await;
    let bob = register(&app, "bob@example.com").await;

    post(&app, "/api/ideas/save", Some(&alice), json!({"title": "Acme"})).await;

    let (_, bobs) = get(&app, "/api/ideas", Some(&bob)).await;
    assert_eq!(bobs, json!([]));
}

// =============================================================================
// GENERATION
// =============================================================================

#[tokio::test]
async fn test_generate_idea_normalizes_completion() {
    let mock = MockInferenceBackend::new().with_fixed_response(
        "Sure! Here are your ideas:\n```json\n[{\"Title\": \"Clinic Queue\", \"Description\": \"Walk-in scheduling\"}]\n```",
    );
    let app = app(mock);
    let token = register(&app, "ada@example.com").await;

    let (status, body) = post(
        &app,
        "/api/ai/generate-idea",
        Some(&token),
        json!({"domain": "Health", "keywords": ["clinics", "ai"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["ideas"][0]["title"], "Clinic Queue");
    assert_eq!(body["ideas"][0]["description"], "Walk-in scheduling");
    assert_eq!(body["context"], json!([]));
    assert!(body.get("fallback").is_none());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_unparseable_completion_returns_raw_content() {
    let mock = MockInferenceBackend::new().with_fixed_response("I cannot help with that.");
    let app = app(mock);
    let token = register(&app, "ada@example.com").await;

    let (status, body) = post(
        &app,
        "/api/ai/generate-roadmap",
        Some(&token),
        json!({"ideaTitle": "Acme"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roadmap"]["parseError"], true);
    assert_eq!(body["roadmap"]["rawContent"], "I cannot help with that.");
}

#[tokio::test]
async fn test_quota_failure_serves_fallback_ideas() {
    let mock = MockInferenceBackend::new().with_completion_failure(quota_error());
    let app = app(mock);
    let token = register(&app, "ada@example.com").await;

    let (status, body) = post(
        &app,
        "/api/ai/generate-idea",
        Some(&token),
        json!({"domain": "Health", "keywords": "clinics"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["fallback"], true);
    assert_eq!(body["warning"], "OpenAI unavailable; showing fallback ideas.");
    assert_eq!(body["ideas"].as_array().unwrap().len(), 3);
    assert_eq!(body["ideas"][0]["title"], "clinics automation platform");
}

#[tokio::test]
async fn test_quota_failure_serves_ten_slide_deck() {
    let mock = MockInferenceBackend::new().with_completion_failure(quota_error());
    let app = app(mock);
    let token = register(&app, "ada@example.com").await;

    let (status, body) = post(
        &app,
        "/api/ai/generate-pitch-deck",
        Some(&token),
        json!({"ideaTitle": "Acme", "fundingGoal": "$2M"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fallback"], true);
    let slides = body["pitchDeck"]["slides"].as_array().unwrap();
    assert_eq!(slides.len(), 10);
    assert_eq!(slides[0]["headline"], "Acme");
    assert_eq!(slides[9]["headline"], "$2M");
}

#[tokio::test]
async fn test_unmasked_failure_returns_structured_500() {
    let mock = MockInferenceBackend::new().with_completion_failure(GatewayError::Auth {
        provider: "local".to_string(),
        message: "Incorrect API key provided".to_string(),
    });
    let app = app(mock);
    let token = register(&app, "ada@example.com").await;

    let (status, body) = post(
        &app,
        "/api/ai/generate-idea",
        Some(&token),
        json!({"domain": "Health"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to generate ideas");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Incorrect API key provided"));
}

#[tokio::test]
async fn test_enhance_requires_idea_object() {
    let app = app(MockInferenceBackend::new());
    let token = register(&app, "ada@example.com").await;

    let (status, _) = post(
        &app,
        "/api/ai/enhance-idea",
        Some(&token),
        json!({"idea": "just a string"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_enhance_idea() {
    let mock = MockInferenceBackend::new().with_fixed_response(
        r#"{"Strengths": ["Clear niche"], "Improvement Suggestions": ["Add pricing tiers"]}"#,
    );
    let app = app(mock);
    let token = register(&app, "ada@example.com").await;

    let (status, body) = post(
        &app,
        "/api/ai/enhance-idea",
        Some(&token),
        json!({"idea": {"title": "Acme"}, "focusArea": "pricing"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enhancement"]["strengths"], json!(["Clear niche"]));
    assert_eq!(body["enhancement"]["suggestions"], json!(["Add pricing tiers"]));
}

// =============================================================================
// TRENDS
// =============================================================================

#[tokio::test]
async fn test_trends_from_csv() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "TOP\nchatgpt,100\nai tools,78\n\nRISING\nai agents,Breakout\n").unwrap();

    let config = AppConfig {
        trends_csv_path: file.path().to_string_lossy().into_owned(),
        ..AppConfig::default()
    };
    let app = app_with(MockInferenceBackend::new(), config);

    let (status, body) = get(&app, "/api/trends?domain=Tech&keywords=ai&region=US", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fallback"], true);
    assert_eq!(body["trends"]["top"][0], json!({"name": "chatgpt", "value": 100.0}));
    assert_eq!(
        body["trends"]["rising"],
        json!([{"name": "ai agents", "value": "Breakout"}])
    );
}

#[tokio::test]
async fn test_trends_missing_file() {
    let config = AppConfig {
        trends_csv_path: "/nonexistent/relatedQueries.csv".to_string(),
        ..AppConfig::default()
    };
    let app = app_with(MockInferenceBackend::new(), config);

    let (status, body) = get(&app, "/api/trends", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch trends");
}
