use api_lib::{
    adapters::MemoryAdCodeStore,
    config::Config,
    web::{router, AiReadiness, AppState},
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use revenue_content_core::{
    ports::{AdCodeStore, AdCodeUpdate, ContentGenerationService, PortResult},
    AiReply, AiSettings, GenerationRequest,
};
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

const TOKEN: &str = "test-csrf-token";

/// Answers every prompt with the same three-section article and counts calls.
#[derive(Default)]
struct StubAi {
    calls: AtomicUsize,
}

#[async_trait]
impl ContentGenerationService for StubAi {
    async fn generate(
        &self,
        _prompt: &str,
        _settings: &AiSettings,
        request: &GenerationRequest,
    ) -> PortResult<AiReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AiReply::Text(article(&request.keyword)))
    }
}

fn article(keyword: &str) -> String {
    let body = format!("{keyword}에 대해 꼭 알아야 할 내용을 자세히 정리했습니다. ").repeat(5);
    format!(
        "# {keyword} 완벽 가이드\n\n## {keyword}란?\n{body}\n\n## {keyword} 방법\n{body}\n\n## {keyword} 주의사항\n{body}"
    )
}

struct TestApp {
    app: Router,
    store: Arc<MemoryAdCodeStore>,
    ai: Arc<StubAi>,
}

fn test_app(config: Config, ready: bool) -> TestApp {
    let store = Arc::new(MemoryAdCodeStore::new());
    let ai = Arc::new(StubAi::default());
    let readiness = if ready {
        AiReadiness::ready(ai.clone())
    } else {
        AiReadiness::new()
    };
    let state = Arc::new(AppState {
        config: Arc::new(config),
        ad_codes: store.clone(),
        ai: readiness,
    });
    TestApp {
        app: router(state),
        store,
        ai,
    }
}

fn default_app() -> TestApp {
    test_app(Config::default(), true)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, format!("csrf={TOKEN}"))
        .header("x-csrf-token", TOKEN)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn csrf_token_is_set_as_cookie_and_returned() {
    let TestApp { app, .. } = default_app();
    let response = app
        .oneshot(Request::get("/csrf").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap();
    assert!(cookie.starts_with(&format!("csrf={token};")));
}

#[tokio::test]
async fn mutating_requests_without_csrf_are_forbidden() {
    let TestApp { app, .. } = default_app();
    let request = Request::post("/prompts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"topic": "a", "keyword": "b"}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn mismatched_csrf_header_is_forbidden() {
    let TestApp { app, .. } = default_app();
    let request = Request::post("/prompts")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, "csrf=one")
        .header("x-csrf-token", "two")
        .body(Body::from(json!({"topic": "a", "keyword": "b"}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn prompt_requires_topic_and_keyword() {
    let TestApp { app, .. } = default_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/prompts",
            json!({"topic": "  ", "keyword": "다이어트"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn prompt_is_built_with_title_and_ad_warnings() {
    let TestApp { app, .. } = default_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/prompts",
            json!({
                "topic": "다이어트 방법",
                "keyword": "다이어트",
                "ad_code_top": "<ins class=\"adsbygoogle\"></ins>",
                "ad_code_bottom": "not html at all"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["prompt"].as_str().unwrap().contains("다이어트"));
    assert_eq!(body["use_client_generation"], json!(true));
    assert!(body["suggested_title"]
        .as_str()
        .unwrap()
        .starts_with("다이어트 - 다이어트 방법"));
    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].as_str().unwrap().starts_with("Bottom"));
}

#[tokio::test]
async fn short_ai_content_is_unprocessable() {
    let TestApp { app, .. } = default_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/content",
            json!({"ai_content": "## 짧다\n너무 짧은 답변", "keyword": "다이어트"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn ai_content_in_message_shape_is_structured_and_scored() {
    let TestApp { app, .. } = default_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/content",
            json!({
                "ai_content": {"message": article("다이어트")},
                "keyword": "다이어트",
                "ad_code_top": "<ins>top-ad</ins>"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let content = body["content"].as_str().unwrap();
    assert_eq!(content.matches("<h2 class=\"seo-subtitle\">").count(), 3);
    assert!(content.contains("<ins>top-ad</ins>"));
    assert!(content.contains("cta-button"));
    assert!(content.contains("application/ld+json"));
    assert!(body["seo_score"]["score"].as_u64().unwrap() <= 100);
    assert_eq!(body["seo_score"]["details"].as_array().unwrap().len(), 7);
    assert!(!body["seo_summary"].as_str().unwrap().is_empty());
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn ai_content_is_sanitized_before_structuring() {
    let TestApp { app, .. } = default_app();
    let ai_content = format!(
        "{}\n<img src=x onerror=alert(1)> <script>steal()</script>",
        article("다이어트")
    );
    let response = app
        .oneshot(json_request(
            "POST",
            "/content",
            json!({
                "ai_content": ai_content,
                "keyword": "<b>다이어트</b>",
                "ad_code_top": "<script async src=\"https://ads.example/ad.js\"></script>"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let content = body["content"].as_str().unwrap();
    assert!(!content.contains("onerror"));
    assert!(!content.contains("steal()"));
    assert!(content.contains("<img src=\"x\">"));
    assert!(!content.contains("<b>다이어트</b>"));
    // Ad codes are editor input and keep their embed script.
    assert!(content.contains("https://ads.example/ad.js"));
}

#[tokio::test]
async fn prompt_warns_when_no_ad_codes_are_given() {
    let TestApp { app, .. } = default_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/prompts",
            json!({"topic": "<i>다이어트 방법</i>", "keyword": "다이어트"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["topic"], json!("다이어트 방법"));
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_article_request_never_reaches_the_ai() {
    let TestApp { app, ai, .. } = default_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/articles",
            json!({"topic": "다이어트 방법", "keyword": ""}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ai.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn article_is_generated_with_saved_ad_codes() {
    let TestApp { app, store, ai } = default_app();
    let document_id = Uuid::new_v4();
    store
        .save_ad_codes(
            document_id,
            &AdCodeUpdate {
                top: Some("<ins>saved-top</ins>".into()),
                bottom: Some("<ins>saved-bottom</ins>".into()),
            },
        )
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/articles",
            json!({
                "topic": "다이어트 방법",
                "keyword": "다이어트",
                "ad_code_bottom": "<ins>request-bottom</ins>",
                "document_id": document_id
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ai.calls.load(Ordering::SeqCst), 1);
    let body = body_json(response).await;
    let content = body["content"].as_str().unwrap();
    assert!(content.contains("<ins>saved-top</ins>"));
    assert!(content.contains("<ins>request-bottom</ins>"));
    assert!(!content.contains("saved-bottom"));
    assert!(body["prompt"].as_str().unwrap().contains("다이어트"));
    assert!(body["seo_score"]["grade"].is_string());
}

#[tokio::test]
async fn article_request_times_out_when_ai_never_becomes_ready() {
    let config = Config {
        ai_ready_timeout: Duration::from_millis(20),
        ..Config::default()
    };
    let TestApp { app, .. } = test_app(config, false);

    let response = app
        .oneshot(json_request(
            "POST",
            "/articles",
            json!({"topic": "다이어트 방법", "keyword": "다이어트"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn autosave_writes_nothing() {
    let TestApp { app, store, .. } = default_app();
    let document_id = Uuid::new_v4();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/documents/{document_id}/ad-codes"),
            json!({"ad_code_top": "<ins>top</ins>", "autosave": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(store.load_ad_codes(document_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn saving_updates_only_the_fields_sent() {
    let TestApp { app, .. } = default_app();
    let uri = format!("/documents/{}/ad-codes", Uuid::new_v4());

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({"ad_code_top": "<ins>top</ins>", "ad_code_bottom": "<ins>bottom</ins>"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({"ad_code_bottom": "<ins>new-bottom</ins>"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::get(uri.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ad_code_top"], json!("<ins>top</ins>"));
    assert_eq!(body["ad_code_bottom"], json!("<ins>new-bottom</ins>"));
}

#[tokio::test]
async fn editor_token_is_enforced_when_configured() {
    let config = Config {
        editor_token: Some("secret".to_string()),
        ..Config::default()
    };
    let TestApp { app, .. } = test_app(config, true);

    let response = app
        .clone()
        .oneshot(Request::get("/csrf").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::get("/csrf")
                .header(header::AUTHORIZATION, "Bearer secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
