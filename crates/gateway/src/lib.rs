//! HTTP gateway for Dawn.
//!
//! A stateless chat endpoint: every request carries its own history and
//! profile, and the only per-client state is the quota cookie.
//!
//! Routes:
//! - `POST <any path>`   : send a message, get Dawn's reply
//! - `OPTIONS <any path>`: CORS preflight
//! - `GET /health`       : liveness probe
//!
//! Built on Axum.

pub mod chat;
pub mod error;
pub mod quota;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::response::Json;
use axum::routing::{MethodRouter, get, post};
use serde::Serialize;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use dawn_agent::PromptComposer;
use dawn_config::AppConfig;
use dawn_core::provider::Provider;

pub use error::ApiError;
pub use quota::{CookieQuota, QuotaStore};

/// Largest accepted request body, in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Per-request constants, resolved once from configuration.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub rate_limit: u32,
    pub model: String,
    pub dedupe_concerns: bool,
}

impl ChatSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            rate_limit: config.rate_limit,
            model: config.provider.model.clone(),
            dedupe_concerns: config.prompt.dedupe_concerns,
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Shared, read-only application state.
pub struct GatewayState {
    pub settings: ChatSettings,
    pub composer: PromptComposer,
    pub provider: Arc<dyn Provider>,
    pub quota: Arc<dyn QuotaStore>,
}

impl GatewayState {
    /// State backed by the cookie quota.
    pub fn new(settings: ChatSettings, provider: Arc<dyn Provider>) -> Self {
        let composer = PromptComposer::new(settings.dedupe_concerns);
        Self {
            settings,
            composer,
            provider,
            quota: Arc::new(CookieQuota),
        }
    }

    /// Swap the quota storage.
    pub fn with_quota(mut self, quota: Arc<dyn QuotaStore>) -> Self {
        self.quota = quota;
        self
    }
}

pub type SharedState = Arc<GatewayState>;

fn chat_routes() -> MethodRouter<SharedState> {
    post(chat::chat_handler)
        .options(chat::preflight_handler)
        .fallback(chat::method_not_allowed)
}

/// Build the Axum router.
///
/// Layers applied:
/// - CORS headers on every response, errors included
/// - Request body size limit (1 MiB)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/health",
            get(health_handler)
                .options(chat::preflight_handler)
                .fallback(chat::method_not_allowed),
        )
        .route("/", chat_routes())
        .route("/{*path}", chat_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let provider = dawn_providers::build_from_config(&config.provider)?;
    let settings = ChatSettings::from_config(&config);
    info!(
        provider = provider.name(),
        model = %settings.model,
        rate_limit = settings.rate_limit,
        "Gateway configured"
    );

    let state = Arc::new(GatewayState::new(settings, provider));
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatResponse;
    use axum::body::Body;
    use axum::http::header::{COOKIE, SET_COOKIE};
    use axum::http::{Request, StatusCode};
    use dawn_core::error::ProviderError;
    use dawn_core::message::{ConversationTurn, Role};
    use dawn_core::provider::{ProviderRequest, ProviderResponse, Usage};
    use http_body_util::BodyExt;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Provider double that records every request it receives.
    struct MockProvider {
        reply: Result<String, ProviderError>,
        requests: Mutex<Vec<ProviderRequest>>,
    }

    impl MockProvider {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing(err: ProviderError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(err),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn last_request(&self) -> ProviderRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait::async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &str {
            "gateway_mock"
        }

        async fn complete(
            &self,
            request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            self.requests.lock().unwrap().push(request);
            self.reply.clone().map(|content| ProviderResponse {
                content,
                usage: Some(Usage {
                    prompt_tokens: 10,
                    completion_tokens: 5,
                    total_tokens: 15,
                }),
                model: "mock-model".into(),
            })
        }
    }

    fn app(provider: Arc<MockProvider>) -> Router {
        build_router(Arc::new(GatewayState::new(ChatSettings::default(), provider)))
    }

    fn post_json(body: serde_json::Value, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn assert_cors(response: &axum::response::Response) {
        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[tokio::test]
    async fn health_endpoint() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app(MockProvider::replying("hi")).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn options_returns_empty_body_with_cors_on_any_path() {
        for uri in ["/", "/api/chat"] {
            let req = Request::builder()
                .method("OPTIONS")
                .uri(uri)
                .body(Body::empty())
                .unwrap();

            let response = app(MockProvider::replying("hi")).oneshot(req).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_cors(&response);
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            assert!(bytes.is_empty());
        }
    }

    #[tokio::test]
    async fn other_methods_are_rejected() {
        for method in ["GET", "PUT", "DELETE", "PATCH"] {
            let req = Request::builder()
                .method(method)
                .uri("/")
                .body(Body::empty())
                .unwrap();

            let response = app(MockProvider::replying("hi")).oneshot(req).await.unwrap();
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_cors(&response);
            assert_eq!(
                json_body(response).await,
                serde_json::json!({"error": "Method not allowed"})
            );
        }
    }

    #[tokio::test]
    async fn first_message_without_cookie_succeeds() {
        let provider = MockProvider::replying("Hello from Dawn");
        let response = app(provider.clone())
            .oneshot(post_json(serde_json::json!({"message": "Hi"}), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert_eq!(
            response.headers()[SET_COOKIE],
            "dawn_count=1; Max-Age=3600; Path=/; SameSite=Lax"
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ChatResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.response, "Hello from Dawn");
        assert_eq!(body.messages_remaining, 9);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn counter_increments_by_one_and_reports_remaining() {
        for count in [0u32, 4, 9] {
            let provider = MockProvider::replying("ok");
            let cookie = format!("dawn_count={count}");
            let response = app(provider.clone())
                .oneshot(post_json(serde_json::json!({"message": "Hi"}), Some(&cookie)))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let expected = format!("dawn_count={}; Max-Age=3600; Path=/; SameSite=Lax", count + 1);
            assert_eq!(response.headers()[SET_COOKIE], expected.as_str());
            let body = json_body(response).await;
            assert_eq!(body["messagesRemaining"], 10 - count - 1);
        }
    }

    #[tokio::test]
    async fn malformed_cookie_counts_as_zero() {
        let response = app(MockProvider::replying("ok"))
            .oneshot(post_json(serde_json::json!({"message": "Hi"}), Some("dawn_count=abc")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[SET_COOKIE],
            "dawn_count=1; Max-Age=3600; Path=/; SameSite=Lax"
        );
    }

    #[tokio::test]
    async fn exhausted_quota_never_reaches_provider() {
        for count in [10u32, 11, 500] {
            let provider = MockProvider::replying("should not be used");
            let cookie = format!("dawn_count={count}");
            let response = app(provider.clone())
                .oneshot(post_json(serde_json::json!({"message": "Hi"}), Some(&cookie)))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
            assert_cors(&response);
            assert!(response.headers().get(SET_COOKIE).is_none());
            let body = json_body(response).await;
            assert_eq!(body["error"], "Rate limit reached");
            assert!(body["message"].as_str().unwrap().contains("demo limit of 10"));
            assert_eq!(provider.calls(), 0);
        }
    }

    #[tokio::test]
    async fn custom_limit_is_honoured() {
        let provider = MockProvider::replying("ok");
        let settings = ChatSettings {
            rate_limit: 2,
            ..ChatSettings::default()
        };
        let router = build_router(Arc::new(GatewayState::new(settings, provider.clone())));

        let response = router
            .clone()
            .oneshot(post_json(serde_json::json!({"message": "Hi"}), Some("dawn_count=1")))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["messagesRemaining"], 0);

        let response = router
            .oneshot(post_json(serde_json::json!({"message": "Hi"}), Some("dawn_count=2")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn missing_or_empty_message_is_bad_request() {
        let bodies = [
            serde_json::json!({}),
            serde_json::json!({"message": ""}),
            serde_json::json!({"message": null}),
            serde_json::json!({
                "profile": {"stage": "preparation", "concerns": ["side_effects"]},
                "conversationHistory": [{"role": "user", "content": "hi"}]
            }),
        ];
        for body in bodies {
            let provider = MockProvider::replying("ok");
            let response = app(provider.clone()).oneshot(post_json(body, None)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_cors(&response);
            assert_eq!(
                json_body(response).await,
                serde_json::json!({"error": "Message is required"})
            );
            assert_eq!(provider.calls(), 0);
        }
    }

    #[tokio::test]
    async fn malformed_json_is_internal_error() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app(MockProvider::replying("ok")).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body["message"].as_str().unwrap().contains("Invalid request body"));
    }

    #[tokio::test]
    async fn oversized_body_gets_json_error() {
        let provider = MockProvider::replying("ok");
        let message = "a".repeat(MAX_BODY_BYTES * 2);
        let response = app(provider.clone())
            .oneshot(post_json(serde_json::json!({"message": message}), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_cors(&response);
        assert!(response.headers().get(SET_COOKIE).is_none());
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Request body too large"})
        );
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn oversized_body_from_exhausted_client_is_rate_limited() {
        let message = "a".repeat(MAX_BODY_BYTES * 2);
        let response = app(MockProvider::replying("ok"))
            .oneshot(post_json(
                serde_json::json!({"message": message}),
                Some("dawn_count=10"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn worked_example_sends_single_message_upstream() {
        let provider = MockProvider::replying("Side effects are usually mild.");
        let response = app(provider.clone())
            .oneshot(post_json(
                serde_json::json!({
                    "message": "What about side effects?",
                    "profile": {"stage": "preparation", "concerns": ["side_effects"]},
                    "conversationHistory": []
                }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = provider.last_request();
        assert_eq!(request.model, "claude-sonnet-4-20250514");
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.messages, vec![ConversationTurn::user("What about side effects?")]);

        let system = request.system.unwrap();
        assert!(system.contains("Approach: facilitate_action"));
        assert!(system.contains("For side effects:"));
        assert!(system.contains("Parent's message: \"What about side effects?\""));
    }

    #[tokio::test]
    async fn long_history_is_windowed_for_prompt_and_messages() {
        let history: Vec<serde_json::Value> = (0..10)
            .map(|i| {
                let role = if i % 2 == 0 { "user" } else { "assistant" };
                serde_json::json!({"role": role, "content": format!("turn {i}")})
            })
            .collect();

        let provider = MockProvider::replying("ok");
        let response = app(provider.clone())
            .oneshot(post_json(
                serde_json::json!({"message": "latest", "conversationHistory": history}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = provider.last_request();
        assert_eq!(request.messages.len(), 7);
        let contents: Vec<&str> = request.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            contents,
            vec!["turn 4", "turn 5", "turn 6", "turn 7", "turn 8", "turn 9", "latest"]
        );
        assert_eq!(request.messages[6].role, Role::User);

        let system = request.system.unwrap();
        assert!(!system.contains("turn 3\n"));
        assert!(system.contains("Parent: turn 4\n"));
        assert!(system.contains("Dawn: turn 9\n"));
    }

    #[tokio::test]
    async fn upstream_failure_exposes_only_status() {
        let provider = MockProvider::failing(ProviderError::ApiError {
            status_code: 529,
            message: "{\"error\":\"overloaded, internal detail\"}".into(),
        });
        let response = app(provider.clone())
            .oneshot(post_json(serde_json::json!({"message": "Hi"}), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_cors(&response);
        assert!(response.headers().get(SET_COOKIE).is_none());
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "AI service error", "details": 529})
        );
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn transport_failure_is_internal_error() {
        let provider = MockProvider::failing(ProviderError::Timeout("60s elapsed".into()));
        let response = app(provider)
            .oneshot(post_json(serde_json::json!({"message": "Hi"}), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body["message"].as_str().unwrap().contains("60s elapsed"));
    }

    #[tokio::test]
    async fn quota_store_is_swappable() {
        struct FixedQuota(u32);

        impl QuotaStore for FixedQuota {
            fn read_count(&self, _request: &axum::http::HeaderMap) -> u32 {
                self.0
            }

            fn commit(&self, _count: u32, _response: &mut axum::http::HeaderMap) {}
        }

        let provider = MockProvider::replying("ok");
        let state = GatewayState::new(ChatSettings::default(), provider.clone())
            .with_quota(Arc::new(FixedQuota(10)));
        let response = build_router(Arc::new(state))
            .oneshot(post_json(serde_json::json!({"message": "Hi"}), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(provider.calls(), 0);
    }
}
