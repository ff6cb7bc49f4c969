use std::future::Future;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http, Json,
};
use bytes::Bytes;
use serde_json::Value;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::MaybeIdentity;
use crate::router::{ApiResponse, Method};
use crate::state::AppState;

/// GET|POST /api/v1/*endpoint
///
/// Forwards `(endpoint, method, body)` to the router and races it against the
/// caller-side timeout for the method.
pub async fn handle_api(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
    method: http::Method,
    Path(endpoint): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse>, AppError> {
    let path = format!("/{}", endpoint.trim_start_matches('/'));
    let method = Method::from_http(&method).ok_or_else(|| AppError::InvalidEndpoint {
        method: method.to_string(),
        endpoint: path.clone(),
    })?;
    let body = parse_body(&body)?;

    let request_id = Uuid::new_v4();
    let span = info_span!("api_request", %request_id, %method, endpoint = %path);

    let dispatcher = state.dispatcher.clone();
    let call_path = path.clone();
    let call = async move {
        dispatcher
            .handle_request(identity.as_ref(), &call_path, method, body)
            .await
    };

    let response = with_timeout(call.instrument(span), state.config.timeout_for(method), &path)
        .await?;
    Ok(Json(response))
}

/// Empty bodies are "no body"; anything else must be JSON.
fn parse_body(raw: &[u8]) -> Result<Option<Value>, AppError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(raw)
        .map(Some)
        .map_err(|e| AppError::Validation(format!("request body is not valid JSON: {e}")))
}

/// Waits at most `timeout` for `call`. The call runs as its own task, so on timeout
/// only the waiting stops; the call itself runs to completion.
async fn with_timeout<F, T>(call: F, timeout: Duration, endpoint: &str) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::spawn(call);
    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(AppError::Internal(format!(
            "router task for {endpoint} failed: {join_error}"
        ))),
        Err(_) => Err(AppError::RequestTimeout {
            endpoint: endpoint.to_string(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::config::test_config;
    use crate::generation::testing::ScriptedGateway;
    use crate::identity::testing::{StaticIdentityProvider, UnreachableIdentityProvider};
    use crate::llm_client::{ContentGateway, GenerationRequest, LlmError};
    use crate::models::job::static_jobs;
    use crate::routes::build_router;
    use crate::store::{Collection, DocumentStore};

    const TOKEN: &str = "valid-token";

    fn identity() -> Arc<StaticIdentityProvider> {
        Arc::new(StaticIdentityProvider::default().with_token(TOKEN, "uid-1"))
    }

    fn state_with(gateway: Arc<dyn ContentGateway>) -> AppState {
        AppState::for_tests(gateway, identity(), test_config())
    }

    async fn json_body(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Authorization", format!("Bearer {TOKEN}"))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_jobs_are_public() {
        let app = build_router(state_with(Arc::new(ScriptedGateway::silent())));
        let (status, body) = json_body(app.oneshot(get("/api/v1/jobs", None)).await.unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::to_value(static_jobs()).unwrap());
    }

    #[tokio::test]
    async fn test_profile_without_token_is_401() {
        let app = build_router(state_with(Arc::new(ScriptedGateway::silent())));
        let (status, body) =
            json_body(app.oneshot(get("/api/v1/profile", None)).await.unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_rejected_token_counts_as_no_identity() {
        let app = build_router(state_with(Arc::new(ScriptedGateway::silent())));
        let response = app
            .oneshot(get("/api/v1/profile", Some("forged")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_identity_outage_keeps_jobs_public() {
        let state = AppState::for_tests(
            Arc::new(ScriptedGateway::silent()),
            Arc::new(UnreachableIdentityProvider),
            test_config(),
        );
        let app = build_router(state);

        let response = app
            .clone()
            .oneshot(get("/api/v1/jobs", Some("stale")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (status, body) =
            json_body(app.oneshot(get("/api/v1/profile", Some("stale"))).await.unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_unknown_endpoint_is_404() {
        let app = build_router(state_with(Arc::new(ScriptedGateway::silent())));
        let (status, body) = json_body(
            app.oneshot(get("/api/v1/leaderboard", Some(TOKEN)))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "INVALID_ENDPOINT");
    }

    #[tokio::test]
    async fn test_unsupported_method_is_invalid_endpoint() {
        let app = build_router(state_with(Arc::new(ScriptedGateway::silent())));
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/v1/profile")
            .header("Authorization", format!("Bearer {TOKEN}"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(
            app.oneshot(request).await.unwrap().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_400() {
        let app = build_router(state_with(Arc::new(ScriptedGateway::silent())));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/chat")
            .header("Authorization", format!("Bearer {TOKEN}"))
            .body(Body::from("message=hi"))
            .unwrap();
        let (status, body) = json_body(app.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let app = build_router(state_with(Arc::new(ScriptedGateway::replying(
            "Revise OS scheduling.",
        ))));
        let (status, body) = json_body(
            app.oneshot(post("/api/v1/chat", json!({"message": "What next?"})))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"text": "Revise OS scheduling."}));
    }

    #[tokio::test]
    async fn test_malformed_model_output_is_502() {
        let app = build_router(state_with(Arc::new(ScriptedGateway::replying(
            "Sorry, I can't help with that.",
        ))));
        let (status, body) = json_body(
            app.oneshot(post(
                "/api/v1/generate-assessment",
                json!({"topic": "Networks"}),
            ))
            .await
            .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "MALFORMED_JSON");
    }

    /// Answers correctly, but only after a long delay.
    struct SlowGateway {
        delay: Duration,
        reply: &'static str,
    }

    #[async_trait]
    impl ContentGateway for SlowGateway {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<Option<String>, LlmError> {
            tokio::time::sleep(self.delay).await;
            Ok(Some(self.reply.to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_abandons_wait_but_call_completes() {
        let gateway = Arc::new(SlowGateway {
            delay: Duration::from_secs(120),
            reply: r#"{"welcomeMessage": "late", "strengths": [], "focusAreas": [],
                       "nextSteps": [], "sessionSummary": ""}"#,
        });
        let mut config = test_config();
        config.post_timeout_ms = 50;
        let state = AppState::for_tests(gateway, identity(), config);
        let store = state.store.clone();
        let app = build_router(state);

        let (status, body) = json_body(
            app.oneshot(post(
                "/api/v1/generate-briefing",
                json!({"profile": {"name": "Asha"}}),
            ))
            .await
            .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"]["code"], "REQUEST_TIMEOUT");
        assert!(store.get(Collection::Briefings, "uid-1").await.unwrap().is_none());

        tokio::time::sleep(Duration::from_secs(300)).await;
        let stored = store.get(Collection::Briefings, "uid-1").await.unwrap().unwrap();
        assert_eq!(stored["welcomeMessage"], "late");
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_passes_through_fast_results() {
        let ok = with_timeout(async { Ok::<_, AppError>(7) }, Duration::from_millis(10), "/x")
            .await
            .unwrap();
        assert_eq!(ok, 7);

        let err = with_timeout(
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, AppError>(())
            },
            Duration::from_millis(10),
            "/slow",
        )
        .await
        .unwrap_err();
        match err {
            AppError::RequestTimeout {
                endpoint,
                timeout_ms,
            } => {
                assert_eq!(endpoint, "/slow");
                assert_eq!(timeout_ms, 10);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b"").unwrap(), None);
        assert_eq!(parse_body(b" \n").unwrap(), None);
        assert_eq!(parse_body(br#"{"a":1}"#).unwrap(), Some(json!({"a": 1})));
        assert!(matches!(parse_body(b"{"), Err(AppError::Validation(_))));
    }
}
