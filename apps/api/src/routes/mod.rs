pub mod api;
pub mod health;

use axum::{
    routing::{any, get, post},
    Router,
};

use crate::identity::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/auth/signup", post(handlers::handle_signup))
        .route("/auth/login", post(handlers::handle_login))
        // Request Router surface
        .route("/api/v1/*endpoint", any(api::handle_api))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::test_config;
    use crate::generation::testing::ScriptedGateway;
    use crate::identity::testing::StaticIdentityProvider;
    use crate::store::{Collection, DocumentStore};

    fn state() -> AppState {
        AppState::for_tests(
            Arc::new(ScriptedGateway::silent()),
            Arc::new(StaticIdentityProvider::default()),
            test_config(),
        )
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["service"], "placement-api");
    }

    #[tokio::test]
    async fn test_signup_writes_skeleton_profile() {
        let state = state();
        let store = state.store.clone();
        let response = build_router(state)
            .oneshot(post_json(
                "/auth/signup",
                json!({"email": "neha@example.com", "password": "hunter22"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let doc = store
            .get(Collection::Users, "uid-neha")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc["profileCompleted"], false);
        assert_eq!(doc["email"], "neha@example.com");
        assert!(doc.get("createdAt").is_some());
    }

    #[tokio::test]
    async fn test_signup_requires_credentials() {
        let response = build_router(state())
            .oneshot(post_json("/auth/signup", json!({"email": " ", "password": ""})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_401() {
        let response = build_router(state())
            .oneshot(post_json(
                "/auth/login",
                json!({"email": "neha@example.com", "password": "nope"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_returns_session() {
        let response = build_router(state())
            .oneshot(post_json(
                "/auth/login",
                json!({"email": "neha@example.com", "password": "correct-password"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["uid"], "uid-neha");
        assert!(json["idToken"].as_str().is_some());
    }
}
