//! Axum router configuration with middleware.
//!
//! API routes live under `/api/` (trailing slashes included, matching the
//! paths clients already use). Middleware: CORS and request tracing.
//!
//! | Method & path       | Auth | Success                                  |
//! |---------------------|------|------------------------------------------|
//! | POST /api/chat/     | yes  | `{ok, reply, tokens}`                     |
//! | POST /api/tokens/add/ | yes | `{ok, tokens}`                          |
//! | GET /api/messages/  | yes  | `{ok, messages: [{role, content, created_at}]}` |
//! | GET /health         | no   | `{status, version}`                       |

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/chat/", post(handlers::chat::send_chat))
        .route("/tokens/add/", post(handlers::tokens::add_tokens))
        .route("/messages/", get(handlers::messages::list_messages));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use tokenchat_infra::config::GenerationConfig;
    use tokenchat_infra::sqlite::DatabasePool;
    use tokenchat_types::config::ServiceConfig;

    use crate::http::extractors::auth::{generate_api_key, hash_api_key};

    /// State over a temp database with the generation endpoint pointed at
    /// a closed port, so every remote call takes the echo fallback path.
    async fn test_state(tokens: i64) -> (tempfile::TempDir, AppState, String) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();

        let generation = GenerationConfig {
            api_key: Some(SecretString::from("remote-key")),
            api_url: Some("http://127.0.0.1:1/generate".to_string()),
            max_tokens: 512,
            timeout: Duration::from_millis(500),
        };
        let state = AppState::wire(pool, ServiceConfig::default(), generation);

        let user = state.accounts.create_user("tester", tokens).await.unwrap();
        let api_key = generate_api_key();
        state
            .accounts
            .insert_api_key(&user.id, &hash_api_key(&api_key))
            .await
            .unwrap();

        (dir, state, api_key)
    }

    async fn request(
        app: Router,
        method: &str,
        uri: &str,
        api_key: Option<&str>,
        body: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(key) = api_key {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {key}"));
        }
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(Body::from(body.unwrap_or_default().to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_chat_echo_fallback_then_insufficient() {
        let (_dir, state, key) = test_state(1).await;
        let app = build_router(state);

        // Remote unreachable: the paid turn still gets a reply.
        let (status, body) = request(
            app.clone(),
            "POST",
            "/api/chat/",
            Some(&key),
            Some(r#"{"message": "hello"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["reply"], "Echo: hello");
        assert_eq!(body["tokens"], 0);

        // Balance exhausted: 402 with current balance, no new messages.
        let (status, body) = request(
            app.clone(),
            "POST",
            "/api/chat/",
            Some(&key),
            Some(r#"{"message": "again"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Insufficient tokens");
        assert_eq!(body["tokens"], 0);

        // Exactly the two turns from the accepted send, ascending.
        let (status, body) = request(app, "GET", "/api/messages/", Some(&key), None).await;
        assert_eq!(status, StatusCode::OK);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "hello");
        assert_eq!(messages[1]["role"], "bot");
        assert_eq!(messages[1]["content"], "Echo: hello");
        assert!(messages[0]["created_at"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_chat_empty_message_rejected_without_charge() {
        let (_dir, state, key) = test_state(5).await;
        let app = build_router(state);

        let (status, body) = request(
            app.clone(),
            "POST",
            "/api/chat/",
            Some(&key),
            Some(r#"{"message": "   "}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Empty message");

        let (_, body) = request(app, "GET", "/api/messages/", Some(&key), None).await;
        assert!(body["messages"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_malformed_body_is_bad_request() {
        let (_dir, state, key) = test_state(5).await;
        let app = build_router(state);

        let (status, _) = request(
            app,
            "POST",
            "/api/chat/",
            Some(&key),
            Some("not json at all"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_and_invalid_api_key() {
        let (_dir, state, _key) = test_state(5).await;
        let app = build_router(state);

        let (status, body) = request(
            app.clone(),
            "POST",
            "/api/chat/",
            None,
            Some(r#"{"message": "hi"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["ok"], false);

        let (status, _) = request(
            app,
            "POST",
            "/api/chat/",
            Some("tc_wrong"),
            Some(r#"{"message": "hi"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_add_tokens_validation_and_credit() {
        let (_dir, state, key) = test_state(100).await;
        let app = build_router(state);

        for amount in ["0", "-10"] {
            let (status, body) = request(
                app.clone(),
                "POST",
                "/api/tokens/add/",
                Some(&key),
                Some(&format!(r#"{{"amount": {amount}}}"#)),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["ok"], false);
            assert_eq!(body["error"], "Amount must be positive");
        }

        let (status, body) = request(
            app,
            "POST",
            "/api/tokens/add/",
            Some(&key),
            Some(r#"{"amount": 25}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["tokens"], 125);
    }

    #[tokio::test]
    async fn test_messages_limit_falls_back_on_parse_failure() {
        let (_dir, state, key) = test_state(5).await;
        let app = build_router(state);

        let (status, body) = request(
            app,
            "GET",
            "/api/messages/?limit=abc",
            Some(&key),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_health_needs_no_auth() {
        let (_dir, state, _key) = test_state(5).await;
        let app = build_router(state);

        let (status, body) = request(app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
