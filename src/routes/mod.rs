pub mod api_routes;
pub mod static_routes;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ShellConfig;
use crate::upstream::UpstreamClient;
use api_routes::{api_index, api_not_found, chat_handler, history_handler};
use static_routes::static_routes;

/// Full application router: `/api` forwarding plus the frontend bundle.
pub fn router(upstream: UpstreamClient, config: &ShellConfig) -> Router {
    let api = Router::new()
        .route("/", get(api_index))
        .route("/chat", post(chat_handler))
        .route("/session/{id}/history", get(history_handler))
        .fallback(api_not_found)
        .with_state(upstream);

    let app = Router::new()
        .nest("/api", api)
        .merge(static_routes(&config.static_dir))
        .layer(TraceLayer::new_for_http());

    if config.allowed_origins.is_empty() {
        app
    } else {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::extract::Path;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use axum::Json;
    use reqwest::Url;
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    /// Stand-in chat backend bound to an ephemeral port.
    async fn spawn_upstream() -> Url {
        let app = Router::new()
            .route(
                "/api/chat",
                post(|Json(body): Json<Value>| async move {
                    let message = body["message"].as_str().unwrap_or_default().to_string();
                    let session_id = body
                        .get("session_id")
                        .and_then(Value::as_str)
                        .unwrap_or("srv-1")
                        .to_string();
                    Json(json!({ "reply": format!("echo: {message}"), "session_id": session_id }))
                }),
            )
            .route(
                "/api/session/{id}/history",
                get(|Path(id): Path<String>| async move {
                    if id == "gone" {
                        (StatusCode::NOT_FOUND, Json(json!({ "error": "missing" }))).into_response()
                    } else {
                        Json(json!({
                            "history": [{ "type": "user", "content": "hi" }],
                            "session_id": id,
                        }))
                        .into_response()
                    }
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{addr}")).unwrap()
    }

    async fn closed_port_url() -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        Url::parse(&format!("http://{addr}")).unwrap()
    }

    fn test_app(upstream_url: Url, static_dir: &std::path::Path) -> Router {
        let config = ShellConfig {
            port: 0,
            upstream_url: upstream_url.clone(),
            static_dir: static_dir.to_path_buf(),
            allowed_origins: Vec::new(),
        };
        router(UpstreamClient::new(upstream_url).unwrap(), &config)
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn chat_is_forwarded_to_upstream() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(spawn_upstream().await, dir.path());

        let resp = app
            .oneshot(post_chat(r#"{"message":"hello","tool":""}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["reply"], "echo: hello");
        assert_eq!(body["session_id"], "srv-1");
    }

    #[tokio::test]
    async fn chat_keeps_client_session_id() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(spawn_upstream().await, dir.path());

        let resp = app
            .oneshot(post_chat(
                r#"{"message":"hi","tool":"translate","target_language":"English","session_id":"abc"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(body_json(resp).await["session_id"], "abc");
    }

    #[tokio::test]
    async fn malformed_chat_body_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(spawn_upstream().await, dir.path());

        let resp = app.clone().oneshot(post_chat("{not json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = app.oneshot(post_chat("[1, 2]")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn history_is_forwarded_with_escaped_id() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(spawn_upstream().await, dir.path());

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/session/a%20b/history")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["session_id"], "a b");
        assert_eq!(body["history"][0]["type"], "user");
    }

    #[tokio::test]
    async fn blank_session_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(spawn_upstream().await, dir.path());

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/session/%20%20/history")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await["error"],
            "Bad request: session id cannot be empty"
        );
    }

    #[tokio::test]
    async fn api_root_reports_liveness() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(closed_port_url().await, dir.path());

        let resp = app
            .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["message"], "AI Assistant API is running");
    }

    #[tokio::test]
    async fn upstream_status_is_relayed() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(spawn_upstream().await, dir.path());

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/session/gone/history")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "missing");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(closed_port_url().await, dir.path());

        let resp = app
            .oneshot(post_chat(r#"{"message":"hello","tool":""}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert!(body_json(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn unknown_api_path_is_json_404() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>app</html>").unwrap();
        let app = test_app(spawn_upstream().await, dir.path());

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/conversations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "API endpoint not found");
    }

    #[tokio::test]
    async fn frontend_routes_fall_back_to_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>app</html>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();
        let app = test_app(spawn_upstream().await, dir.path());

        let resp = app
            .clone()
            .oneshot(Request::builder().uri("/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"console.log(1)");

        let resp = app
            .oneshot(Request::builder().uri("/chat/123").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<html>app</html>");
    }
}
