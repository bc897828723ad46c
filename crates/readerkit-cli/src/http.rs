//! Streamable HTTP transport
//!
//! A single endpoint at `/`: GET returns server metadata, POST carries
//! one JSON-RPC message and answers with one JSON-RPC response.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use readerkit::rpc::{self, JsonRpcError, JsonRpcResponse};
use readerkit::{Adapter, ServerMetadata};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Start the HTTP server and run until Ctrl-C
pub async fn serve(addr: &str, adapter: Adapter) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "MCP Streamable HTTP endpoint: http://{}/",
        listener.local_addr()?
    );

    axum::serve(listener, router(adapter))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Create the MCP router
pub fn router(adapter: Adapter) -> Router {
    Router::new()
        .route("/", get(server_metadata).post(handle_message))
        .layer(TraceLayer::new_for_http())
        .with_state(adapter)
}

async fn server_metadata() -> Json<ServerMetadata> {
    Json(ServerMetadata::default())
}

async fn handle_message(State(adapter): State<Adapter>, body: Bytes) -> Response {
    let raw = match std::str::from_utf8(&body) {
        Ok(raw) => raw,
        Err(e) => {
            return Json(JsonRpcResponse::error(None, JsonRpcError::parse_error(e)))
                .into_response();
        }
    };

    let request = match rpc::parse_request(raw) {
        Ok(request) => request,
        Err(response) => return Json(response).into_response(),
    };

    if request.is_notification() {
        debug!(method = %request.method, "Notification acknowledged");
        return StatusCode::ACCEPTED.into_response();
    }

    Json(adapter.dispatch(request).await).into_response()
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down...");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use readerkit::ReaderClient;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_router(base_url: &str) -> Router {
        let client = ReaderClient::builder().base_url(base_url).build().unwrap();
        router(Adapter::with_reader(client))
    }

    async fn post(app: Router, body: impl Into<Body>) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn post_json(app: Router, body: Value) -> Value {
        let (status, bytes) = post(app, body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_metadata() {
        let app = test_router("http://localhost:3000");
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["name"], "reader-mcp");
        assert!(value["version"].is_string());
        assert_eq!(
            value["description"],
            "MCP server for Reader URL to LLM-friendly conversion"
        );
    }

    #[tokio::test]
    async fn test_initialize() {
        let app = test_router("http://localhost:3000");
        let value = post_json(
            app,
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        )
        .await;

        assert_eq!(value["id"], 1);
        assert_eq!(value["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(value["result"]["serverInfo"]["name"], "reader-mcp");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let app = test_router("http://localhost:3000");
        let value = post_json(
            app,
            json!({"jsonrpc": "2.0", "id": "a", "method": "tools/list"}),
        )
        .await;

        let names: Vec<&str> = value["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            ["get_markdown", "get_html", "get_text", "get_screenshot", "get_pageshot"]
        );
        assert_eq!(value["id"], "a");
    }

    #[tokio::test]
    async fn test_tools_call_forwards_to_reader() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/example.com/page"))
            .and(header("X-Respond-With", "markdown"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# Hello"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let app = test_router(&mock_server.uri());
        let value = post_json(
            app,
            json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": {"name": "get_markdown", "arguments": {"url": "example.com/page"}}
            }),
        )
        .await;

        assert_eq!(
            value["result"],
            json!({"content": [{"type": "text", "text": "# Hello"}]})
        );
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let app = test_router("http://localhost:3000");
        let value = post_json(
            app,
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/foo"}),
        )
        .await;

        assert_eq!(value["error"]["code"], -32601);
        assert_eq!(value["error"]["message"], "Method not found: tools/foo");
        assert!(value.get("result").is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let app = test_router("http://localhost:3000");
        let (status, bytes) = post(app, "{oops").await;
        assert_eq!(status, StatusCode::OK);

        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["error"]["code"], -32700);
        assert!(value["id"].is_null());
    }

    #[tokio::test]
    async fn test_notification_is_accepted_without_body() {
        let app = test_router("http://localhost:3000");
        let (status, bytes) = post(
            app,
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(bytes.is_empty());
    }
}
