use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::assets;
use crate::state::AppState;

/// All routes of the prompt service: the two document endpoints plus the
/// embedded editor assets, with permissive CORS on everything.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/prompts",
            get(fetch_prompts_handler).post(replace_prompts_handler),
        )
        .route("/", get(index_handler))
        .route("/{file}", get(asset_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Returns the backing file verbatim. The body is whatever is on disk, so
/// a hand-edited document reaches the client with its formatting intact.
async fn fetch_prompts_handler(State(state): State<AppState>) -> Response {
    match state.store.read_document() {
        Ok(document) => {
            ([(header::CONTENT_TYPE, "application/json")], document).into_response()
        }
        Err(error) => {
            error!("Failed to read prompts file: {:#}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error reading prompts file.",
            )
                .into_response()
        }
    }
}

/// Replaces the backing file with the posted array. The extractor enforces
/// "a JSON array" and nothing more; element shape is not validated.
async fn replace_prompts_handler(
    State(state): State<AppState>,
    Json(prompts): Json<Vec<serde_json::Value>>,
) -> Response {
    match state.store.replace_document(&prompts) {
        Ok(()) => "Prompts saved successfully.".into_response(),
        Err(error) => {
            error!("Failed to write prompts file: {:#}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error writing prompts file.",
            )
                .into_response()
        }
    }
}

async fn index_handler() -> Response {
    assets::response_for("index.html").unwrap_or_else(not_found)
}

async fn asset_handler(Path(file): Path<String>) -> Response {
    assets::response_for(&file).unwrap_or_else(not_found)
}

fn not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PromptStore;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt as _;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router(dir: &tempfile::TempDir) -> Router {
        let store = PromptStore::new(dir.path().join("prompts.json"));
        router(AppState::new(Arc::new(store)))
    }

    fn temp_dir() -> tempfile::TempDir {
        match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create tempdir: {error}"),
        }
    }

    fn get_request(uri: &str) -> Request<Body> {
        match Request::builder().uri(uri).body(Body::empty()) {
            Ok(request) => request,
            Err(error) => panic!("failed to build request: {error}"),
        }
    }

    fn post_prompts_request(payload: &serde_json::Value) -> Request<Body> {
        match Request::builder()
            .method("POST")
            .uri("/api/prompts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
        {
            Ok(request) => request,
            Err(error) => panic!("failed to build request: {error}"),
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        match app.clone().oneshot(request).await {
            Ok(response) => response,
            Err(error) => panic!("request should succeed: {error}"),
        }
    }

    async fn body_text(response: Response) -> String {
        let collected = match response.into_body().collect().await {
            Ok(collected) => collected,
            Err(error) => panic!("failed to read body: {error}"),
        };
        String::from_utf8_lossy(&collected.to_bytes()).to_string()
    }

    #[tokio::test]
    async fn fetch_returns_500_when_file_missing() {
        let dir = temp_dir();
        let app = test_router(&dir);

        let response = send(&app, get_request("/api/prompts")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Error reading prompts file.");
    }

    #[tokio::test]
    async fn replace_then_fetch_round_trips() {
        let dir = temp_dir();
        let app = test_router(&dir);
        let payload = json!([{"type": "User", "name": "A", "prompt": "hi"}]);

        let response = send(&app, post_prompts_request(&payload)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Prompts saved successfully.");

        let response = send(&app, get_request("/api/prompts")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );

        let fetched: serde_json::Value = match serde_json::from_str(&body_text(response).await) {
            Ok(value) => value,
            Err(error) => panic!("fetched document is not valid JSON: {error}"),
        };
        assert_eq!(fetched, payload);
    }

    #[tokio::test]
    async fn replace_writes_pretty_printed_file() {
        let dir = temp_dir();
        let app = test_router(&dir);
        let payload = json!([{"type": "System", "name": "A", "prompt": "hi"}]);

        let response = send(&app, post_prompts_request(&payload)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let on_disk = match std::fs::read_to_string(dir.path().join("prompts.json")) {
            Ok(text) => text,
            Err(error) => panic!("failed to read backing file: {error}"),
        };
        let expected = match serde_json::to_string_pretty(&payload) {
            Ok(text) => text,
            Err(error) => panic!("failed to pretty-print expectation: {error}"),
        };
        assert_eq!(on_disk, expected);
    }

    #[tokio::test]
    async fn replace_accepts_entries_missing_fields() {
        let dir = temp_dir();
        let app = test_router(&dir);
        // No `prompt`, no `type`: shape is the client's business, not ours.
        let payload = json!([{"name": "half a prompt"}]);

        let response = send(&app, post_prompts_request(&payload)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, get_request("/api/prompts")).await;
        let fetched: serde_json::Value = match serde_json::from_str(&body_text(response).await) {
            Ok(value) => value,
            Err(error) => panic!("fetched document is not valid JSON: {error}"),
        };
        assert_eq!(fetched, payload);
    }

    #[tokio::test]
    async fn replace_rejects_non_array_body() {
        let dir = temp_dir();
        let app = test_router(&dir);

        let response = send(&app, post_prompts_request(&json!({"name": "not a list"}))).await;
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn write_failure_returns_500_and_service_recovers() {
        let dir = temp_dir();
        let blocked = dir.path().join("prompts.json");
        if let Err(error) = std::fs::create_dir(&blocked) {
            panic!("failed to create blocking directory: {error}");
        }
        let app = test_router(&dir);
        let payload = json!([{"type": "User", "name": "A", "prompt": "hi"}]);

        let response = send(&app, post_prompts_request(&payload)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Error writing prompts file.");

        // The failure is per-request; the instance keeps answering.
        let response = send(&app, get_request("/api/prompts")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        if let Err(error) = std::fs::remove_dir(&blocked) {
            panic!("failed to remove blocking directory: {error}");
        }

        let response = send(&app, post_prompts_request(&payload)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, get_request("/api/prompts")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn index_and_assets_are_served() {
        let dir = temp_dir();
        let app = test_router(&dir);

        for (uri, content_type) in [
            ("/", "text/html; charset=utf-8"),
            ("/index.html", "text/html; charset=utf-8"),
            ("/style.css", "text/css"),
            ("/app.js", "application/javascript"),
        ] {
            let response = send(&app, get_request(uri)).await;
            assert_eq!(response.status(), StatusCode::OK, "uri: {uri}");
            assert_eq!(
                response
                    .headers()
                    .get(header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok()),
                Some(content_type),
                "uri: {uri}"
            );
        }
    }

    #[tokio::test]
    async fn unknown_asset_returns_404() {
        let dir = temp_dir();
        let app = test_router(&dir);

        let response = send(&app, get_request("/favicon.ico")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cross_origin_requests_are_allowed() {
        let dir = temp_dir();
        let app = test_router(&dir);

        let request = match Request::builder()
            .uri("/api/prompts")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
        {
            Ok(request) => request,
            Err(error) => panic!("failed to build request: {error}"),
        };

        let response = send(&app, request).await;
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
    }
}
