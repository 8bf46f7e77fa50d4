use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

use crate::state::AppState;

// Header names are case-insensitive; lowercase keeps it usable as a static `HeaderName`
const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Webhook
        .route("/", any(webhook))
        .route("/webhook", any(webhook))

        // Health check
        .route("/api/health", get(health_check))
}

/// Always acknowledges with `200 OK` so Telegram never redelivers an update
async fn webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, &'static str) {
    const ACK: (StatusCode, &str) = (StatusCode::OK, "OK");

    if method != Method::POST {
        return ACK;
    }

    if !secret_matches(state.config.bot_config.webhook_secret.as_deref(), &headers) {
        warn!("Rejected update with missing or wrong secret token");
        return ACK;
    }

    let body = match body {
        Ok(body) => body,
        Err(e) => {
            warn!("Could not read update body: {}", e);
            return ACK;
        }
    };

    let span = info_span!("update", request_id = %Uuid::new_v4());
    let outcome = state.pipeline.handle_body(&body).instrument(span).await;
    debug!("Update handled: {:?}", outcome);

    ACK
}

fn secret_matches(expected: Option<&str>, headers: &HeaderMap) -> bool {
    let Some(expected) = expected else {
        return true;
    };
    headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| constant_time_eq(v, expected))
}

/// Compares without short-circuiting on the first differing byte
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "toggle_store": state.pipeline.store_backend()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::language::LanguageClassifier;
    use crate::pipeline::tests::{RecordingSender, StubTranslator};
    use crate::pipeline::Pipeline;
    use crate::toggle::{MemoryToggleStore, ToggleStore};
    use crate::update::ChatId;

    struct TestApp {
        router: Router,
        store: Arc<MemoryToggleStore>,
        sender: Arc<RecordingSender>,
    }

    fn app(webhook_secret: Option<&str>) -> TestApp {
        let mut config: Config =
            serde_json::from_value(json!({"bot_config": {"bot_token": "123:abc"}})).unwrap();
        config.bot_config.webhook_secret = webhook_secret.map(str::to_string);

        let store = Arc::new(MemoryToggleStore::new());
        let sender = Arc::new(RecordingSender::default());
        let pipeline = Pipeline::new(
            store.clone(),
            Arc::new(StubTranslator::returning(Some("Hello World"))),
            sender.clone(),
            LanguageClassifier::new(&config.classifier),
            config.translate_config.clone(),
        );
        let state = AppState::with_pipeline(config, pipeline);

        TestApp {
            router: create_routes().with_state(state),
            store,
            sender,
        }
    }

    fn update(chat: i64, text: &str) -> String {
        json!({
            "update_id": 1,
            "message": {"message_id": 1, "chat": {"id": chat, "type": "private"}, "text": text}
        })
        .to_string()
    }

    async fn read_body(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn post_update_is_handled_and_acknowledged() {
        let app = app(None);
        app.store.set(ChatId(10), true).await.unwrap();

        let response = app
            .router
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(update(10, "你好世界")))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_body(response).await, "OK");
        assert_eq!(app.sender.sent(), vec![(ChatId(10), "Hello World".to_string())]);
    }

    #[tokio::test]
    async fn non_post_and_malformed_requests_are_acknowledged() {
        let app = app(None);

        let get = app
            .router
            .clone()
            .oneshot(Request::get("/webhook").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(get.status(), StatusCode::OK);

        let malformed = app
            .router
            .clone()
            .oneshot(Request::post("/webhook").body(Body::from("{not json")).unwrap())
            .await
            .unwrap();
        assert_eq!(malformed.status(), StatusCode::OK);
        assert_eq!(read_body(malformed).await, "OK");

        assert!(app.sender.sent().is_empty());
    }

    #[tokio::test]
    async fn wrong_secret_is_ignored_but_acknowledged() {
        let app = app(Some("s3cret"));

        let response = app
            .router
            .clone()
            .oneshot(
                Request::post("/webhook")
                    .header(SECRET_TOKEN_HEADER, "nope")
                    .body(Body::from(update(1, "/on")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!app.store.get(ChatId(1)).await.unwrap());

        let response = app
            .router
            .oneshot(
                Request::post("/webhook")
                    .header(SECRET_TOKEN_HEADER, "s3cret")
                    .body(Body::from(update(1, "/on")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(app.store.get(ChatId(1)).await.unwrap());
    }

    #[tokio::test]
    async fn health_reports_store_backend() {
        let app = app(None);

        let response = app
            .router
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&read_body(response).await).unwrap();
        assert_eq!(body, json!({"status": "ok", "toggle_store": "memory"}));
    }

    #[test]
    fn secret_check_is_skipped_when_unset() {
        assert!(secret_matches(None, &HeaderMap::new()));
        assert!(!secret_matches(Some("x"), &HeaderMap::new()));
    }

    #[test]
    fn secret_comparison_checks_every_byte() {
        assert!(constant_time_eq("s3cret", "s3cret"));
        assert!(!constant_time_eq("s3cret", "s3creT"));
        assert!(!constant_time_eq("s3cret", "s3cre"));
        assert!(!constant_time_eq("", "x"));

        let mut headers = HeaderMap::new();
        headers.insert(SECRET_TOKEN_HEADER, "s3cret".parse().unwrap());
        assert!(secret_matches(Some("s3cret"), &headers));
        assert!(!secret_matches(Some("S3cret"), &headers));
    }
}
