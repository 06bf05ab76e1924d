#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    routing::{post, put},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use learntrack_web::{ApiRequest, ApiResponse, CookieJar, Transport, UiError, UiResult};

pub const SESSION_COOKIES: &str = "foo=bar; XSRF-TOKEN=abc123; baz=qux";

pub fn session_cookies() -> CookieJar<fn() -> String> {
    CookieJar::new(
        "XSRF-TOKEN",
        (|| SESSION_COOKIES.to_string()) as fn() -> String,
    )
}

pub fn no_cookies() -> CookieJar<fn() -> String> {
    CookieJar::new("XSRF-TOKEN", (|| "foo=bar".to_string()) as fn() -> String)
}

#[derive(Clone, Debug)]
pub struct Hit {
    pub method: String,
    pub path: String,
    pub token: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

/// Stand-in for the course server: records every mutation and answers like
/// the real routes do (201 create, 200 update, 204 delete, 403 without token).
#[derive(Clone, Default)]
pub struct Backend {
    hits: Arc<Mutex<Vec<Hit>>>,
    forced: Arc<Mutex<Option<StatusCode>>>,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(&self, status: StatusCode) {
        *self.forced.lock().unwrap() = Some(status);
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/courses", post(record))
            .route("/courses/:course_id", put(record).delete(record))
            .route("/courses/:course_id/lessons", post(record))
            .route(
                "/courses/:course_id/lessons/:lesson_id",
                put(record).delete(record),
            )
            .route("/courses/:course_id/lessons/:lesson_id/reviews", post(record))
            .route(
                "/courses/:course_id/lessons/:lesson_id/reviews/:review_id",
                put(record).delete(record),
            )
            .with_state(self.clone())
    }

    pub fn transport(&self) -> RouterTransport {
        RouterTransport {
            router: self.router(),
        }
    }
}

async fn record(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let token = header("X-XSRF-TOKEN");
    backend.hits.lock().unwrap().push(Hit {
        method: method.to_string(),
        path: uri.path().to_string(),
        token: token.clone(),
        content_type: header("Content-Type"),
        body: if body.is_empty() {
            None
        } else {
            serde_json::from_slice(&body).ok()
        },
    });

    if let Some(status) = *backend.forced.lock().unwrap() {
        return status;
    }
    if token.is_none() {
        return StatusCode::FORBIDDEN;
    }
    match method {
        Method::POST => StatusCode::CREATED,
        Method::PUT => StatusCode::OK,
        Method::DELETE => StatusCode::NO_CONTENT,
        _ => StatusCode::METHOD_NOT_ALLOWED,
    }
}

/// Drives requests through the router in-process. Yields once before
/// answering so the caller sees a real suspension point.
pub struct RouterTransport {
    router: Router,
}

impl Transport for RouterTransport {
    async fn send(&self, request: ApiRequest) -> UiResult<ApiResponse> {
        tokio::task::yield_now().await;

        let mut builder = Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let body = request.body.map(Body::from).unwrap_or_else(Body::empty);
        let req = builder
            .body(body)
            .map_err(|e| UiError::Network(e.to_string()))?;

        let resp = self
            .router
            .clone()
            .oneshot(req)
            .await
            .map_err(|e| UiError::Network(e.to_string()))?;
        Ok(ApiResponse {
            status: resp.status().as_u16(),
        })
    }
}

pub struct OfflineTransport;

impl Transport for OfflineTransport {
    async fn send(&self, _request: ApiRequest) -> UiResult<ApiResponse> {
        Err(UiError::Network("Failed to fetch".into()))
    }
}
