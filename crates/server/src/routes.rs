pub mod sos;

use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use common::types::{Health, MessageBody};
use models::api::MSG_CORS_OK;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::errors::JsonApiError;
use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> Result<String, JsonApiError> {
    service::metrics::render().map_err(|e| {
        tracing::error!(error = %e, "metrics encoding failed");
        JsonApiError::internal()
    })
}

async fn not_found() -> JsonApiError {
    JsonApiError::new(StatusCode::NOT_FOUND, "Not Found")
}

/// Answer every `OPTIONS` request with a 200 acknowledgement, whatever the path.
pub async fn preflight(req: Request, next: Next) -> Response {
    if req.method() != Method::OPTIONS {
        return next.run(req).await;
    }
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, DELETE, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
        Json(MessageBody::new(MSG_CORS_OK)),
    )
        .into_response()
}

pub fn build_cors() -> CorsLayer {
    CorsLayer::permissive()
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/sos", post(sos::submit_sos).get(sos::list_sos))
        .route("/sos/:id/resolve", post(sos::resolve_sos))
        .route("/sos/:id", delete(sos::delete_sos));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(api)
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(preflight))
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
