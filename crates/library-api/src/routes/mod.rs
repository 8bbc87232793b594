//! API 라우트.
//!
//! | 경로 | 모듈 |
//! |---|---|
//! | `/` | 환영 페이지 |
//! | `/health` | [`health`] |
//! | `/user` | [`users`] |
//! | `/books` | [`books`] |
//! | `/docs`, `/api/swagger.json` | [`crate::openapi`] |
//! | `/metrics` | Prometheus |

pub mod books;
pub mod health;
pub mod users;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    middleware,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use library_core::ServerConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

pub use books::books_router;
pub use health::health_router;
pub use users::users_router;

use crate::middleware::metrics_layer;
use crate::openapi::swagger_ui_router;
use crate::response::{Envelope, ResponseStatus};
use crate::state::AppState;

/// 환영 페이지.
pub async fn index() -> Html<&'static str> {
    Html("<h1> Welcome to E-Library </h1>")
}

/// 등록되지 않은 경로.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::message(ResponseStatus::Fail, format!("Not Found {uri}"))),
    )
}

async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
}

/// API 라우터 (미들웨어 제외).
pub fn create_api_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .nest("/health", health_router())
        .nest("/user", users_router(state.clone()))
        .nest("/books", books_router(state))
}

/// 설정된 origin 목록으로 CORS 레이어를 만듭니다. 목록이 비어 있으면 모두 허용합니다.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let allow_origin = if parsed.is_empty() {
        if !origins.is_empty() {
            warn!("cors_origins에 유효한 origin이 없어 모든 origin을 허용합니다");
        }
        AllowOrigin::any()
    } else {
        info!("CORS 허용 origin {}개", parsed.len());
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 조합.
///
/// `metrics_handle`이 없으면 `/metrics`를 마운트하지 않습니다.
pub fn create_router(
    state: Arc<AppState>,
    server: &ServerConfig,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let mut router = Router::new()
        .merge(create_api_router(state.clone()).with_state(state))
        .merge(swagger_ui_router());

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics_handler))
                .with_state(handle),
        );
    }

    router
        .fallback(not_found)
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
            tracing::info_span!(
                "http",
                method = %request.method(),
                uri = %request.uri(),
                user_id = tracing::field::Empty,
            )
        }))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_secs),
        ))
        .layer(cors_layer(&server.cors_origins))
}
