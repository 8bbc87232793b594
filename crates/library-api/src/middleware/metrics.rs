//! HTTP 요청 metrics middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{
    normalize_path, record_http_duration, record_http_request, record_http_response,
};

/// 모든 요청의 수, 응답 상태, 처리 시간을 기록합니다.
pub async fn metrics_layer(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    record_http_request(&method, &path);

    let response = next.run(request).await;

    record_http_response(&method, &path, response.status().as_u16());
    record_http_duration(&method, &path, start.elapsed().as_secs_f64());

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::put,
        Router,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_metrics_middleware_passes_through() {
        let app = Router::new()
            .route("/books/{id}/mark-unavailable", put(|| async { StatusCode::NO_CONTENT }))
            .layer(middleware::from_fn(metrics_layer));

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/books/123e4567-e89b-12d3-a456-426614174000/mark-unavailable")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
