//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭과 인증/도서 관련 카운터를 수집하고 `/metrics`로 노출합니다.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Prometheus 레코더를 설치하고 렌더링용 핸들을 반환합니다.
///
/// # Errors
///
/// 레코더가 이미 설치되어 있으면 실패합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()
}

// ==================== HTTP ====================

/// HTTP 요청 카운터 증가.
pub fn record_http_request(method: &str, path: &str) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string())
        .increment(1);
}

/// HTTP 응답 카운터 증가.
pub fn record_http_response(method: &str, path: &str, status: u16) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// HTTP 요청 처리 시간 기록.
pub fn record_http_duration(method: &str, path: &str, duration_secs: f64) {
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

// ==================== 인증 / 도서 ====================

/// 가입 성공 카운터.
pub fn record_signup() {
    counter!("auth_signups_total").increment(1);
}

/// 로그인 시도 카운터 (`success` | `wrong_password` | `unknown_email`).
pub fn record_signin(outcome: &'static str) {
    counter!("auth_signins_total", "outcome" => outcome).increment(1);
}

/// 토큰 거부 카운터.
pub fn record_auth_rejection(reason: &'static str) {
    counter!("auth_token_rejections_total", "reason" => reason).increment(1);
}

/// 도서 등록 카운터.
pub fn record_book_added() {
    counter!("books_added_total").increment(1);
}

/// 경로의 UUID/숫자 세그먼트를 `:id`로 치환합니다.
///
/// 예: `/books/123e4567-e89b-12d3-a456-426614174000/mark-unavailable` → `/books/:id/mark-unavailable`
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            let is_uuid = uuid::Uuid::parse_str(segment).is_ok();
            let is_numeric = !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit());

            if is_uuid || is_numeric {
                ":id"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_uuid() {
        assert_eq!(
            normalize_path("/books/123e4567-e89b-12d3-a456-426614174000/mark-unavailable"),
            "/books/:id/mark-unavailable"
        );
    }

    #[test]
    fn test_normalize_path_numeric() {
        assert_eq!(normalize_path("/books/42"), "/books/:id");
    }

    #[test]
    fn test_normalize_path_static() {
        assert_eq!(normalize_path("/books/all"), "/books/all");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn test_helpers_without_recorder() {
        // 레코더가 없으면 no-op
        record_signup();
        record_signin("success");
        record_auth_rejection("expired");
        record_book_added();
    }
}
