//! eLibrary REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (사용자, 도서)
//! - Bearer 토큰(JWT) 인증
//! - PostgreSQL / 메모리 저장소
//! - 헬스 체크, Prometheus 메트릭, OpenAPI 문서
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 토큰, 비밀번호 해싱, 인증 미들웨어
//! - [`services`]: 사용자/도서 도메인 서비스
//! - [`repository`]: 저장소 구현
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{hash_password, verify_password, AuthError, AuthUser, TokenService};
pub use error::{ApiError, ApiResult};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use routes::{create_api_router, create_router};
pub use state::{AppState, StoreBackend};

#[cfg(any(test, feature = "test-utils"))]
pub use state::{create_test_state, create_test_state_with_ttl};
