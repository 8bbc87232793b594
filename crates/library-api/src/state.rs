//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! `Arc<AppState>`로 래핑되어 axum `State`로 주입됩니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use library_core::{BookStore, UserStore};

use crate::auth::TokenService;
use crate::services::{BookService, UserService};

/// 저장소 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Postgres => "postgres",
            StoreBackend::Memory => "memory",
        }
    }
}

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 가입/로그인/변경/탈퇴
    pub users: UserService,
    /// 도서 등록/삭제/상태 변경/목록
    pub books: BookService,
    /// 토큰 검증 (인증 미들웨어)
    pub tokens: TokenService,
    /// 주입된 저장소 종류
    pub backend: StoreBackend,
    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: DateTime<Utc>,
    /// API 버전
    pub version: String,
}

impl AppState {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        book_store: Arc<dyn BookStore>,
        tokens: TokenService,
        backend: StoreBackend,
    ) -> Self {
        Self {
            users: UserService::new(user_store, tokens.clone()),
            books: BookService::new(book_store),
            tokens,
            backend,
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// 메모리 저장소를 사용하는 테스트용 상태.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    create_test_state_with_ttl(chrono::Duration::minutes(5))
}

/// 토큰 유효 시간을 지정한 테스트용 상태.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state_with_ttl(ttl: chrono::Duration) -> AppState {
    use crate::repository::{MemoryBookStore, MemoryUserStore};

    AppState::new(
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryBookStore::new()),
        TokenService::new(b"test-secret-key-for-library-api-tests-32+", ttl),
        StoreBackend::Memory,
    )
}
