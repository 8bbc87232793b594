//! eLibrary 백엔드의 에러 타입.
//!
//! 서비스 계층이 반환하는 [`LibraryError`]와 저장소 계층이 반환하는
//! [`StoreError`]를 정의합니다. HTTP 상태 코드 매핑은 API 크레이트에서 수행합니다.

use thiserror::Error;

/// 서비스 계층 에러.
///
/// 클라이언트 원인 에러(검증, 중복, 미존재, 인증)와
/// 인프라 에러(`Store`)를 구분합니다.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// 필드 누락 또는 형식 오류. 저장소 접근 전에 거부됩니다.
    #[error("{0}")]
    Validation(String),

    /// 이미 등록된 이메일
    #[error("{0}")]
    DuplicateEmail(String),

    /// 사용자/도서가 존재하지 않음
    #[error("{0}")]
    NotFound(String),

    /// 토큰 누락/무효/만료 또는 잘못된 자격 증명
    #[error("{0}")]
    Unauthorized(String),

    /// 저장소 인프라 장애
    #[error("저장소 에러: {0}")]
    Store(String),
}

/// 서비스 작업을 위한 Result 타입.
pub type LibraryResult<T> = Result<T, LibraryError>;

impl LibraryError {
    /// 클라이언트 요청이 원인인 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, LibraryError::Store(_))
    }
}

/// 저장소 계층 에러.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 고유 제약 조건 위반 (예: users.email)
    #[error("고유 제약 조건 위반: {0}")]
    Duplicate(String),

    /// 연결/쿼리 실패
    #[error("백엔드 에러: {0}")]
    Backend(String),
}

/// 저장소 작업을 위한 Result 타입.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for LibraryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => {
                LibraryError::DuplicateEmail("user with that email exists".to_string())
            }
            StoreError::Backend(msg) => LibraryError::Store(msg),
        }
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    StoreError::Duplicate(db_err.message().to_string())
                } else {
                    StoreError::Backend(db_err.message().to_string())
                }
            }
            other => StoreError::Backend(other.to_string()),
        }
    }
}
