//! 응답 envelope.
//!
//! 목록 응답을 포함한 모든 JSON 응답은 같은 형태를 가집니다:
//!
//! ```json
//! { "status": "successful", "message": "user authenticated", "data": { ... } }
//! ```
//!
//! # 상태 코드 정책
//!
//! - 리소스 생성(가입, 도서 등록): `201 Created`
//! - 그 외 성공: `200 OK`
//! - 실패 코드는 [`crate::error::ApiError`] 참고

use axum::{http::StatusCode, Json};
use library_core::{Book, UserView};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// envelope의 `status` 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ResponseStatus {
    /// 요청 성공
    #[serde(rename = "successful")]
    Successful,
    /// 클라이언트 원인 실패
    #[serde(rename = "fail")]
    Fail,
    /// 서버 내부 에러
    #[serde(rename = "Error")]
    Error,
}

/// 공통 응답 envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// 데이터를 포함한 성공 envelope.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Successful,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// 데이터 없는 envelope.
    pub fn message(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }
}

/// 핸들러 성공 응답 타입.
pub type Reply<T> = (StatusCode, Json<Envelope<T>>);

/// `200 OK` + 데이터.
pub fn ok<T>(message: impl Into<String>, data: T) -> Reply<T> {
    (StatusCode::OK, Json(Envelope::success(message, data)))
}

/// `200 OK`, 메시지만.
pub fn ok_message(message: impl Into<String>) -> Reply<()> {
    (
        StatusCode::OK,
        Json(Envelope::message(ResponseStatus::Successful, message)),
    )
}

/// `201 Created` + 데이터.
pub fn created<T>(message: impl Into<String>, data: T) -> Reply<T> {
    (StatusCode::CREATED, Json(Envelope::success(message, data)))
}

/// `201 Created`, 메시지만.
pub fn created_message(message: impl Into<String>) -> Reply<()> {
    (
        StatusCode::CREATED,
        Json(Envelope::message(ResponseStatus::Successful, message)),
    )
}

// ==================== OpenAPI 문서용 스키마 ====================

/// 메시지만 포함한 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: ResponseStatus,
    pub message: String,
}

/// 로그인 결과 데이터.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SigninData {
    /// Bearer 토큰
    pub token: String,
    /// 토큰 만료 시각 (RFC 3339)
    pub expires_at: String,
    /// 로그인한 사용자
    pub user: UserView,
}

/// `POST /user/signin` 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct SigninResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub data: SigninData,
}

/// 사용자 정보를 포함한 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub data: UserView,
}

/// 도서 한 권을 포함한 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub data: Book,
}

/// 도서 목록 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookListResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub data: Vec<Book>,
}
