//! API 에러 응답.
//!
//! 서비스 계층의 [`LibraryError`]를 HTTP 상태 코드와 envelope으로 변환합니다.
//!
//! | 에러 | 상태 코드 | status |
//! |---|---|---|
//! | `Validation` | 400 | `fail` |
//! | `DuplicateEmail` | 401 | `fail` |
//! | `Unauthorized` | 401 | `fail` |
//! | `NotFound` | 404 | `fail` |
//! | `Store` | 500 | `Error` |
//!
//! 저장소 에러의 세부 내용은 로그에만 남기고 응답에는 포함하지 않습니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use library_core::LibraryError;

use crate::response::{Envelope, ResponseStatus};

/// 저장소 에러 시 클라이언트에 보내는 메시지.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// 핸들러 에러 타입.
#[derive(Debug)]
pub struct ApiError(pub LibraryError);

/// 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self(LibraryError::Validation(message.into()))
    }

    /// HTTP 상태 코드.
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            LibraryError::Validation(_) => StatusCode::BAD_REQUEST,
            LibraryError::DuplicateEmail(_) | LibraryError::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            LibraryError::NotFound(_) => StatusCode::NOT_FOUND,
            LibraryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        Self(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.status_code(), self.0)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let envelope = match self.0 {
            LibraryError::Store(detail) => {
                tracing::error!(error = %detail, "저장소 에러");
                Envelope::message(ResponseStatus::Error, INTERNAL_ERROR_MESSAGE)
            }
            client_err => Envelope::message(ResponseStatus::Fail, client_err.to_string()),
        };

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (LibraryError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (LibraryError::DuplicateEmail("d".into()), StatusCode::UNAUTHORIZED),
            (LibraryError::Unauthorized("u".into()), StatusCode::UNAUTHORIZED),
            (LibraryError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (LibraryError::Store("s".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError(err).status_code(), expected);
        }
    }

    #[tokio::test]
    async fn test_client_error_keeps_message() {
        let response =
            ApiError(LibraryError::Unauthorized("wrong password".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["status"], "fail");
        assert_eq!(json["message"], "wrong password");
    }

    #[tokio::test]
    async fn test_store_error_hides_detail() {
        let response = ApiError(LibraryError::Store(
            "password authentication failed for user \"postgres\"".into(),
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["status"], "Error");
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
        assert!(!json.to_string().contains("postgres"));
    }
}
