//! Bearer 토큰 인증 미들웨어.
//!
//! [`require_auth`]가 `Authorization` 헤더를 검증하고 [`Identity`]를
//! 요청 extensions에 넣습니다. 핸들러는 [`AuthUser`]로 이를 꺼냅니다.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use library_core::Identity;

use super::TokenError;
use crate::metrics::record_auth_rejection;
use crate::response::{Envelope, ResponseStatus};
use crate::state::AppState;

/// 인증 실패 시 응답 메시지. 실패 원인과 관계없이 동일합니다.
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized";

const BEARER_SCHEME: &str = "Bearer";

/// 인증된 사용자 추출기.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

/// 인증 에러.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("유효하지 않은 토큰: {0}")]
    InvalidToken(#[from] TokenError),
}

impl AuthError {
    /// 메트릭 라벨.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing",
            AuthError::InvalidAuthHeader => "bad_header",
            AuthError::InvalidToken(TokenError::Expired) => "expired",
            AuthError::InvalidToken(TokenError::BadSignature) => "bad_signature",
            AuthError::InvalidToken(_) => "malformed",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(Envelope::message(ResponseStatus::Fail, UNAUTHORIZED_MESSAGE));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// `Authorization` 헤더 값에서 토큰을 꺼냅니다.
///
/// 스킴은 정확히 `Bearer`여야 하고, 공백 뒤에 비어 있지 않은 토큰 하나가 와야 합니다.
pub fn parse_bearer(value: &str) -> Result<&str, AuthError> {
    let rest = value
        .strip_prefix(BEARER_SCHEME)
        .ok_or(AuthError::InvalidAuthHeader)?;

    // "Bearerxyz" 같은 붙여 쓴 값 거부
    if !rest.starts_with(char::is_whitespace) {
        return Err(AuthError::InvalidAuthHeader);
    }

    let token = rest.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(token)
}

fn authenticate(state: &AppState, request: &Request) -> Result<Identity, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = parse_bearer(header)?;
    Ok(state.tokens.verify(token)?)
}

/// 보호된 라우트용 인증 미들웨어.
///
/// 검증에 실패하면 핸들러를 호출하지 않고 `401`을 반환합니다.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    match authenticate(&state, &request) {
        Ok(identity) => {
            tracing::Span::current().record("user_id", tracing::field::display(identity.user_id));
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        Err(err) => {
            tracing::debug!(reason = err.reason(), error = %err, "인증 거부");
            record_auth_rejection(err.reason());
            Err(err)
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or(AuthError::MissingToken)
    }
}
