//! 사용자 endpoint.
//!
//! - `POST /user/signup` 가입 (공개)
//! - `POST /user/signin` 로그인, 토큰 발급 (공개)
//! - `PUT /user/update` 본인 정보 변경 (인증)
//! - `DELETE /user/delete` 본인 탈퇴 (인증)

use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    routing::{delete, post, put},
    Router,
};
use library_core::UserView;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::auth::{require_auth, AuthUser};
use crate::error::ApiResult;
use crate::extract::ValidJson;
use crate::response::{created_message, ok, ok_message, Reply, SigninData};
use crate::services::UserInput;
use crate::state::AppState;

pub const MSG_USER_CREATED: &str = "user created successfully";
pub const MSG_AUTHENTICATED: &str = "user authenticated";
pub const MSG_UPDATED: &str = "updated successfully";
pub const MSG_DELETED: &str = "deleted successfully";

/// 공백만 있는 값 거부.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// 가입 및 정보 변경 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    /// 이름
    #[validate(custom(function = "not_blank", message = "name is required"))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// 이메일 (대소문자 구분 없음)
    #[validate(email(message = "email is invalid"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// 비밀번호
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl From<UserRequest> for UserInput {
    fn from(req: UserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

/// 로그인 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SigninRequest {
    #[validate(custom(function = "not_blank", message = "email is required"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// 신규 가입.
#[utoipa::path(
    post,
    path = "/user/signup",
    tag = "users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "가입 완료", body = crate::response::MessageResponse),
        (status = 400, description = "입력 오류", body = crate::response::MessageResponse),
        (status = 401, description = "이미 등록된 이메일", body = crate::response::MessageResponse)
    )
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UserRequest>,
) -> ApiResult<Reply<()>> {
    state.users.signup(req.into()).await?;
    Ok(created_message(MSG_USER_CREATED))
}

/// 로그인.
#[utoipa::path(
    post,
    path = "/user/signin",
    tag = "users",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "토큰 발급", body = crate::response::SigninResponse),
        (status = 400, description = "입력 오류", body = crate::response::MessageResponse),
        (status = 401, description = "잘못된 자격 증명", body = crate::response::MessageResponse)
    )
)]
pub async fn signin(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<SigninRequest>,
) -> ApiResult<Reply<SigninData>> {
    let outcome = state.users.signin(&req.email, &req.password).await?;

    Ok(ok(
        MSG_AUTHENTICATED,
        SigninData {
            token: outcome.token.token,
            expires_at: outcome.token.expires_at.to_rfc3339(),
            user: outcome.user.view(),
        },
    ))
}

/// 본인 정보 변경.
#[utoipa::path(
    put,
    path = "/user/update",
    tag = "users",
    request_body = UserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 완료", body = crate::response::UserResponse),
        (status = 400, description = "입력 오류", body = crate::response::MessageResponse),
        (status = 401, description = "인증 실패 또는 이메일 중복", body = crate::response::MessageResponse),
        (status = 404, description = "삭제된 계정", body = crate::response::MessageResponse)
    )
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ValidJson(req): ValidJson<UserRequest>,
) -> ApiResult<Reply<UserView>> {
    let user = state.users.update(&identity, req.into()).await?;
    Ok(ok(MSG_UPDATED, user.view()))
}

/// 본인 탈퇴.
#[utoipa::path(
    delete,
    path = "/user/delete",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 완료", body = crate::response::MessageResponse),
        (status = 401, description = "인증 실패", body = crate::response::MessageResponse),
        (status = 404, description = "이미 삭제된 계정", body = crate::response::MessageResponse)
    )
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> ApiResult<Reply<()>> {
    state.users.delete(&identity).await?;
    Ok(ok_message(MSG_DELETED))
}

/// 사용자 라우터 생성.
pub fn users_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/update", put(update_user))
        .route("/delete", delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .merge(protected)
}
