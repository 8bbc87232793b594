//! OpenAPI 문서화 설정.
//!
//! Swagger UI는 `/docs`, OpenAPI JSON은 `/api/swagger.json`에서 제공됩니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 요청/응답 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)`에 등록

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use library_core::{Availability, Book, UserView};

use crate::response::{
    BookListResponse, BookResponse, MessageResponse, ResponseStatus, SigninData, SigninResponse,
    UserResponse,
};
use crate::routes::books::AddBookRequest;
use crate::routes::health::{ComponentHealth, ComponentStatus, HealthResponse};
use crate::routes::users::{SigninRequest, UserRequest};

/// Swagger UI 경로.
pub const DOCS_PATH: &str = "/docs";

/// OpenAPI JSON 경로.
pub const OPENAPI_JSON_PATH: &str = "/api/swagger.json";

/// eLibrary API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "eLibrary API",
        description = r#"
# eLibrary REST API

사용자 가입/인증과 도서 재고 관리를 위한 API입니다.

## 인증

`/user/signin`에서 발급받은 토큰을 `Authorization: Bearer <token>` 헤더로 전달하세요.
토큰은 기본 5분간 유효합니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크"),
        (name = "users", description = "사용자 가입, 로그인, 정보 변경, 탈퇴"),
        (name = "books", description = "도서 등록, 삭제, 대여 불가 처리, 목록")
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            // ===== Common =====
            ResponseStatus,
            MessageResponse,

            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Users =====
            UserRequest,
            SigninRequest,
            SigninData,
            SigninResponse,
            UserResponse,
            UserView,

            // ===== Books =====
            AddBookRequest,
            Availability,
            Book,
            BookResponse,
            BookListResponse,
        )
    ),
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Users =====
        crate::routes::users::signup,
        crate::routes::users::signin,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,

        // ===== Books =====
        crate::routes::books::add_book,
        crate::routes::books::delete_book,
        crate::routes::books::mark_unavailable,
        crate::routes::books::list_books,
    )
)]
pub struct ApiDoc;

/// Bearer(JWT) 보안 스키마 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Swagger UI 라우터 생성.
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new(DOCS_PATH)
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
        .into()
}
