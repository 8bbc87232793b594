//! 인증.
//!
//! # 구성 요소
//!
//! - [`TokenService`]: 세션 토큰 발급/검증
//! - [`hash_password`] / [`verify_password`]: Argon2 비밀번호 해싱
//! - [`require_auth`]: 보호된 라우트 앞단 미들웨어
//! - [`AuthUser`]: 미들웨어가 검증한 신원을 꺼내는 추출기
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn protected_handler(AuthUser(identity): AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", identity.email)
//! }
//! ```

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, IssuedToken, TokenError, TokenService};
pub use middleware::{parse_bearer, require_auth, AuthError, AuthUser, UNAUTHORIZED_MESSAGE};
pub use password::{hash_password, verify_password, PasswordError};
