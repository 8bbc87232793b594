//! 도메인 서비스.
//!
//! 핸들러와 저장소 사이에서 검증, 해싱, 토큰 발급, 상태 전이를 조율합니다.

pub mod books;
pub mod users;

pub use books::BookService;
pub use users::{SigninOutcome, UserInput, UserService};
