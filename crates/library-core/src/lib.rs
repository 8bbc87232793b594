//! # Library Core
//!
//! eLibrary 백엔드의 핵심 도메인 모델 및 계약을 제공합니다.
//!
//! 이 크레이트는 API 서버와 저장소 구현이 공유하는 기본 타입을 제공합니다:
//! - 사용자 / 도서 / 인증 주체(Identity) 도메인 타입
//! - 도서 대여 가능 상태(Availability) 전이 규칙
//! - 저장소 계약 (`UserStore`, `BookStore`)
//! - 에러 분류 체계
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
