//! 저장소 계약.
//!
//! 서비스 계층은 이 trait들에만 의존합니다. 운영 환경에서는 PostgreSQL 구현을,
//! 테스트와 DB 없는 실행에서는 메모리 구현을 주입합니다.
//!
//! # 고유성
//!
//! 이메일 고유성은 구현체가 **스스로** 보장해야 합니다 (고유 인덱스 또는
//! 쓰기 잠금 안에서의 검사). 서비스의 사전 조회는 더 나은 에러 메시지를 위한
//! 것일 뿐이며, 동시 가입 경쟁을 막지 못합니다.

use async_trait::async_trait;
use uuid::Uuid;

use super::{Availability, Book, NewBook, NewUser, User, UserChanges};
use crate::error::StoreResult;

/// 사용자 자격 증명 저장소.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 이메일로 사용자 조회.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// ID로 사용자 조회.
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// 사용자 생성.
    ///
    /// # Errors
    ///
    /// - `StoreError::Duplicate`: 같은 이메일이 이미 존재
    async fn create(&self, new_user: NewUser) -> StoreResult<User>;

    /// 사용자 정보 교체. 대상이 없으면 `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - `StoreError::Duplicate`: 변경할 이메일을 다른 사용자가 사용 중
    async fn update(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>>;

    /// 사용자 삭제. 삭제되었으면 `true`.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// 저장소 연결 상태 확인.
    async fn ping(&self) -> StoreResult<()>;
}

/// 도서 저장소.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// 도서 생성 (`Available` 상태).
    async fn create(&self, new_book: NewBook) -> StoreResult<Book>;

    /// ID로 도서 조회.
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Book>>;

    /// 대여 상태 변경. 대상이 없으면 `Ok(None)`.
    ///
    /// 전이 규칙 검사는 호출자(서비스) 책임입니다.
    async fn set_availability(
        &self,
        id: Uuid,
        availability: Availability,
    ) -> StoreResult<Option<Book>>;

    /// 도서 삭제. 삭제되었으면 `true`.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// 특정 상태의 도서 목록 (등록순).
    async fn list_by_availability(&self, availability: Availability) -> StoreResult<Vec<Book>>;
}
