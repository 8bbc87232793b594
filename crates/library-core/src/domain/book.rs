//! 도서 도메인 타입 및 대여 가능 상태 전이.
//!
//! 도서의 생명주기:
//!
//! ```text
//! (없음) --add--> Available --mark_unavailable--> Unavailable
//!    ^                |                                |
//!    +----delete------+-------------delete-------------+
//! ```
//!
//! `Unavailable`에서 `Available`로 되돌리는 전이는 없습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 도서 대여 가능 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// 목록에 노출되는 상태
    Available,
    /// 목록에서 제외된 상태
    Unavailable,
}

impl Availability {
    /// 저장소/직렬화에 사용하는 문자열 표현.
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Unavailable => "unavailable",
        }
    }

    /// `self`에서 `next`로의 전이가 허용되는지 확인합니다.
    ///
    /// 같은 상태로의 전이(멱등)는 허용합니다.
    pub fn can_transition_to(&self, next: Availability) -> bool {
        !matches!(
            (self, next),
            (Availability::Unavailable, Availability::Available)
        )
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self::Available
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 알 수 없는 상태 문자열.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("알 수 없는 대여 상태: {0}")]
pub struct ParseAvailabilityError(pub String);

impl FromStr for Availability {
    type Err = ParseAvailabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            // 초기 데이터는 "not available"로 저장되어 있었음
            "unavailable" | "not available" => Ok(Self::Unavailable),
            other => Err(ParseAvailabilityError(other.to_string())),
        }
    }
}

/// 도서 레코드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct Book {
    /// 도서 ID
    pub id: Uuid,
    /// 도서명
    #[serde(rename = "bookName")]
    pub book_name: String,
    /// 저자
    pub author: String,
    /// 등록한 사용자 ID (표시용 역참조, 소유권 검사에는 사용하지 않음)
    pub owner_user_id: Uuid,
    /// 대여 가능 상태
    pub availability: Availability,
    /// 등록 시각
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// 새 도서를 `Available` 상태로 생성합니다.
    pub fn create(new_book: NewBook) -> Self {
        Self {
            id: Uuid::new_v4(),
            book_name: new_book.book_name,
            author: new_book.author,
            owner_user_id: new_book.owner_user_id,
            availability: Availability::Available,
            created_at: Utc::now(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }

    /// 상태를 전이합니다. 허용되지 않는 전이면 `false`를 반환하고 변경하지 않습니다.
    pub fn transition_to(&mut self, next: Availability) -> bool {
        if !self.availability.can_transition_to(next) {
            return false;
        }
        self.availability = next;
        true
    }
}

/// 신규 도서 입력.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub book_name: String,
    pub author: String,
    pub owner_user_id: Uuid,
}
