//! 인증된 요청 주체.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 검증된 토큰에서 복원한 호출자 신원.
///
/// 보호된 라우트의 핸들러는 항상 이 값을 기준으로 동작하며,
/// 클라이언트가 보낸 경로 파라미터로 대상 사용자를 결정하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// 사용자 ID
    pub user_id: Uuid,
    /// 토큰 발급 당시의 이메일
    pub email: String,
}

impl Identity {
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}
