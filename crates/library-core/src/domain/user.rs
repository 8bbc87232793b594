//! 사용자 도메인 타입.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 저장된 사용자 레코드.
///
/// `password_hash`를 포함하므로 API 응답에는 [`UserView`]를 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// PHC 형식 해시 (argon2id)
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 응답용 뷰로 변환합니다. 비밀번호 해시는 제외됩니다.
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// 외부로 노출되는 사용자 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct UserView {
    /// 사용자 ID
    pub id: Uuid,
    /// 이름
    pub name: String,
    /// 이메일
    pub email: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// 신규 사용자 입력 (이미 해싱된 비밀번호).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// 사용자 정보 변경 입력.
///
/// 이름, 이메일, 비밀번호 해시를 한 번에 교체합니다.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// 이메일을 비교 가능한 정규 형태로 변환합니다.
///
/// 앞뒤 공백을 제거하고 소문자로 맞춥니다. 고유성 검사와 저장 모두
/// 이 형태를 사용하므로 `A@x.com`과 `a@x.com`은 같은 계정입니다.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$salt$hash".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_view_excludes_password_hash() {
        let user = sample_user();
        let json = serde_json::to_string(&user.view()).unwrap();

        assert!(json.contains(r#""email":"a@x.com""#));
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_view_from_user() {
        let user = sample_user();
        let id = user.id;
        let view = UserView::from(user);
        assert_eq!(view.id, id);
        assert_eq!(view.name, "A");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@X.com "), "a@x.com");
        assert_eq!(normalize_email("a@x.com"), "a@x.com");
    }
}
