//! 사용자 수명 주기 서비스.
//!
//! 가입, 로그인, 정보 변경, 탈퇴를 처리합니다. 변경/탈퇴 대상은 항상
//! 토큰에서 복원한 [`Identity`]이며, 클라이언트가 다른 사용자를 지정할 수 없습니다.

use std::sync::Arc;

use library_core::{
    normalize_email, Identity, LibraryError, LibraryResult, NewUser, StoreError, User,
    UserChanges, UserStore,
};
use tracing::info;

use crate::auth::{hash_password, verify_password, IssuedToken, TokenService};
use crate::metrics::{record_signin, record_signup};

pub const MSG_EMAIL_EXISTS: &str = "user with that email exists";
pub const MSG_UPDATE_DUPLICATE: &str = "duplicateEmail";
pub const MSG_INVALID_LOGIN: &str = "invalid login details";
pub const MSG_WRONG_PASSWORD: &str = "wrong password";
pub const MSG_USER_NOT_FOUND: &str = "user not found";

/// 가입/변경 입력.
#[derive(Debug, Clone)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// 로그인 결과.
#[derive(Debug, Clone)]
pub struct SigninOutcome {
    pub token: IssuedToken,
    pub user: User,
}

/// 사용자 서비스.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    /// 신규 가입.
    ///
    /// # Errors
    ///
    /// - `DuplicateEmail`: 이미 등록된 이메일 (동시 가입 경쟁 포함)
    pub async fn signup(&self, input: UserInput) -> LibraryResult<User> {
        let email = normalize_email(&input.email);

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(LibraryError::DuplicateEmail(MSG_EMAIL_EXISTS.to_string()));
        }

        let password_hash = hash_in_background(input.password).await?;
        let user = self
            .store
            .create(NewUser {
                name: input.name.trim().to_string(),
                email,
                password_hash,
            })
            .await
            .map_err(|e| duplicate_as(e, MSG_EMAIL_EXISTS))?;

        record_signup();
        info!(user_id = %user.id, "사용자 가입");
        Ok(user)
    }

    /// 이메일/비밀번호로 로그인하고 토큰을 발급합니다.
    ///
    /// 없는 이메일과 틀린 비밀번호는 서로 다른 메시지로 구분됩니다.
    pub async fn signin(&self, email: &str, password: &str) -> LibraryResult<SigninOutcome> {
        let email = normalize_email(email);

        let Some(user) = self.store.find_by_email(&email).await? else {
            record_signin("unknown_email");
            return Err(LibraryError::Unauthorized(MSG_INVALID_LOGIN.to_string()));
        };

        let matches = verify_in_background(password.to_string(), user.password_hash.clone()).await?;
        if !matches {
            record_signin("wrong_password");
            return Err(LibraryError::Unauthorized(MSG_WRONG_PASSWORD.to_string()));
        }

        let token = self
            .tokens
            .issue(user.id, &user.email)
            .map_err(|e| LibraryError::Store(e.to_string()))?;

        record_signin("success");
        info!(user_id = %user.id, "로그인");
        Ok(SigninOutcome { token, user })
    }

    /// 호출자 본인의 이름, 이메일, 비밀번호를 교체합니다.
    ///
    /// # Errors
    ///
    /// - `DuplicateEmail`: 다른 사용자가 쓰는 이메일. 기존 레코드는 변경되지 않습니다.
    /// - `NotFound`: 토큰은 유효하지만 계정이 이미 삭제됨
    pub async fn update(&self, identity: &Identity, input: UserInput) -> LibraryResult<User> {
        let email = normalize_email(&input.email);

        if let Some(existing) = self.store.find_by_email(&email).await? {
            if existing.id != identity.user_id {
                return Err(LibraryError::DuplicateEmail(MSG_UPDATE_DUPLICATE.to_string()));
            }
        }

        let password_hash = hash_in_background(input.password).await?;
        let changes = UserChanges {
            name: input.name.trim().to_string(),
            email,
            password_hash,
        };

        let user = self
            .store
            .update(identity.user_id, changes)
            .await
            .map_err(|e| duplicate_as(e, MSG_UPDATE_DUPLICATE))?
            .ok_or_else(|| LibraryError::NotFound(MSG_USER_NOT_FOUND.to_string()))?;

        info!(user_id = %user.id, "사용자 정보 변경");
        Ok(user)
    }

    /// 호출자 본인 계정을 삭제합니다.
    pub async fn delete(&self, identity: &Identity) -> LibraryResult<()> {
        if !self.store.delete(identity.user_id).await? {
            return Err(LibraryError::NotFound(MSG_USER_NOT_FOUND.to_string()));
        }

        info!(user_id = %identity.user_id, "사용자 삭제");
        Ok(())
    }

    /// 저장소 연결 상태.
    pub async fn ping(&self) -> LibraryResult<()> {
        Ok(self.store.ping().await?)
    }
}

fn duplicate_as(err: StoreError, message: &str) -> LibraryError {
    match err {
        StoreError::Duplicate(_) => LibraryError::DuplicateEmail(message.to_string()),
        other => other.into(),
    }
}

// Argon2 연산은 블로킹 풀에서 실행
async fn hash_in_background(password: String) -> LibraryResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| LibraryError::Store(e.to_string()))?
        .map_err(|e| LibraryError::Store(e.to_string()))
}

async fn verify_in_background(password: String, hash: String) -> LibraryResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| LibraryError::Store(e.to_string()))?
        .map_err(|e| LibraryError::Store(e.to_string()))
}
