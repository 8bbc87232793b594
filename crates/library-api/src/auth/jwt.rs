//! 세션 토큰 발급 및 검증.
//!
//! 토큰은 서버에 저장되지 않는 HS256 JWT입니다. 유효성은 서명과 만료 시각만으로
//! 판정하며, 별도 폐기 목록은 없습니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use library_core::{AuthConfig, Identity};
use rand::RngCore;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 서명 키 최소 길이 (바이트). 이보다 짧으면 경고만 남깁니다.
const MIN_SECRET_LEN: usize = 32;

/// 토큰 페이로드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// 사용자 이메일
    pub email: String,
    /// Issued At (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// JWT ID
    pub jti: String,
}

/// 발급된 토큰과 만료 시각.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// 토큰 처리 에러.
///
/// 검증 실패의 세부 종류는 로그에만 남기고, 외부에는 모두
/// 동일한 `unauthorized`로 응답합니다.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
    #[error("잘못된 토큰 형식")]
    Malformed,
    #[error("서명 검증 실패")]
    BadSignature,
    #[error("토큰이 만료되었습니다")]
    Expired,
    #[error("잘못된 토큰 유효 시간: {0}분")]
    InvalidTtl(u32),
}

/// 토큰 발급/검증 서비스.
///
/// 서명 키는 부팅 시 한 번 설정되고 이후 읽기 전용입니다.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// 대칭 키와 유효 시간으로 생성합니다.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        if secret.len() < MIN_SECRET_LEN {
            tracing::warn!(
                len = secret.len(),
                "JWT 서명 키가 {}바이트보다 짧습니다",
                MIN_SECRET_LEN
            );
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// 설정에서 생성합니다.
    ///
    /// 키가 설정되지 않았으면 임의의 키를 만들어 사용하므로,
    /// 재시작 후에는 이전 토큰이 모두 무효가 됩니다.
    pub fn from_config(config: &AuthConfig) -> Result<Self, TokenError> {
        let minutes = config.token_ttl_minutes;
        let ttl = Duration::try_minutes(i64::from(minutes))
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or(TokenError::InvalidTtl(minutes))?;

        let service = match &config.jwt_secret {
            Some(secret) => Self::new(secret.expose_secret().as_bytes(), ttl),
            None => {
                tracing::warn!("JWT 서명 키가 설정되지 않아 임의 키를 생성합니다 (LIBRARY__AUTH__JWT_SECRET)");
                let mut secret = [0u8; 64];
                rand::thread_rng().fill_bytes(&mut secret);
                Self::new(&secret, ttl)
            }
        };
        Ok(service)
    }

    /// 토큰 유효 시간.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 사용자 신원으로 토큰을 발급합니다. 만료 시각은 `now + ttl`.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// 토큰을 검증하고 신원을 복원합니다.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            },
        )?;

        let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Malformed)?;
        Ok(Identity::new(user_id, data.claims.email))
    }
}
