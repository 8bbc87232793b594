//! tracing 기반 로깅 초기화.
//!
//! 지원 형식:
//! - **pretty**: 개발용, 색상과 소스 위치 포함
//! - **json**: 운영/로그 수집용 한 줄 JSON
//! - **compact**: 간결한 한 줄 형식

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 초기화 에러.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("잘못된 로그 필터: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("로그 형식 오류: {0}")]
    InvalidFormat(String),
    #[error("전역 subscriber 설치 실패: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// 설정에 따라 전역 tracing subscriber를 설치합니다.
///
/// `RUST_LOG`가 설정되어 있으면 `config.level`보다 우선합니다.
///
/// # 예제
///
/// ```no_run
/// use library_core::{init_logging, LoggingConfig};
///
/// init_logging(&LoggingConfig::default()).unwrap();
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let format: LogFormat = config.format.parse().map_err(LoggingError::InvalidFormat)?;
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_file(true).with_line_number(true))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()?,
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init()?,
    }

    tracing::info!(format = ?format, level = %config.level, "Logging initialized");
    Ok(())
}
