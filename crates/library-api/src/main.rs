//! eLibrary API 서버 진입점.

use std::sync::Arc;

use anyhow::Context;
use library_api::repository::{Database, MemoryBookStore, MemoryUserStore, PgBookStore, PgUserStore};
use library_api::{create_router, setup_metrics_recorder, AppState, StoreBackend, TokenService};
use library_core::{init_logging, AppConfig};
use tracing::{info, warn};

/// `--export-openapi` 플래그 또는 `EXPORT_OPENAPI` 환경변수가 있으면
/// OpenAPI JSON을 stdout으로 출력합니다. 출력했으면 `true`.
fn handle_export_openapi() -> anyhow::Result<bool> {
    use library_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    let export_flag = std::env::args().any(|arg| arg == "--export-openapi");
    let export_env = std::env::var("EXPORT_OPENAPI")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if !(export_flag || export_env) {
        return Ok(false);
    }

    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("OpenAPI 직렬화 실패")?;
    println!("{json}");
    Ok(true)
}

/// 설정에 따라 저장소를 선택해 상태를 만듭니다.
async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let tokens = TokenService::from_config(&config.auth).context("토큰 서비스 설정 실패")?;

    let state = match &config.database.url {
        Some(url) => {
            let db = Database::connect(url, &config.database)
                .await
                .context("데이터베이스 연결 실패")?;
            db.migrate().await.context("마이그레이션 실패")?;

            let pool = db.pool().clone();
            AppState::new(
                Arc::new(PgUserStore::new(pool.clone())),
                Arc::new(PgBookStore::new(pool)),
                tokens,
                StoreBackend::Postgres,
            )
        }
        None => {
            warn!("database.url이 설정되지 않아 메모리 저장소로 실행합니다 (재시작 시 데이터 소실)");
            AppState::new(
                Arc::new(MemoryUserStore::new()),
                Arc::new(MemoryBookStore::new()),
                tokens,
                StoreBackend::Memory,
            )
        }
    };

    Ok(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    if handle_export_openapi()? {
        return Ok(());
    }

    let config = AppConfig::load_default().context("설정 로드 실패")?;
    init_logging(&config.logging).context("로깅 초기화 실패")?;

    info!("Starting eLibrary API server...");

    let metrics_handle = setup_metrics_recorder().context("Prometheus 레코더 설치 실패")?;
    info!("Prometheus metrics recorder initialized");

    let state = Arc::new(create_app_state(&config).await?);
    info!(
        version = %state.version,
        backend = state.backend.as_str(),
        token_ttl_minutes = state.tokens.ttl().num_minutes(),
        "Application state initialized"
    );

    let app = create_router(state, &config.server, Some(metrics_handle));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("{addr} 바인딩 실패"))?;

    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/docs", addr);
    info!("OpenAPI document at http://{}/api/swagger.json", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Ctrl+C 또는 SIGTERM 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Ctrl+C 핸들러 설치 실패");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM 핸들러 설치 실패");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
