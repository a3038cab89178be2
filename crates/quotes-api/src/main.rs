//! 주식 시세 집계 API 서버.
//!
//! Axum 기반 서버를 시작합니다. 시세 엔드포인트와 헬스 체크를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use quotes_api::routes::{create_api_router, LEGACY_PRICES_PATH, PRICES_PATH};
use quotes_api::{AppState, QuoteAggregator};
use quotes_core::logging::{init_logging, LogConfig};
use quotes_core::{Credential, ServiceConfig, CREDENTIAL_ENV_VAR};
use quotes_provider::FinnhubClient;

/// 설정 파일 경로를 지정하는 환경 변수. 파일이 없으면 무시합니다.
const CONFIG_PATH_ENV: &str = "QUOTES_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// CORS 미들웨어 구성.
///
/// CORS_ORIGINS 환경변수가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
///
/// # 환경변수
///
/// - `CORS_ORIGINS`: 쉼표로 구분된 허용 origin 목록
///   예: `https://portfolio.example.com,https://www.example.com`
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors_layer())
}

/// 설정으로부터 AppState 생성.
fn create_app_state(config: &ServiceConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let provider = FinnhubClient::new(&config.provider)?;
    info!(
        base_url = %provider.base_url(),
        timeout_secs = ?config.provider.timeout_secs,
        "Quote provider client created"
    );

    let credential = Credential::from_env();
    if credential.is_none() {
        warn!(
            "{} not set, price requests will fail until it is configured",
            CREDENTIAL_ENV_VAR
        );
    }

    let aggregator = QuoteAggregator::new(Arc::new(provider), credential);
    Ok(AppState::new(aggregator))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ServiceConfig::load(Some(&config_path))?;

    init_logging(LogConfig::from(&config.logging).override_from_env())?;

    info!("Starting quotes API server...");

    let addr: SocketAddr = config.server.bind_address().parse().map_err(|e| {
        error!(
            host = %config.server.host,
            port = config.server.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. QUOTES__SERVER__HOST, QUOTES__SERVER__PORT 환경변수를 확인하세요."
        );
        e
    })?;

    let state = Arc::new(create_app_state(&config)?);
    info!(
        version = %state.version,
        tickers = state.aggregator.tickers().len(),
        has_credential = state.aggregator.has_credential(),
        "Application state initialized"
    );

    let app = create_router(state);

    info!(%addr, "API server listening");
    info!("Prices available at http://{}{}", addr, PRICES_PATH);
    info!("Legacy path at http://{}{}", addr, LEGACY_PRICES_PATH);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM을 받으면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
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
