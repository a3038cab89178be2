//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/get-stock-prices` - 종목별 현재가 맵
//! - `/.netlify/functions/get-stock-prices` - 위와 동일 (기존 프론트엔드 경로 호환)

pub mod health;
pub mod prices;

pub use health::{health_check, health_ready, ReadinessResponse};
pub use prices::{get_stock_prices, CACHE_CONTROL_VALUE};

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::state::AppState;

/// 시세 엔드포인트 경로.
pub const PRICES_PATH: &str = "/api/get-stock-prices";

/// 기존 서버리스 배포 경로.
pub const LEGACY_PRICES_PATH: &str = "/.netlify/functions/get-stock-prices";

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(health_ready))
        .route(PRICES_PATH, get(get_stock_prices))
        .route(LEGACY_PRICES_PATH, get(get_stock_prices))
}
