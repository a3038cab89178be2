//! 헬스 체크 endpoint.
//!
//! 로드밸런서나 오케스트레이션 시스템에서 사용합니다.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// readiness 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// "ready" | "not_configured"
    pub status: String,
    /// API 버전
    pub version: String,
    /// 서버 업타임(초)
    pub uptime_secs: u64,
    /// 시세 제공자 이름
    pub provider: String,
    /// 제공자 자격증명 설정 여부
    pub credential_configured: bool,
    /// 조회 대상 종목 수
    pub tickers: usize,
}

/// 간단한 헬스 체크 (liveness probe용).
///
/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 상세 헬스 체크 (readiness probe용).
///
/// 자격증명이 없으면 시세 요청이 항상 500이므로 503으로 응답합니다.
/// 외부 제공자에는 요청을 보내지 않습니다.
///
/// GET /health/ready
pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let aggregator = &state.aggregator;
    let configured = aggregator.has_credential();

    let (status_code, status) = if configured {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_configured")
    };

    let response = ReadinessResponse {
        status: status.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        provider: aggregator.provider_name().to_string(),
        credential_configured: configured,
        tickers: aggregator.tickers().len(),
    };

    (status_code, Json(response))
}
