//! 시세 endpoint.
//!
//! `GET /api/get-stock-prices`
//!
//! 요청 본문과 쿼리는 사용하지 않습니다. 응답은 60초 동안 중간 캐시와 엣지에
//! 캐시되도록 `Cache-Control`을 붙입니다.
//!
//! ```json
//! {"AAPL": 227.5, "TSLA": 410.2}
//! ```

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

use crate::error::ApiError;
use crate::state::AppState;

/// 성공 응답에 붙는 캐시 지시자.
pub const CACHE_CONTROL_VALUE: &str = "public, max-age=60, s-maxage=60";

/// 종목별 현재가 조회.
///
/// 실패한 종목은 응답 맵에서 빠지며, 모든 종목이 실패해도 200과 `{}`를 반환합니다.
pub async fn get_stock_prices(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let prices = state.aggregator.aggregate().await?;
    let body = serde_json::to_vec(&prices).map_err(|e| {
        error!(error = %e, "Failed to serialize price map");
        ApiError::from(e)
    })?;

    Ok((
        [
            (header::CACHE_CONTROL, CACHE_CONTROL_VALUE),
            (header::CONTENT_TYPE, "application/json"),
        ],
        body,
    )
        .into_response())
}
