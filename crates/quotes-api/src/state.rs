//! 모든 핸들러에서 공유되는 애플리케이션 상태.

use std::sync::Arc;
use std::time::Instant;

use crate::aggregator::QuoteAggregator;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 `Arc<AppState>`로 핸들러에 주입됩니다.
pub struct AppState {
    /// 시세 집계기
    pub aggregator: Arc<QuoteAggregator>,
    /// 서버 버전
    pub version: String,
    started_at: Instant,
}

impl AppState {
    pub fn new(aggregator: QuoteAggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Instant::now(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
