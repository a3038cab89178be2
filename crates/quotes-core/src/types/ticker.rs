//! 종목 심볼 정의.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 기본 조회 대상 종목.
///
/// 요청에서 받지 않으며 빌드 시점에 고정됩니다.
pub const DEFAULT_TICKERS: [&str; 6] = ["AMZN", "AAPL", "NVDA", "TSLA", "GOOG", "META"];

/// 거래 가능한 상품을 식별하는 종목 심볼 (예: "AAPL").
///
/// 직렬화 시 문자열 그대로 출력되어 가격 맵의 키로 사용됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 기본 종목 목록을 반환합니다.
    pub fn defaults() -> Vec<TickerSymbol> {
        DEFAULT_TICKERS.iter().copied().map(TickerSymbol::new).collect()
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TickerSymbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for TickerSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
