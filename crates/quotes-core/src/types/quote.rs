//! 종목별 조회 결과와 가격 맵.
//!
//! 조회 실패는 `QuoteOutcome::Failed`로 명시적으로 표현되며, 호출자에게 전달되는
//! `PriceMap`은 실패한 종목을 제외한 투영(projection)입니다. 호출자는
//! "가격 없음"과 "조회 실패"를 구분할 수 없고, 두 경우 모두 키가 빠진 것으로 보입니다.

use serde::Serialize;
use std::collections::BTreeMap;

use super::TickerSymbol;

/// 조회 실패 시 기록되는 사유.
pub const FETCH_FAILED_REASON: &str = "API Fetch Failed";

/// 단일 종목 조회 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteOutcome {
    /// 현재가 조회 성공 (0 또는 음수도 그대로 통과)
    Price(f64),
    /// 조회 실패 사유
    Failed(String),
}

/// 종목과 조회 결과의 쌍.
///
/// 조회 한 번마다 생성되고 집계 단계에서 한 번 소비됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteResult {
    pub ticker: TickerSymbol,
    pub outcome: QuoteOutcome,
}

impl QuoteResult {
    /// 성공 결과 생성.
    pub fn price(ticker: TickerSymbol, price: f64) -> Self {
        Self {
            ticker,
            outcome: QuoteOutcome::Price(price),
        }
    }

    /// 실패 결과 생성. 사유는 항상 `FETCH_FAILED_REASON`입니다.
    pub fn failed(ticker: TickerSymbol) -> Self {
        Self {
            ticker,
            outcome: QuoteOutcome::Failed(FETCH_FAILED_REASON.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, QuoteOutcome::Price(_))
    }

    /// 성공한 경우의 가격.
    pub fn price_value(&self) -> Option<f64> {
        match self.outcome {
            QuoteOutcome::Price(price) => Some(price),
            QuoteOutcome::Failed(_) => None,
        }
    }
}

/// 종목 → 현재가 매핑.
///
/// 성공한 종목만 키로 포함됩니다. `BTreeMap`을 사용하므로 동일한 입력에 대해
/// 직렬화 결과가 바이트 단위로 동일합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceMap(BTreeMap<TickerSymbol, f64>);

impl PriceMap {
    /// 조회 결과에서 실패한 항목을 버리고 가격 맵을 만듭니다.
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a QuoteResult>,
    {
        results
            .into_iter()
            .filter_map(|r| r.price_value().map(|price| (r.ticker.clone(), price)))
            .collect()
    }

    pub fn get(&self, ticker: &str) -> Option<f64> {
        self.0.get(&TickerSymbol::new(ticker)).copied()
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.0.contains_key(&TickerSymbol::new(ticker))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(TickerSymbol, f64)> for PriceMap {
    fn from_iter<T: IntoIterator<Item = (TickerSymbol, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_results_are_dropped() {
        let results = vec![
            QuoteResult::price("AMZN".into(), 150.0),
            QuoteResult::failed("AAPL".into()),
        ];

        let map = PriceMap::from_results(&results);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("AMZN"), Some(150.0));
        assert!(!map.contains("AAPL"));
    }

    #[test]
    fn test_failed_reason_is_fixed() {
        let result = QuoteResult::failed("NVDA".into());
        assert_eq!(
            result.outcome,
            QuoteOutcome::Failed("API Fetch Failed".to_string())
        );
        assert!(!result.is_success());
        assert_eq!(result.price_value(), None);
    }

    #[test]
    fn test_zero_and_negative_prices_pass_through() {
        let results = vec![
            QuoteResult::price("GOOG".into(), 0.0),
            QuoteResult::price("META".into(), -1.5),
        ];

        let map = PriceMap::from_results(&results);
        assert_eq!(map.get("GOOG"), Some(0.0));
        assert_eq!(map.get("META"), Some(-1.5));
    }

    #[test]
    fn test_all_failed_gives_empty_object() {
        let results = vec![
            QuoteResult::failed("AMZN".into()),
            QuoteResult::failed("TSLA".into()),
        ];

        let map = PriceMap::from_results(&results);
        assert!(map.is_empty());
        assert_eq!(serde_json::to_string(&map).unwrap(), "{}");
    }

    #[test]
    fn test_serialization_is_order_independent() {
        let forward = vec![
            QuoteResult::price("TSLA".into(), 410.2),
            QuoteResult::price("AAPL".into(), 227.5),
        ];
        let reversed: Vec<_> = forward.iter().rev().cloned().collect();

        let a = serde_json::to_string(&PriceMap::from_results(&forward)).unwrap();
        let b = serde_json::to_string(&PriceMap::from_results(&reversed)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, r#"{"AAPL":227.5,"TSLA":410.2}"#);
    }
}
