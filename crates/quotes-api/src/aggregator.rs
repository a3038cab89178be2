//! 시세 집계기.
//!
//! 종목마다 독립적인 조회를 동시에 실행하고(fan-out), 모두 끝날 때까지 기다린 뒤(join)
//! 성공한 결과만 가격 맵으로 모읍니다.
//!
//! 종목 단위 실패는 `QuoteOutcome::Failed`로 기록되고 로그만 남깁니다.
//! 호출 전체를 실패시키는 경우는 자격증명 누락과 집계 제어 흐름 자체의 실패
//! (조회 중 panic 등) 두 가지뿐입니다.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::join_all;
use futures::FutureExt;
use tracing::{error, info, info_span, warn, Instrument};

use quotes_core::{AggregateResult, Credential, PriceMap, QuoteError, QuoteResult, TickerSymbol};
use quotes_provider::QuoteProvider;

/// 고정 종목 목록에 대한 시세 집계기.
///
/// 자격증명은 생성 시점에 주입됩니다. 호출 간에 공유하는 가변 상태는 없습니다.
pub struct QuoteAggregator {
    provider: Arc<dyn QuoteProvider>,
    tickers: Vec<TickerSymbol>,
    credential: Option<Credential>,
}

impl QuoteAggregator {
    /// 기본 종목 목록으로 집계기를 생성합니다.
    ///
    /// `credential`이 `None`이면 집계 요청은 네트워크 호출 없이
    /// `QuoteError::MissingCredential`로 끝납니다.
    pub fn new(provider: Arc<dyn QuoteProvider>, credential: Option<Credential>) -> Self {
        Self {
            provider,
            tickers: TickerSymbol::defaults(),
            credential,
        }
    }

    /// 조회 대상 종목 목록을 교체합니다.
    pub fn with_tickers(mut self, tickers: Vec<TickerSymbol>) -> Self {
        self.tickers = tickers;
        self
    }

    pub fn tickers(&self) -> &[TickerSymbol] {
        &self.tickers
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// 모든 종목을 동시에 조회하고 종목별 결과를 반환합니다.
    ///
    /// 결과 순서는 종목 목록 순서와 같습니다.
    ///
    /// # Errors
    /// - 자격증명이 없으면 `QuoteError::MissingCredential`
    /// - 조회 중 panic이 발생하면 `QuoteError::Aggregation`
    pub async fn collect_quotes(&self) -> AggregateResult<Vec<QuoteResult>> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(QuoteError::MissingCredential)?;

        let lookups = self.tickers.iter().map(|ticker| {
            AssertUnwindSafe(fetch_quote(self.provider.as_ref(), ticker, credential))
                .catch_unwind()
        });

        join_all(lookups)
            .await
            .into_iter()
            .zip(&self.tickers)
            .map(|(settled, ticker)| {
                settled.map_err(|_| {
                    QuoteError::Aggregation(format!("quote lookup for {} panicked", ticker))
                })
            })
            .collect()
    }

    /// 시세를 집계해 가격 맵을 만듭니다.
    ///
    /// 실패한 종목은 맵에서 빠집니다. 모든 종목이 실패하면 빈 맵을 반환합니다.
    pub async fn aggregate(&self) -> AggregateResult<PriceMap> {
        let span = info_span!(
            "aggregate_quotes",
            provider = self.provider.name(),
            requested = self.tickers.len()
        );

        async {
            let results = self.collect_quotes().await.map_err(|e| {
                if e.is_configuration() {
                    error!(error = %e, "Provider credential is not configured, skipping lookups");
                } else {
                    error!(error = %e, "Quote aggregation failed");
                }
                e
            })?;

            let prices = PriceMap::from_results(&results);
            info!(
                succeeded = prices.len(),
                failed = results.len() - prices.len(),
                "Quotes aggregated"
            );
            Ok::<_, QuoteError>(prices)
        }
        .instrument(span)
        .await
    }
}

/// 종목 하나를 조회하고 실패를 결과 값으로 격리합니다.
async fn fetch_quote(
    provider: &dyn QuoteProvider,
    ticker: &TickerSymbol,
    credential: &Credential,
) -> QuoteResult {
    match provider.fetch_price(ticker, credential).await {
        Ok(price) => QuoteResult::price(ticker.clone(), price),
        Err(e) => {
            warn!(ticker = %ticker, error = %e, "Error fetching quote");
            QuoteResult::failed(ticker.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotes_core::QuoteOutcome;
    use quotes_provider::{MockResponse, StaticQuoteProvider};
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;

    /// 테스트 중 출력된 로그를 모아두는 writer.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn tickers(symbols: &[&str]) -> Vec<TickerSymbol> {
        symbols.iter().copied().map(TickerSymbol::new).collect()
    }

    fn credential() -> Option<Credential> {
        Credential::new("test-token")
    }

    #[tokio::test]
    async fn test_one_lookup_per_ticker() {
        let provider = Arc::new(StaticQuoteProvider::new().with("AAPL", MockResponse::Price(1.0)));
        let aggregator = QuoteAggregator::new(provider.clone(), credential());

        let prices = aggregator.aggregate().await.unwrap();

        assert_eq!(provider.call_count(), 6);
        assert!(prices.len() <= 6);
        assert_eq!(prices.len(), 1);
    }

    #[tokio::test]
    async fn test_credential_is_passed_to_every_lookup() {
        let provider = Arc::new(StaticQuoteProvider::new());
        let aggregator =
            QuoteAggregator::new(provider.clone(), credential()).with_tickers(tickers(&["A", "B"]));

        aggregator.aggregate().await.unwrap();

        assert_eq!(provider.seen_tokens(), vec!["test-token", "test-token"]);
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_calls() {
        let provider = Arc::new(StaticQuoteProvider::new().with("AAPL", MockResponse::Price(1.0)));
        let aggregator = QuoteAggregator::new(provider.clone(), None);

        let err = aggregator.aggregate().await.unwrap_err();

        assert!(matches!(err, QuoteError::MissingCredential));
        assert_eq!(provider.call_count(), 0);
        assert!(!aggregator.has_credential());
    }

    #[tokio::test]
    async fn test_failures_are_tagged_per_ticker() {
        let provider = Arc::new(
            StaticQuoteProvider::new()
                .with("AMZN", MockResponse::Price(150.0))
                .with("AAPL", MockResponse::NetworkError)
                .with("NVDA", MockResponse::MissingPrice)
                .with("TSLA", MockResponse::Malformed),
        );
        let aggregator = QuoteAggregator::new(provider, credential())
            .with_tickers(tickers(&["AMZN", "AAPL", "NVDA", "TSLA"]));

        let results = aggregator.collect_quotes().await.unwrap();

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].outcome, QuoteOutcome::Price(150.0));
        for failed in &results[1..] {
            assert_eq!(
                failed.outcome,
                QuoteOutcome::Failed("API Fetch Failed".to_string())
            );
        }
        let order: Vec<_> = results.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, vec!["AMZN", "AAPL", "NVDA", "TSLA"]);
    }

    #[tokio::test]
    async fn test_failed_lookup_logs_one_warning() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let provider = Arc::new(
            StaticQuoteProvider::new()
                .with("AMZN", MockResponse::Price(150.0))
                .with("AAPL", MockResponse::NetworkError),
        );
        let aggregator =
            QuoteAggregator::new(provider, credential()).with_tickers(tickers(&["AMZN", "AAPL"]));

        let prices = aggregator.aggregate().await.unwrap();

        assert_eq!(prices.len(), 1);
        assert_eq!(prices.get("AMZN"), Some(150.0));

        let warnings: Vec<_> = logs
            .lines()
            .into_iter()
            .filter(|line| line.contains("WARN"))
            .collect();
        assert_eq!(warnings.len(), 1, "warnings: {:?}", warnings);
        assert!(warnings[0].contains("AAPL"));
        assert!(!warnings[0].contains("AMZN"));
        assert!(!warnings[0].contains("test-token"));
    }

    #[tokio::test]
    async fn test_panicking_lookup_is_aggregation_error() {
        let provider = Arc::new(
            StaticQuoteProvider::new()
                .with("AMZN", MockResponse::Price(150.0))
                .with("AAPL", MockResponse::Panic),
        );
        let aggregator =
            QuoteAggregator::new(provider, credential()).with_tickers(tickers(&["AMZN", "AAPL"]));

        let err = aggregator.aggregate().await.unwrap_err();

        assert!(matches!(err, QuoteError::Aggregation(ref msg) if msg.contains("AAPL")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookups_run_concurrently() {
        let provider = Arc::new(
            StaticQuoteProvider::new()
                .with("AMZN", MockResponse::Price(1.0))
                .with("META", MockResponse::Price(2.0))
                .with_delay(Duration::from_millis(500)),
        );
        let aggregator = QuoteAggregator::new(provider.clone(), credential());

        let started = tokio::time::Instant::now();
        let prices = aggregator.aggregate().await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(provider.call_count(), 6);
        assert_eq!(prices.len(), 2);
        // 순차 실행이면 3초가 걸림
        assert!(elapsed < Duration::from_millis(1000), "elapsed: {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_empty_ticker_list() {
        let provider = Arc::new(StaticQuoteProvider::new());
        let aggregator = QuoteAggregator::new(provider.clone(), credential()).with_tickers(vec![]);

        let prices = aggregator.aggregate().await.unwrap();

        assert!(prices.is_empty());
        assert_eq!(provider.call_count(), 0);
    }
}
