//! 테스트용 고정 응답 제공자.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use quotes_core::{Credential, TickerSymbol};

use crate::{ProviderError, QuoteProvider};

/// 종목별로 미리 정해 둔 응답.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 현재가 반환
    Price(f64),
    /// 네트워크 에러
    NetworkError,
    /// 가격 필드 누락
    MissingPrice,
    /// 파싱 에러
    Malformed,
    /// 호출 시 panic (집계 제어 흐름 실패 재현용)
    Panic,
}

/// 호출 횟수를 기록하는 고정 응답 제공자.
///
/// 등록되지 않은 종목은 네트워크 에러로 응답합니다.
#[derive(Debug, Default)]
pub struct StaticQuoteProvider {
    responses: HashMap<String, MockResponse>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    seen_tokens: Mutex<Vec<String>>,
}

impl StaticQuoteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 종목 응답 등록.
    pub fn with(mut self, ticker: &str, response: MockResponse) -> Self {
        self.responses.insert(ticker.to_string(), response);
        self
    }

    /// 모든 응답 전에 지연을 둡니다.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 지금까지의 `fetch_price` 호출 횟수.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 호출 시 전달된 토큰 목록.
    pub fn seen_tokens(&self) -> Vec<String> {
        self.seen_tokens
            .lock()
            .map(|tokens| tokens.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuoteProvider for StaticQuoteProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_price(
        &self,
        ticker: &TickerSymbol,
        credential: &Credential,
    ) -> Result<f64, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut tokens) = self.seen_tokens.lock() {
            tokens.push(credential.expose().to_string());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.responses.get(ticker.as_str()) {
            Some(MockResponse::Price(price)) => Ok(*price),
            Some(MockResponse::MissingPrice) => Err(ProviderError::MissingPrice(ticker.to_string())),
            Some(MockResponse::Malformed) => {
                Err(ProviderError::ParseError("expected value at line 1 column 1".to_string()))
            }
            Some(MockResponse::Panic) => panic!("mock provider panicked for {}", ticker),
            Some(MockResponse::NetworkError) | None => {
                Err(ProviderError::NetworkError("connection refused".to_string()))
            }
        }
    }
}
