//! Finnhub 시세 API 클라이언트.
//!
//! `GET /quote?symbol=AAPL&token=...` 응답의 `c`(현재가) 필드만 사용합니다.
//!
//! ```json
//! {"c": 227.5, "d": 1.2, "dp": 0.53, "h": 228.1, "l": 225.0, "o": 226.0, "pc": 226.3, "t": 1728950400}
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use quotes_core::{Credential, ProviderConfig, TickerSymbol, DEFAULT_PROVIDER_BASE_URL};

use crate::{ProviderError, QuoteProvider};

/// Finnhub `/quote` 응답 중 사용하는 필드.
#[derive(Debug, Clone, Deserialize)]
struct FinnhubQuote {
    /// 현재가. 누락되거나 null이면 조회 실패로 처리합니다.
    #[serde(default)]
    c: Option<f64>,
}

/// Finnhub REST 클라이언트.
///
/// 내부 `reqwest::Client`의 연결 풀을 모든 요청이 공유합니다.
#[derive(Debug, Clone)]
pub struct FinnhubClient {
    client: Client,
    base_url: String,
}

impl FinnhubClient {
    /// 설정에서 클라이언트 생성.
    ///
    /// 타임아웃이 설정되지 않으면 HTTP 클라이언트 기본값을 사용합니다.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `ProviderError::Unknown`을 반환합니다.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Unknown(format!("HTTP client 생성 실패: {}", e)))?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// 이미 만들어진 HTTP 클라이언트로 생성.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn quote_url(&self) -> String {
        format!("{}/quote", self.base_url)
    }
}

impl Default for FinnhubClient {
    fn default() -> Self {
        Self::with_client(Client::new(), DEFAULT_PROVIDER_BASE_URL)
    }
}

/// 응답 본문에서 현재가를 추출.
fn parse_price(symbol: &str, body: &str) -> Result<f64, ProviderError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(ProviderError::ParseError(format!(
            "expected JSON object for {}",
            symbol
        )));
    }
    let quote: FinnhubQuote = serde_json::from_value(value)?;
    quote
        .c
        .ok_or_else(|| ProviderError::MissingPrice(symbol.to_string()))
}

#[async_trait]
impl QuoteProvider for FinnhubClient {
    fn name(&self) -> &str {
        "finnhub"
    }

    async fn fetch_price(
        &self,
        ticker: &TickerSymbol,
        credential: &Credential,
    ) -> Result<f64, ProviderError> {
        let response = self
            .client
            .get(self.quote_url())
            .query(&[("symbol", ticker.as_str()), ("token", credential.expose())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                symbol: ticker.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let price = parse_price(ticker.as_str(), &body)?;

        debug!(ticker = %ticker, price, "Quote fetched");
        Ok(price)
    }
}
