//! 시세 제공자 trait.

use async_trait::async_trait;
use quotes_core::{Credential, TickerSymbol};

use crate::ProviderError;

/// 종목 하나의 현재가를 조회하는 제공자.
///
/// 구현체는 여러 태스크에서 동시에 호출되므로 `Send + Sync`여야 합니다.
/// 재시도는 하지 않으며, 실패는 호출자가 종목 단위로 격리합니다.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// 제공자 이름 (로그용).
    fn name(&self) -> &str;

    /// 현재가 조회.
    ///
    /// # 인자
    /// * `ticker` - 종목 심볼 (예: "AAPL")
    /// * `credential` - 제공자 API 토큰
    async fn fetch_price(
        &self,
        ticker: &TickerSymbol,
        credential: &Credential,
    ) -> Result<f64, ProviderError>;
}
