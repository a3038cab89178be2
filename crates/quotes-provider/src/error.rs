//! 시세 제공자 에러 타입.
//!
//! 모든 변형은 종목 단위로 격리되는 조회 실패입니다. 메시지에는 요청 URL을 넣지
//! 않으므로 쿼리 파라미터의 토큰이 로그로 새지 않습니다.

use thiserror::Error;

/// 시세 조회 에러.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 요청 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 2xx가 아닌 HTTP 응답
    #[error("HTTP status {status} for {symbol}")]
    Status { symbol: String, status: u16 },

    /// 응답 본문 파싱 에러
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 응답에 숫자 현재가 필드가 없음
    #[error("No current price in response for {0}")]
    MissingPrice(String),

    /// HTTP 클라이언트 생성 실패 등 기타 에러
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ProviderError {
    /// 제공자 측 인증 거부인지 확인.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ProviderError::Status { status, .. } if *status == 401 || *status == 403)
    }

    /// 제공자 측 요청 한도 초과인지 확인.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ProviderError::Status { status: 429, .. })
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        let is_timeout = err.is_timeout();
        let is_connect = err.is_connect();
        let is_decode = err.is_decode();
        // URL에 토큰이 포함되어 있으므로 제거
        let message = err.without_url().to_string();

        if is_timeout {
            ProviderError::Timeout(message)
        } else if is_connect {
            ProviderError::NetworkError(message)
        } else if is_decode {
            ProviderError::ParseError(message)
        } else {
            ProviderError::Unknown(message)
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::ParseError(err.to_string())
    }
}
