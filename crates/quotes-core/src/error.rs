//! 시세 집계 에러 타입.
//!
//! 종목 단위 조회 실패는 여기에 포함되지 않습니다. 그런 실패는 집계 단계에서
//! 격리되어 가격 맵에서 제외될 뿐 호출자에게 전파되지 않습니다.

use thiserror::Error;

/// 자격증명이 없을 때 호출자에게 전달되는 메시지.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "FINNHUB_API_KEY is missing in the environment. Please set it.";

/// 집계 제어 흐름 자체가 실패했을 때 호출자에게 전달되는 메시지.
pub const AGGREGATION_FAILED_MESSAGE: &str = "Serverless function execution failed.";

/// 호출 전체를 실패시키는 에러.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// 시세 제공자 자격증명 미설정
    #[error("{}", MISSING_CREDENTIAL_MESSAGE)]
    MissingCredential,

    /// 설정 로드 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 집계 제어 흐름 에러 (조회 태스크 join 실패 등)
    #[error("집계 에러: {0}")]
    Aggregation(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 집계 작업을 위한 Result 타입.
pub type AggregateResult<T> = Result<T, QuoteError>;

impl QuoteError {
    /// 설정 문제로 인한 에러인지 확인합니다.
    pub fn is_configuration(&self) -> bool {
        matches!(self, QuoteError::MissingCredential | QuoteError::Config(_))
    }

    /// 호출자에게 노출할 메시지.
    ///
    /// 자격증명 누락은 원인을 그대로 알려주고, 그 외에는 내부 세부사항을
    /// 숨긴 일반 메시지를 반환합니다.
    pub fn public_message(&self) -> &'static str {
        match self {
            QuoteError::MissingCredential => MISSING_CREDENTIAL_MESSAGE,
            _ => AGGREGATION_FAILED_MESSAGE,
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for QuoteError {
    fn from(err: config::ConfigError) -> Self {
        QuoteError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message_names_variable() {
        let err = QuoteError::MissingCredential;
        assert!(err.to_string().contains("FINNHUB_API_KEY"));
        assert_eq!(err.public_message(), MISSING_CREDENTIAL_MESSAGE);
        assert!(err.is_configuration());
    }

    #[test]
    fn test_aggregation_error_hides_details() {
        let err = QuoteError::Aggregation("task 3 panicked".to_string());
        assert!(!err.is_configuration());
        assert_eq!(err.public_message(), AGGREGATION_FAILED_MESSAGE);
        assert!(err.to_string().contains("task 3 panicked"));
    }
}
