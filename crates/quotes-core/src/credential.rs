//! 시세 제공자 자격증명.
//!
//! API 토큰은 `SecretString`으로 보관되어 `Debug` 출력이나 로그에 노출되지 않습니다.

use secrecy::{ExposeSecret, SecretString};

/// 자격증명을 읽어오는 환경 변수 이름.
pub const CREDENTIAL_ENV_VAR: &str = "FINNHUB_API_KEY";

/// 시세 제공자 API 토큰.
#[derive(Debug)]
pub struct Credential(SecretString);

impl Credential {
    /// 토큰 문자열에서 자격증명을 생성합니다.
    ///
    /// 빈 문자열이나 공백뿐인 문자열은 자격증명이 없는 것으로 취급하여 `None`을 반환합니다.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(SecretString::from(trimmed.to_string())))
    }

    /// `FINNHUB_API_KEY` 환경 변수에서 자격증명을 읽습니다.
    pub fn from_env() -> Option<Self> {
        Self::from_env_var(CREDENTIAL_ENV_VAR)
    }

    /// 지정한 환경 변수에서 자격증명을 읽습니다.
    pub fn from_env_var(name: &str) -> Option<Self> {
        std::env::var(name).ok().and_then(Self::new)
    }

    /// 외부 요청에 실을 토큰 원문.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
