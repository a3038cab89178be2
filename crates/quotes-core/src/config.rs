//! 설정 관리.
//!
//! 기본값에서 시작해 선택적 설정 파일, `QUOTES__` 접두사 환경 변수 순으로 덮어씁니다.
//! 예: `QUOTES__SERVER__PORT=8080`, `QUOTES__PROVIDER__TIMEOUT_SECS=10`.
//!
//! 시세 제공자 자격증명은 여기서 다루지 않고 [`crate::Credential`]로 따로 읽습니다.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::QuoteError;
use crate::logging::{LogConfig, LogFormat};

/// Finnhub REST API 기본 URL.
pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://finnhub.io/api/v1";

/// 서비스 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 시세 제공자 설정
    #[serde(default)]
    pub provider: ProviderConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 시세 제공자 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초). 미설정 시 HTTP 클라이언트 기본값을 따릅니다.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        let format = config.format.parse().unwrap_or(LogFormat::Pretty);
        LogConfig::new(config.level.clone()).with_format(format)
    }
}

impl ServiceConfig {
    /// 설정 파일(있는 경우)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 건너뛰지만, 파일이 있는데 형식이 잘못되었으면
    /// `QuoteError::Config`를 반환합니다.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, QuoteError> {
        let mut builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("provider.base_url", DEFAULT_PROVIDER_BASE_URL)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?;

        // 파일에서 로드
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(false));
        }

        // 환경 변수로 오버라이드
        let config = builder
            .add_source(
                config::Environment::with_prefix("QUOTES")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
