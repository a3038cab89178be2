//! # Quotes Core
//!
//! 시세 집계 서비스의 핵심 타입과 공통 인프라를 제공합니다.
//!
//! - 종목 심볼, 종목별 조회 결과, 가격 맵 타입
//! - 설정 관리 (서버, 시세 제공자, 로깅)
//! - 시세 제공자 자격증명
//! - 로깅 인프라
//! - 에러 타입

pub mod config;
pub mod credential;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use credential::{Credential, CREDENTIAL_ENV_VAR};
pub use error::*;
pub use logging::*;
pub use types::*;
