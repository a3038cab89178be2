//! 시세 제공자 연동.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - `QuoteProvider` trait: 종목 하나의 현재가를 조회하는 통합 인터페이스
//! - Finnhub REST 클라이언트
//! - 제공자 에러 타입

pub mod error;
pub mod finnhub;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod traits;

pub use error::*;
pub use finnhub::FinnhubClient;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockResponse, StaticQuoteProvider};
pub use traits::*;
