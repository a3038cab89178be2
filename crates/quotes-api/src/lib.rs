//! 주식 시세 집계 HTTP 서버.
//!
//! 고정된 종목 목록의 현재가를 시세 제공자에서 병렬로 조회해 하나의 JSON 맵으로
//! 돌려줍니다.
//!
//! # 모듈 구성
//!
//! - [`aggregator`]: 종목별 병렬 조회와 가격 맵 집계
//! - [`routes`]: REST 엔드포인트
//! - [`state`]: 핸들러 공유 상태
//! - [`error`]: 에러 → HTTP 응답 변환

pub mod aggregator;
pub mod error;
pub mod routes;
pub mod state;

pub use aggregator::QuoteAggregator;
pub use error::{ApiError, ErrorBody};
pub use routes::*;
pub use state::AppState;
