//! 시세 집계 전반에서 사용되는 공통 타입.

mod quote;
mod ticker;

pub use quote::*;
pub use ticker::*;
