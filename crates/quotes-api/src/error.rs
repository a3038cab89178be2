//! 집계 에러 → HTTP 응답 변환.
//!
//! 모든 호출 단위 에러는 500으로 응답하며 본문은 `{"error": "..."}` 형식입니다.
//! 자격증명 누락은 원인을 그대로 알리고, 그 외 에러는 일반 메시지로 가립니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use quotes_core::QuoteError;

/// 에러 응답 본문.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// 핸들러 에러.
#[derive(Debug)]
pub struct ApiError(pub QuoteError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        Self(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self(QuoteError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorBody::new(self.0.public_message())),
        )
            .into_response()
    }
}
