//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 JSON 响应体。

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use oracle_core::chart::error::ChartError;
use thiserror::Error;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 资源未找到 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 请求参数错误 (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 下层业务错误 (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error while serving request: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ApiErrorResponse::from_msg(message));
        (status, body).into_response()
    }
}

/// 从 `ChartError` 转换
impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        match &err {
            ChartError::Validation { .. } => ApiError::BadRequest(err.to_string()),
            ChartError::Internal(msg) => ApiError::Internal(msg.clone()),
        }
    }
}

/// 请求体不是合法 JSON 或字段类型不符
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_error_mapping() {
        let err = ApiError::from(ChartError::validation("location", "is required"));
        assert!(matches!(err, ApiError::BadRequest(ref msg) if msg == "Invalid location: is required"));

        let err = ApiError::from(ChartError::Internal("boom".into()));
        assert!(matches!(err, ApiError::Internal(ref msg) if msg == "boom"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
