use axum::Json;
use axum::http::Uri;

use crate::error::ApiError;
use crate::types::HealthResponse;

/// 存活探针
#[utoipa::path(
    get,
    path = "/health",
    tag = "系统 (System)",
    responses(
        (status = 200, description = "服务正常", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// 未匹配任何路由时返回统一的 404 响应体
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
