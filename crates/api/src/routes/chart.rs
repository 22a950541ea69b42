//! # 排盘路由控制器
//!
//! 实现 `/calculate-pillars` 接口。

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use oracle_core::chart::entity::ChartRequest;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiErrorResponse, CalculatePillarsRequest, ChartResponse};

/// 计算四柱与五行分布
///
/// 按出生时间与地点解析时区、修正真太阳时后推导四柱。
/// 时区无法确定时按 UTC 计算，并在 `warning` 中说明。
#[utoipa::path(
    post,
    path = "/calculate-pillars",
    tag = "排盘 (Chart)",
    request_body = CalculatePillarsRequest,
    responses(
        (status = 200, description = "排盘成功", body = ChartResponse),
        (status = 400, description = "缺少字段或字段非法", body = ApiErrorResponse),
        (status = 500, description = "计算过程出错", body = ApiErrorResponse)
    )
)]
pub async fn calculate_pillars(
    State(state): State<AppState>,
    payload: Result<Json<CalculatePillarsRequest>, JsonRejection>,
) -> Result<Json<ChartResponse>, ApiError> {
    let Json(payload) = payload?;
    let request = ChartRequest::try_from(payload)?;

    let chart = state.chart.calculate(request).await?;

    Ok(Json(ChartResponse::from(&chart)))
}
