//! # 大运路由控制器

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use oracle_core::chart::entity::PillarSet;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiErrorResponse, LuckPillarResponse, LuckPillarsRequest};

/// 推排八步大运
///
/// 输入四柱 (可直接使用 `/calculate-pillars` 返回的 `fourPillars`) 与性别，
/// 返回起运年龄 10 至 80 的大运干支。
#[utoipa::path(
    post,
    path = "/luck-pillars",
    tag = "排盘 (Chart)",
    request_body = LuckPillarsRequest,
    responses(
        (status = 200, description = "推排成功", body = Vec<LuckPillarResponse>),
        (status = 400, description = "四柱缺失或干支名称非法", body = ApiErrorResponse)
    )
)]
pub async fn luck_pillars(
    State(state): State<AppState>,
    payload: Result<Json<LuckPillarsRequest>, JsonRejection>,
) -> Result<Json<Vec<LuckPillarResponse>>, ApiError> {
    let Json(payload) = payload?;
    let input = payload
        .four_pillars
        .as_ref()
        .ok_or_else(|| ApiError::BadRequest("Missing fourPillars".to_string()))?;
    let pillars = PillarSet::try_from(input)?;

    let luck = state.chart.luck_pillars(&pillars, payload.gender());

    Ok(Json(luck.iter().map(LuckPillarResponse::from).collect()))
}
