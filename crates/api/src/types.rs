//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向客户端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。
//! 输出字段名 (`year_pillar`、`timestampTST`、`fiveElements` 等) 是对外契约，不得改动。

use chrono::{DateTime, FixedOffset, SecondsFormat};
use oracle_core::calendar::entity::{Branch, Element, Stem, StemBranch};
use oracle_core::chart::entity::{
    Chart, ChartRequest, FiveElementsTally, FourPillars, Gender, Location, LuckPillar, PillarSet,
};
use oracle_core::chart::error::ChartError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

// ============================================================
//  通用
// ============================================================

/// 构建失败响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

/// 健康检查响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

// ============================================================
//  干支
// ============================================================

/// 单柱 DTO，干支均为英文音译
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PillarDto {
    #[schema(example = "Geng")]
    pub stem: String,
    #[schema(example = "Wu")]
    pub branch: String,
}

impl From<StemBranch> for PillarDto {
    fn from(pillar: StemBranch) -> Self {
        Self {
            stem: pillar.stem.name().to_string(),
            branch: pillar.branch.name().to_string(),
        }
    }
}

impl TryFrom<&PillarDto> for StemBranch {
    type Error = ApiError;

    fn try_from(dto: &PillarDto) -> Result<Self, Self::Error> {
        let stem = dto.stem.parse::<Stem>().map_err(ApiError::BadRequest)?;
        let branch = dto.branch.parse::<Branch>().map_err(ApiError::BadRequest)?;
        Ok(StemBranch::new(stem, branch))
    }
}

// ============================================================
//  排盘
// ============================================================

/// 出生地点 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationRequest {
    /// 城市名，缺省为 "Unknown"
    #[schema(example = "Tokyo")]
    pub city: Option<String>,
    /// 经度，东经为正
    #[schema(example = 139.7)]
    pub longitude: Option<f64>,
    /// 纬度，缺省时按城市名地理编码
    #[schema(example = 35.7)]
    pub latitude: Option<f64>,
}

/// 排盘请求 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculatePillarsRequest {
    /// ISO-8601 出生时间，可带 `Z` 或时区偏移
    #[serde(alias = "birthDatetime")]
    #[schema(example = "1990-03-12T15:00:00Z")]
    pub birth_datetime: Option<String>,
    pub location: Option<LocationRequest>,
}

impl TryFrom<CalculatePillarsRequest> for ChartRequest {
    type Error = ChartError;

    /// 经度缺失在此处报错，其余字段交给 `ChartPort` 统一校验
    fn try_from(req: CalculatePillarsRequest) -> Result<Self, Self::Error> {
        let location = match req.location {
            Some(loc) => {
                let longitude = loc
                    .longitude
                    .ok_or_else(|| ChartError::validation("location.longitude", "is required"))?;
                Some(Location {
                    city: loc.city.unwrap_or_default(),
                    longitude,
                    latitude: loc.latitude,
                })
            }
            None => None,
        };
        Ok(ChartRequest {
            birth_datetime: req.birth_datetime,
            location,
        })
    }
}

/// 四柱 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FourPillarsResponse {
    pub year_pillar: PillarDto,
    pub month_pillar: PillarDto,
    pub day_pillar: PillarDto,
    pub hour_pillar: PillarDto,
    /// 真太阳时，RFC 3339
    #[serde(rename = "timestampTST")]
    #[schema(example = "1990-03-13T00:37:15.200000+09:00")]
    pub timestamp_tst: String,
    /// 时区降级告警
    pub warning: Option<String>,
}

/// 秒的小数部分为零时省略，否则固定输出 6 位微秒，如 `00:37:15.200000+09:00`
fn iso_timestamp(t: &DateTime<FixedOffset>) -> String {
    let precision = if t.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    t.to_rfc3339_opts(precision, false)
}

impl From<&FourPillars> for FourPillarsResponse {
    fn from(p: &FourPillars) -> Self {
        Self {
            year_pillar: p.year().into(),
            month_pillar: p.month().into(),
            day_pillar: p.day().into(),
            hour_pillar: p.hour().into(),
            timestamp_tst: iso_timestamp(p.solar_time()),
            warning: p.warning().map(str::to_string),
        }
    }
}

/// 五行分布 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FiveElementsResponse {
    #[serde(rename = "Wood")]
    pub wood: f64,
    #[serde(rename = "Fire")]
    pub fire: f64,
    #[serde(rename = "Earth")]
    pub earth: f64,
    #[serde(rename = "Metal")]
    pub metal: f64,
    #[serde(rename = "Water")]
    pub water: f64,
}

/// 输出保留 4 位小数，消除 0.3 累加的浮点尾差
fn round_score(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

impl From<&FiveElementsTally> for FiveElementsResponse {
    fn from(t: &FiveElementsTally) -> Self {
        Self {
            wood: round_score(t.get(Element::Wood)),
            fire: round_score(t.get(Element::Fire)),
            earth: round_score(t.get(Element::Earth)),
            metal: round_score(t.get(Element::Metal)),
            water: round_score(t.get(Element::Water)),
        }
    }
}

/// 排盘响应 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartResponse {
    #[serde(rename = "fourPillars")]
    pub four_pillars: FourPillarsResponse,
    #[serde(rename = "fiveElements")]
    pub five_elements: FiveElementsResponse,
}

impl From<&Chart> for ChartResponse {
    fn from(chart: &Chart) -> Self {
        Self {
            four_pillars: (&chart.four_pillars).into(),
            five_elements: (&chart.five_elements).into(),
        }
    }
}

// ============================================================
//  大运
// ============================================================

/// 大运输入的四柱，可直接使用排盘响应中的 `fourPillars` (多余字段忽略)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PillarsInput {
    pub year_pillar: Option<PillarDto>,
    pub month_pillar: Option<PillarDto>,
    pub day_pillar: Option<PillarDto>,
    pub hour_pillar: Option<PillarDto>,
}

fn required_pillar(pillar: Option<&PillarDto>, name: &str) -> Result<StemBranch, ApiError> {
    let dto = pillar.ok_or_else(|| ApiError::BadRequest(format!("Missing {}", name)))?;
    StemBranch::try_from(dto)
}

impl TryFrom<&PillarsInput> for PillarSet {
    type Error = ApiError;

    fn try_from(input: &PillarsInput) -> Result<Self, Self::Error> {
        Ok(PillarSet {
            year: required_pillar(input.year_pillar.as_ref(), "year_pillar")?,
            month: required_pillar(input.month_pillar.as_ref(), "month_pillar")?,
            day: required_pillar(input.day_pillar.as_ref(), "day_pillar")?,
            hour: required_pillar(input.hour_pillar.as_ref(), "hour_pillar")?,
        })
    }
}

/// 大运请求 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LuckPillarsRequest {
    #[serde(rename = "fourPillars", alias = "four_pillars")]
    pub four_pillars: Option<PillarsInput>,
    /// "male" / "female"，其它取值按未指定处理
    #[schema(example = "male")]
    pub gender: Option<String>,
}

impl LuckPillarsRequest {
    pub fn gender(&self) -> Gender {
        self.gender
            .as_deref()
            .map(Gender::from_label)
            .unwrap_or_default()
    }
}

/// 单步大运 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LuckPillarResponse {
    #[schema(example = 10)]
    pub start_age: u32,
    #[schema(example = "Geng")]
    pub stem: String,
    #[schema(example = "Chen")]
    pub branch: String,
}

impl From<&LuckPillar> for LuckPillarResponse {
    fn from(p: &LuckPillar) -> Self {
        Self {
            start_age: p.start_age,
            stem: p.stem.name().to_string(),
            branch: p.branch.name().to_string(),
        }
    }
}
