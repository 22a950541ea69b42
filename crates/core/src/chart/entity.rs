use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::calendar::entity::{Branch, Element, Stem, StemBranch};
use crate::chart::error::ChartError;

/// # Summary
/// 出生地点。由调用方提供，核心层只读不改。
///
/// # Invariants
/// - `longitude` 为有限值且位于 [-180, 180]。
/// - `latitude` 若存在，为有限值且位于 [-90, 90]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// 城市显示名
    pub city: String,
    /// 经度 (东经为正)
    pub longitude: f64,
    /// 纬度 (北纬为正)，缺省时由地理编码补全
    pub latitude: Option<f64>,
}

impl Location {
    /// # Summary
    /// 校验经纬度取值范围。
    ///
    /// # Returns
    /// 合法返回 Ok，否则返回指明字段的 `ChartError::Validation`。
    pub fn validate(&self) -> Result<(), ChartError> {
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ChartError::validation(
                "location.longitude",
                format!("longitude must be within [-180, 180], got {}", self.longitude),
            ));
        }
        if let Some(lat) = self.latitude {
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                return Err(ChartError::validation(
                    "location.latitude",
                    format!("latitude must be within [-90, 90], got {}", lat),
                ));
            }
        }
        Ok(())
    }
}

/// # Summary
/// 性别标记，仅影响大运的顺逆。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Gender {
    /// # Summary
    /// 宽松解析外部输入，无法识别的一律视为 `Unspecified`。
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "male" | "m" | "man" => Gender::Male,
            "female" | "f" | "woman" => Gender::Female,
            _ => Gender::Unspecified,
        }
    }
}

/// # Summary
/// 排盘请求，字段均为可选以便在校验阶段给出明确的缺失字段。
#[derive(Debug, Clone, Default)]
pub struct ChartRequest {
    /// ISO-8601 出生时间，可带 `Z` 或数字时区偏移，也可为不带偏移的民用时间
    pub birth_datetime: Option<String>,
    /// 出生地点
    pub location: Option<Location>,
}

/// # Summary
/// 年、月、日、时四柱干支，不含时间戳，可独立用于推排大运。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarSet {
    pub year: StemBranch,
    pub month: StemBranch,
    pub day: StemBranch,
    pub hour: StemBranch,
}

impl PillarSet {
    /// 按年、月、日、时顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &StemBranch> {
        [&self.year, &self.month, &self.day, &self.hour].into_iter()
    }
}

/// # Summary
/// 一次排盘的四柱结果。
///
/// # Invariants
/// - 每次请求构造一次，构造后不可变 (字段私有，只读访问)。
/// - `solar_time` 为经真太阳时修正后的当地时间，UTC 偏移取出生时刻在所解析时区下的偏移。
#[derive(Debug, Clone, PartialEq)]
pub struct FourPillars {
    pillars: PillarSet,
    solar_time: DateTime<FixedOffset>,
    warning: Option<String>,
}

impl FourPillars {
    pub fn new(pillars: PillarSet, solar_time: DateTime<FixedOffset>, warning: Option<String>) -> Self {
        Self {
            pillars,
            solar_time,
            warning,
        }
    }

    pub fn pillars(&self) -> &PillarSet {
        &self.pillars
    }

    pub fn year(&self) -> StemBranch {
        self.pillars.year
    }

    pub fn month(&self) -> StemBranch {
        self.pillars.month
    }

    pub fn day(&self) -> StemBranch {
        self.pillars.day
    }

    pub fn hour(&self) -> StemBranch {
        self.pillars.hour
    }

    pub fn solar_time(&self) -> &DateTime<FixedOffset> {
        &self.solar_time
    }

    /// 时区降级等诊断信息
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }
}

/// # Summary
/// 五行计分。原始加和分值，不做归一化。
///
/// # Invariants
/// - 每项分值非负。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FiveElementsTally {
    scores: [f64; 5],
}

impl FiveElementsTally {
    fn slot(element: Element) -> usize {
        match element {
            Element::Wood => 0,
            Element::Fire => 1,
            Element::Earth => 2,
            Element::Metal => 3,
            Element::Water => 4,
        }
    }

    /// 为某一行累加权重，负数权重被忽略
    pub fn add(&mut self, element: Element, weight: f64) {
        if weight > 0.0 {
            self.scores[Self::slot(element)] += weight;
        }
    }

    pub fn get(&self, element: Element) -> f64 {
        self.scores[Self::slot(element)]
    }

    pub fn total(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// 按木、火、土、金、水的顺序输出
    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        Element::ALL.into_iter().map(|e| (e, self.get(e)))
    }
}

/// # Summary
/// 一步大运 (十年)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckPillar {
    /// 起运年龄，10 的整数倍
    pub start_age: u32,
    pub stem: Stem,
    pub branch: Branch,
}

/// # Summary
/// 完整排盘结果：四柱与五行分布。
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub four_pillars: FourPillars,
    pub five_elements: FiveElementsTally,
}
