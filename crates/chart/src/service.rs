use async_trait::async_trait;
use oracle_core::chart::entity::{Chart, ChartRequest, Gender, LuckPillar, PillarSet};
use oracle_core::chart::error::ChartError;
use oracle_core::chart::port::ChartPort;
use oracle_core::geo::port::ZoneResolver;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::elements::five_elements;
use crate::luck::luck_pillars;
use crate::pillars::four_pillars;
use crate::solar_time::apparent_solar_time;
use crate::timestamp::BirthTime;

/// 城市名缺省值
const UNKNOWN_CITY: &str = "Unknown";

/// # Summary
/// `ChartService` 是排盘的入口调度者，实现 `ChartPort`。
/// 负责输入校验，调用注入的时区解析器，再驱动纯计算模块得出四柱与五行。
pub struct ChartService {
    /// 出生地时区解析器 (内部含地理编码与重试)
    resolver: Arc<dyn ZoneResolver>,
}

impl ChartService {
    pub fn new(resolver: Arc<dyn ZoneResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ChartPort for ChartService {
    /// # Logic
    /// 1. 校验出生时间与地点，任何解析失败都在调用解析器之前返回。
    /// 2. 解析时区，失败时已降级为 UTC 并带有告警。
    /// 3. 本地化出生时间，叠加真太阳时修正。
    /// 4. 推导四柱，统计五行。
    async fn calculate(&self, request: ChartRequest) -> Result<Chart, ChartError> {
        let raw_birth = request
            .birth_datetime
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ChartError::validation("birth_datetime", "is required"))?;
        let location = request
            .location
            .ok_or_else(|| ChartError::validation("location", "is required"))?;
        location.validate()?;
        let birth = BirthTime::parse(raw_birth)?;

        let city = match location.city.trim() {
            "" => UNKNOWN_CITY,
            name => name,
        };
        debug!(
            "Calculating chart for {} at {} ({}, {:?})",
            raw_birth, city, location.longitude, location.latitude
        );

        let zone = self
            .resolver
            .resolve(city, location.longitude, location.latitude)
            .await;
        if let Some(warning) = &zone.warning {
            warn!("Timezone degraded for chart request: {}", warning);
        }

        let local = birth.localize(zone.tz)?;
        let solar = apparent_solar_time(&local, location.longitude)?;
        let four_pillars = four_pillars(&solar, zone.warning)?;
        let five_elements = five_elements(four_pillars.pillars());

        debug!(
            "Chart resolved: year={} month={} day={} hour={} tst={}",
            four_pillars.year(),
            four_pillars.month(),
            four_pillars.day(),
            four_pillars.hour(),
            four_pillars.solar_time().to_rfc3339()
        );

        Ok(Chart {
            four_pillars,
            five_elements,
        })
    }

    fn luck_pillars(&self, pillars: &PillarSet, gender: Gender) -> Vec<LuckPillar> {
        luck_pillars(pillars, gender)
    }
}
