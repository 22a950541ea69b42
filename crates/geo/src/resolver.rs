use async_trait::async_trait;
use chrono_tz::Tz;
use oracle_core::cache::port::GeoCache;
use oracle_core::config::GeocoderConfig;
use oracle_core::geo::entity::{Coordinates, ResolvedZone};
use oracle_core::geo::error::GeoError;
use oracle_core::geo::port::{Geocoder, TimezoneFinder, ZoneResolver};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// # Summary
/// 地理编码重试策略。
///
/// # Invariants
/// - 只重试 `GeoError::is_transient` 为真的错误。
/// - 单次尝试的超时不超过剩余总预算。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 最大尝试次数 (含首次)，至少为 1
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    pub retry_delay: Duration,
    /// 整个重试循环的硬上限
    pub total_budget: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&GeocoderConfig::default())
    }
}

impl From<&GeocoderConfig> for RetryPolicy {
    fn from(config: &GeocoderConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            attempt_timeout: config.attempt_timeout(),
            retry_delay: config.retry_delay(),
            total_budget: config.total_budget(),
        }
    }
}

/// # Summary
/// 出生地时区解析器。组合地理编码、时区查询与坐标缓存，任何失败都降级为 UTC。
///
/// # Invariants
/// - 所有依赖通过构造注入，无全局单例。
/// - 只缓存成功的地理编码结果。
pub struct TimezoneResolver {
    geocoder: Arc<dyn Geocoder>,
    finder: Arc<dyn TimezoneFinder>,
    cache: Arc<dyn GeoCache>,
    policy: RetryPolicy,
}

impl TimezoneResolver {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        finder: Arc<dyn TimezoneFinder>,
        cache: Arc<dyn GeoCache>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            geocoder,
            finder,
            cache,
            policy,
        }
    }

    /// 坐标 → 可解析的 IANA 时区；未知的时区标识视为无匹配
    fn zone_at(&self, latitude: f64, longitude: f64) -> Option<Tz> {
        let name = self.finder.timezone_at(latitude, longitude)?;
        match name.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(e) => {
                warn!("Timezone finder returned unknown zone '{}': {}", name, e);
                None
            }
        }
    }

    /// # Summary
    /// 查询城市坐标，优先读缓存。
    ///
    /// # Logic
    /// 1. 缓存命中直接返回，缓存故障按未命中处理。
    /// 2. 未命中时带重试调用地理编码。
    /// 3. 成功结果写回缓存，写入失败只记录日志。
    async fn lookup(&self, city: &str) -> Result<Option<Coordinates>, GeoError> {
        match self.cache.get(city).await {
            Ok(Some(coords)) => {
                debug!("Geocode cache hit for '{}'", city);
                return Ok(Some(coords));
            }
            Ok(None) => {}
            Err(e) => warn!("Geocode cache read failed for '{}': {}", city, e),
        }

        let found = self.geocode_with_retry(city).await?;
        if let Some(coords) = found {
            if let Err(e) = self.cache.put(city, coords).await {
                warn!("Geocode cache write failed for '{}': {}", city, e);
            }
        }
        Ok(found)
    }

    /// # Summary
    /// 带超时与固定间隔重试的地理编码。
    ///
    /// # Logic
    /// 1. 每次尝试都以 `min(单次超时, 剩余预算)` 包裹。
    /// 2. 瞬时错误且未达最大次数时，等待固定间隔后重试。
    /// 3. 剩余预算不足以再等待一次间隔时，直接返回最后一次的错误。
    /// 4. 非瞬时错误立即返回。
    async fn geocode_with_retry(&self, city: &str) -> Result<Option<Coordinates>, GeoError> {
        let deadline = Instant::now() + self.policy.total_budget;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(GeoError::Timeout(format!(
                    "geocoding budget of {:?} exhausted",
                    self.policy.total_budget
                )));
            }

            let limit = self.policy.attempt_timeout.min(remaining);
            let outcome = match tokio::time::timeout(limit, self.geocoder.geocode(city)).await {
                Ok(result) => result,
                Err(_) => Err(GeoError::Timeout(format!(
                    "attempt {} timed out after {:?}",
                    attempt, limit
                ))),
            };

            match outcome {
                Err(e) if e.is_transient() && attempt < self.policy.max_attempts => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining <= self.policy.retry_delay {
                        warn!("Geocoding '{}' out of time budget after {} attempts", city, attempt);
                        return Err(e);
                    }
                    warn!(
                        "Geocoding '{}' attempt {}/{} failed: {}. Retrying in {:?}",
                        city, attempt, self.policy.max_attempts, e, self.policy.retry_delay
                    );
                    tokio::time::sleep(self.policy.retry_delay).await;
                }
                other => return other,
            }
        }
    }

    fn degrade(warning: String) -> ResolvedZone {
        warn!("{}", warning);
        ResolvedZone::fallback(warning)
    }
}

#[async_trait]
impl ZoneResolver for TimezoneResolver {
    async fn resolve(&self, city: &str, longitude: f64, latitude: Option<f64>) -> ResolvedZone {
        if let Some(lat) = latitude {
            return match self.zone_at(lat, longitude) {
                Some(tz) => {
                    debug!("Resolved {} ({}, {}) to {}", city, lat, longitude, tz.name());
                    ResolvedZone::resolved(tz)
                }
                None => Self::degrade(format!(
                    "Warning: Cannot determine timezone for city {} with longitude {} and latitude {}. Using UTC as default.",
                    city, longitude, lat
                )),
            };
        }

        match self.lookup(city).await {
            Ok(Some(coords)) => match self.zone_at(coords.latitude, coords.longitude) {
                Some(tz) => {
                    info!("Resolved {} via geocoding to {}", city, tz.name());
                    ResolvedZone::resolved(tz)
                }
                None => Self::degrade(format!(
                    "Warning: Cannot determine timezone for city {} with longitude {}. Using UTC as default.",
                    city, longitude
                )),
            },
            Ok(None) => Self::degrade(format!(
                "Warning: Cannot find coordinates for city: {}. Using UTC as default.",
                city
            )),
            Err(e) => Self::degrade(format!(
                "Warning: Failed to determine timezone for city {} due to {}. Using UTC as default.",
                city, e
            )),
        }
    }
}
