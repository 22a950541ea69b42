use async_trait::async_trait;

use crate::geo::entity::{Coordinates, ResolvedZone};
use crate::geo::error::GeoError;

/// # Summary
/// 地名 → 经纬度的地理编码服务 (外部依赖)。
///
/// # Invariants
/// - 超时类失败必须映射为 `GeoError::Timeout`，以便上游区分是否重试。
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// # Summary
    /// 按名称查询地点坐标。
    ///
    /// # Arguments
    /// * `query`: 地名，例如 "Tokyo" 或 "Beijing, China"。
    ///
    /// # Returns
    /// 找到返回 `Some(Coordinates)`，查无此地返回 `None`，请求失败返回 `GeoError`。
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeoError>;
}

/// # Summary
/// 经纬度 → IANA 时区标识的查询服务。
pub trait TimezoneFinder: Send + Sync {
    /// 返回坐标所在时区的 IANA 标识，如 "Asia/Tokyo"；海域等无匹配时返回 None。
    fn timezone_at(&self, latitude: f64, longitude: f64) -> Option<String>;
}

/// # Summary
/// 出生地时区解析器。
///
/// # Invariants
/// - 永不失败：任何查询失败都降级为 UTC，并在 `ResolvedZone::warning` 中说明原因。
#[async_trait]
pub trait ZoneResolver: Send + Sync {
    /// # Summary
    /// 解析地点的时区。
    ///
    /// # Logic
    /// 1. 已知纬度时直接按 (纬度, 经度) 查询时区。
    /// 2. 否则先按城市名地理编码，再按所得坐标查询时区。
    ///
    /// # Arguments
    /// * `city`: 城市名。
    /// * `longitude`: 经度。
    /// * `latitude`: 可选纬度。
    ///
    /// # Returns
    /// 解析出的时区与可选告警。
    async fn resolve(&self, city: &str, longitude: f64, latitude: Option<f64>) -> ResolvedZone;
}
