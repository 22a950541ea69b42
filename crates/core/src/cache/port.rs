use crate::cache::error::CacheError;
use crate::geo::entity::Coordinates;
use async_trait::async_trait;

/// # Summary
/// 地理编码结果缓存接口 (Port)。
///
/// # Invariants
/// - 键为城市名，实现者负责归一化 (去首尾空白、忽略大小写)。
/// - 只缓存成功的编码结果，查无此地与请求失败均不入缓存。
#[async_trait]
pub trait GeoCache: Send + Sync {
    /// # Summary
    /// 读取城市坐标。
    ///
    /// # Arguments
    /// * `city`: 城市名。
    ///
    /// # Returns
    /// 命中返回 `Some(Coordinates)`，否则返回 `None`。
    async fn get(&self, city: &str) -> Result<Option<Coordinates>, CacheError>;

    /// # Summary
    /// 写入城市坐标，同名键覆盖。
    async fn put(&self, city: &str, coordinates: Coordinates) -> Result<(), CacheError>;

    /// 删除指定城市
    async fn del(&self, city: &str) -> Result<(), CacheError>;
}

/// 缓存键归一化：去首尾空白并转小写
pub fn normalize_key(city: &str) -> String {
    city.trim().to_lowercase()
}
