use async_trait::async_trait;
use dashmap::DashMap;
use oracle_core::cache::error::CacheError;
use oracle_core::cache::port::{GeoCache, normalize_key};
use oracle_core::geo::entity::Coordinates;

/// # Summary
/// 基于 DashMap 的城市坐标内存缓存。
///
/// # Invariants
/// - 键在写入与读取时都经过 `normalize_key`，"Tokyo" 与 " tokyo " 命中同一项。
/// - 不提供自动过期或容量限制，进程生命周期内有效。
pub struct MemGeoCache {
    // 归一化城市名 -> 坐标
    storage: DashMap<String, Coordinates>,
}

impl MemGeoCache {
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// 当前缓存条目数
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    fn key(city: &str) -> Result<String, CacheError> {
        let key = normalize_key(city);
        if key.is_empty() {
            return Err(CacheError::InvalidKey(format!("'{}'", city)));
        }
        Ok(key)
    }
}

impl Default for MemGeoCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeoCache for MemGeoCache {
    async fn get(&self, city: &str) -> Result<Option<Coordinates>, CacheError> {
        let key = Self::key(city)?;
        Ok(self.storage.get(&key).map(|v| *v.value()))
    }

    /// # Summary
    /// 写入城市坐标。
    ///
    /// # Logic
    /// 归一化键后插入哈希表，同名键覆盖。
    async fn put(&self, city: &str, coordinates: Coordinates) -> Result<(), CacheError> {
        let key = Self::key(city)?;
        self.storage.insert(key, coordinates);
        Ok(())
    }

    async fn del(&self, city: &str) -> Result<(), CacheError> {
        let key = Self::key(city)?;
        self.storage.remove(&key);
        Ok(())
    }
}
