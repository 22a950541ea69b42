use oracle_core::geo::port::TimezoneFinder;
use tzf_rs::DefaultFinder;

/// # Summary
/// 基于 `tzf-rs` 内置多边形数据的离线时区查询。
///
/// # Invariants
/// - 构造时加载全部边界数据，进程内应只创建一次并通过 `Arc` 共享。
pub struct TzfFinder {
    finder: DefaultFinder,
}

impl TzfFinder {
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }
}

impl Default for TzfFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneFinder for TzfFinder {
    fn timezone_at(&self, latitude: f64, longitude: f64) -> Option<String> {
        // tzf 参数顺序为 (经度, 纬度)，无匹配时返回空串
        let name = self.finder.get_tz_name(longitude, latitude);
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_cities() {
        let finder = TzfFinder::new();
        assert_eq!(finder.timezone_at(35.7, 139.7).as_deref(), Some("Asia/Tokyo"));
        assert_eq!(finder.timezone_at(39.9042, 116.4074).as_deref(), Some("Asia/Shanghai"));
        assert_eq!(finder.timezone_at(40.7128, -74.006).as_deref(), Some("America/New_York"));
    }
}
