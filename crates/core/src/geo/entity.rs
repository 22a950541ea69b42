use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// # Summary
/// 地理编码得到的经纬度。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// # Summary
/// 时区解析结果。
///
/// # Invariants
/// - 解析失败时 `tz` 为 UTC，且 `warning` 必为非空字符串。
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedZone {
    pub tz: Tz,
    pub warning: Option<String>,
}

impl ResolvedZone {
    pub fn resolved(tz: Tz) -> Self {
        Self { tz, warning: None }
    }

    /// 降级为 UTC 并附带告警
    pub fn fallback(warning: impl Into<String>) -> Self {
        Self {
            tz: Tz::UTC,
            warning: Some(warning.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.warning.is_some()
    }
}
