//! # 测试替身
//!
//! 仅在 `test-utils` feature 下编译，供各 crate 的集成测试注入端口实现。

use async_trait::async_trait;
use chrono_tz::Tz;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::geo::entity::{Coordinates, ResolvedZone};
use crate::geo::error::GeoError;
use crate::geo::port::{Geocoder, TimezoneFinder, ZoneResolver};

/// # Summary
/// 按脚本依次返回结果的地理编码替身，脚本耗尽后重复最后一个结果。
pub struct ScriptedGeocoder {
    script: Mutex<VecDeque<Result<Option<Coordinates>, GeoError>>>,
    last: Mutex<Option<Result<Option<Coordinates>, GeoError>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedGeocoder {
    pub fn new(script: Vec<Result<Option<Coordinates>, GeoError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// 每次调用前先休眠，用于触发单次超时
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Option<Coordinates>, GeoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.lock().await.pop_front();
        let mut last = self.last.lock().await;
        match next {
            Some(result) => {
                *last = Some(result.clone());
                result
            }
            None => last.clone().unwrap_or(Ok(None)),
        }
    }
}

/// # Summary
/// 固定返回同一时区的时区查询替身。
pub struct FixedTimezoneFinder {
    zone: Option<String>,
    calls: AtomicUsize,
}

impl FixedTimezoneFinder {
    pub fn new(zone: Option<&str>) -> Self {
        Self {
            zone: zone.map(str::to_string),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TimezoneFinder for FixedTimezoneFinder {
    fn timezone_at(&self, _latitude: f64, _longitude: f64) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.zone.clone()
    }
}

/// # Summary
/// 直接返回预设结果的时区解析器替身，并记录调用次数。
pub struct FixedZoneResolver {
    zone: ResolvedZone,
    calls: Arc<AtomicUsize>,
}

impl FixedZoneResolver {
    pub fn new(tz: Tz) -> Self {
        Self {
            zone: ResolvedZone::resolved(tz),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fallback(warning: &str) -> Self {
        Self {
            zone: ResolvedZone::fallback(warning),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// 共享的调用计数器，便于在实例被移入 `Arc<dyn ZoneResolver>` 后继续观察
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl ZoneResolver for FixedZoneResolver {
    async fn resolve(&self, _city: &str, _longitude: f64, _latitude: Option<f64>) -> ResolvedZone {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.zone.clone()
    }
}
