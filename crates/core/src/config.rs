use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub geocoder: GeocoderConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// # Summary
/// 地理编码服务与重试策略配置。
///
/// # Invariants
/// - 总预算 `total_budget_secs` 是整个重试循环的硬上限，与单次超时、重试次数共同约束等待时长。
/// - 默认值满足 `max_attempts × 单次超时 + (max_attempts - 1) × 间隔 <= 总预算`，持续超时时能用满全部尝试次数。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Nominatim 兼容接口的根地址
    pub base_url: String,
    pub user_agent: String,
    /// 单次请求超时 (秒)
    pub attempt_timeout_secs: u64,
    /// 最大尝试次数 (含首次)
    pub max_attempts: u32,
    /// 两次尝试之间的固定间隔 (秒)
    pub retry_delay_secs: u64,
    /// 整个重试循环的总时长上限 (秒)
    pub total_budget_secs: u64,
}

impl GeocoderConfig {
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn total_budget(&self) -> Duration {
        Duration::from_secs(self.total_budget_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` 指令，`RUST_LOG` 存在时以其为准
    pub filter: String,
    /// 滚动日志目录，为空则只输出到标准输出
    pub dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "oracle_master".to_string(),
            attempt_timeout_secs: 4,
            max_attempts: 5,
            retry_delay_secs: 5,
            total_budget_secs: 45,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            dir: None,
        }
    }
}

impl AppConfig {
    /// 监听地址，形如 `0.0.0.0:8080`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
