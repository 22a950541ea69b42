//! # 配置加载
//!
//! 分层顺序：代码默认值 → 可选配置文件 → `ORACLE__` 前缀的环境变量。

use config::{Config, ConfigError, Environment, File};
use oracle_core::config::AppConfig;
use std::collections::HashMap;
use std::path::Path;

/// 默认配置文件路径 (不存在时忽略)
pub const DEFAULT_CONFIG_PATH: &str = "config/oracle.toml";

/// 环境变量前缀与层级分隔符，例如 `ORACLE__SERVER__PORT=9000`
const ENV_PREFIX: &str = "ORACLE";
const ENV_SEPARATOR: &str = "__";

/// # Summary
/// 加载应用配置。
///
/// # Arguments
/// * `file`: 配置文件路径，文件不存在时跳过。
/// * `env`: 覆盖进程环境变量的键值表，`None` 时读取真实环境。
///
/// # Returns
/// 合并后的 `AppConfig`；文件格式错误或字段类型不符时返回 `ConfigError`。
pub fn load_config(file: &Path, env: Option<HashMap<String, String>>) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::from(file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        )
        .build()?
        .try_deserialize()
}
