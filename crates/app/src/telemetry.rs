//! # 日志初始化

use oracle_core::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

/// 滚动日志文件名前缀
const LOG_FILE_PREFIX: &str = "oracle.log";

/// # Summary
/// 安装全局 tracing 订阅者。
///
/// # Logic
/// 1. 过滤规则优先取 `RUST_LOG`，否则取配置中的 `log.filter`。
/// 2. 始终输出到标准输出。
/// 3. 配置了 `log.dir` 时额外按天滚动写文件 (非阻塞写入)。
///
/// # Returns
/// 写文件时返回后台写线程的守卫，调用方须持有到进程退出，否则尾部日志会丢失。
pub fn init_tracing(config: &LogConfig) -> Result<Option<WorkerGuard>, TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter).with(fmt::layer());

    match &config.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            registry.try_init()?;
            Ok(None)
        }
    }
}
