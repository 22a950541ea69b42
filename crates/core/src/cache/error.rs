use thiserror::Error;

/// # Summary
/// 缓存域错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 上游将任何缓存错误视为未命中，不影响排盘。
#[derive(Error, Debug)]
pub enum CacheError {
    // 底层存储引擎故障
    #[error("Storage error: {0}")]
    Storage(String),
    // 缓存键非法 (例如空字符串)
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}
