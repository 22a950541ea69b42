use thiserror::Error;

/// # Summary
/// 地理编码错误枚举，区分可重试的超时类错误与立即降级的其它错误。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 只有 `Timeout` 属于瞬时错误。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    // 请求超时 (连接或读取)
    #[error("Timeout: {0}")]
    Timeout(String),
    // 网络层或 HTTP 状态错误
    #[error("Network error: {0}")]
    Network(String),
    // 响应解析错误
    #[error("Parse error: {0}")]
    Parse(String),
    // 未知或未分类的错误
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl GeoError {
    /// 是否值得重试
    pub fn is_transient(&self) -> bool {
        matches!(self, GeoError::Timeout(_))
    }
}
