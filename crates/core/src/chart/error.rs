use thiserror::Error;

/// # Summary
/// 排盘领域错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 时区/地理编码失败不属于此枚举，它们在解析器内部降级为 UTC 与告警。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// 输入缺失或格式非法，`field` 为出错字段名，不重试
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
    /// 计算过程中的意外失败，不返回部分结果
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChartError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ChartError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 校验错误对应的字段名
    pub fn field(&self) -> Option<&str> {
        match self {
            ChartError::Validation { field, .. } => Some(field),
            ChartError::Internal(_) => None,
        }
    }
}
